//! # abstract-keywords
//!
//! Keyword lemma extraction for Persian academic abstracts.
//!
//! Each abstract (plus its author keywords) is normalized, tokenized and
//! tagged; tokens in closed grammatical categories, tokens outside the Persian
//! alphabet and boilerplate words are dropped, and the survivors are reduced
//! to their lemmas in source order.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use abstract_keywords::{Document, KeywordPipeline, LexiconService, TokenFilter};
//!
//! let service = LexiconService::load("resources/pos_tagger.json".as_ref(), None)?;
//! let pipeline = KeywordPipeline::new(Arc::new(service), TokenFilter::default());
//! let result = pipeline.extract(&Document::new("a.html", "شبکه‌های عصبی در این پژوهش"))?;
//! println!("{}", result.lemmas.join(","));
//! ```

pub mod cli;
pub mod config;
pub mod crawl;
pub mod errors;
pub mod filter;
pub mod io;
pub mod nlp;
pub mod pipeline;
pub mod policy;
pub mod types;

pub use errors::{KeywordError, Result};
pub use filter::{TokenFilter, TokenRule};
pub use nlp::{LexiconService, LinguisticError, LinguisticService};
pub use pipeline::{BatchOutcome, BatchRunner, BatchSummary, DocumentError, KeywordPipeline};
pub use policy::{FilterPolicy, PolicySpec};
pub use types::{Document, KeywordResult, PosTag, Token};
