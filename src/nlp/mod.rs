//! Natural Language Processing components
//!
//! This module provides normalization, tokenization, tagging, lemmatization
//! and stopword filtering, plus the [`LinguisticService`] contract the
//! pipeline consumes them through.

pub mod lemmatizer;
pub mod normalizer;
pub mod service;
pub mod stopwords;
pub mod tagger;
pub mod tokenizer;

use thiserror::Error;

use crate::types::Token;

pub use lemmatizer::Lemmatizer;
pub use normalizer::PersianNormalizer;
pub use service::LexiconService;
pub use stopwords::StopwordFilter;
pub use tagger::{LexiconTagger, TaggingModel};
pub use tokenizer::WordTokenizer;

/// Per-document failures raised by a [`LinguisticService`].
///
/// Both variants are recoverable: the batch runner skips the document and
/// moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinguisticError {
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },
    #[error("tagging failed: {reason}")]
    Tagging { reason: String },
}

impl LinguisticError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    pub fn tagging(reason: impl Into<String>) -> Self {
        Self::Tagging {
            reason: reason.into(),
        }
    }
}

/// Capability interface over the linguistic toolkit.
///
/// Implementations are initialized once per process and shared read-only, so
/// every method takes `&self` and the trait requires `Send + Sync`.
pub trait LinguisticService: Send + Sync {
    /// Canonicalize whitespace, character variants and special characters.
    /// Must be idempotent.
    fn normalize(&self, text: &str) -> String;

    /// Split normalized text into word-level units, preserving order.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, LinguisticError>;

    /// Assign one category per token; output has the same order and length.
    fn tag(&self, tokens: Vec<String>) -> Result<Vec<Token>, LinguisticError>;

    /// Map a surface form to its dictionary form. Must be idempotent.
    fn lemmatize(&self, word: &str) -> String;
}
