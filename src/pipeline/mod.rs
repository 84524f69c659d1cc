//! Extraction pipeline
//!
//! [`runner::KeywordPipeline`] turns one [`Document`](crate::types::Document)
//! into one [`KeywordResult`](crate::types::KeywordResult);
//! [`batch::BatchRunner`] drives it over a whole table and isolates
//! per-document failures.

pub mod batch;
pub mod observer;
pub mod runner;

use thiserror::Error;

use crate::nlp::LinguisticError;

pub use batch::{BatchOutcome, BatchRunner, BatchSummary};
pub use observer::{
    NoopObserver, PipelineObserver, StageReport, StageTimingObserver, TokenVerdict,
    TracingObserver, VerdictRecorder,
};
pub use runner::KeywordPipeline;

/// A [`LinguisticError`] attributed to the document that raised it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("document `{document_id}`: {source}")]
pub struct DocumentError {
    pub document_id: String,
    #[source]
    pub source: LinguisticError,
}
