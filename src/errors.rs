//! Crate-level error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::AppConfigError;
use crate::crawl::CrawlError;
use crate::nlp::LinguisticError;
use crate::pipeline::DocumentError;
use crate::policy::PolicyError;

#[derive(Debug, Error)]
pub enum KeywordError {
    /// The tagging model could not be loaded; fatal at startup.
    #[error("tagging model unavailable at {path}: {reason}")]
    ResourceUnavailable { path: PathBuf, reason: String },
    #[error(transparent)]
    Linguistic(#[from] LinguisticError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Config(#[from] AppConfigError),
    #[error(transparent)]
    Crawl(#[from] CrawlError),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed table {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl KeywordError {
    /// Whether the error affects a single document only
    pub fn is_recoverable(&self) -> bool {
        matches!(self, KeywordError::Linguistic(_) | KeywordError::Document(_))
    }
}

pub type Result<T, E = KeywordError> = std::result::Result<T, E>;
