//! Batch runner over a table of documents.
//!
//! Documents are independent. A [`DocumentError`] is logged and the document
//! is dropped from the results; every other document still runs.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use super::observer::TracingObserver;
use super::runner::KeywordPipeline;
use super::DocumentError;
use crate::nlp::LinguisticService;
use crate::types::{Document, KeywordResult};

/// Counts for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Documents that produced a result
    pub processed: usize,
    /// Documents dropped because of a [`DocumentError`]
    pub skipped: usize,
    /// Processed documents whose lemma sequence is empty
    pub empty: usize,
    pub skipped_ids: Vec<String>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed + self.skipped
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Results in input order, skipped documents omitted
    pub results: Vec<KeywordResult>,
    pub summary: BatchSummary,
}

#[derive(Debug)]
pub struct BatchRunner<S> {
    pipeline: KeywordPipeline<S>,
    parallel: bool,
}

impl<S: LinguisticService> BatchRunner<S> {
    pub fn new(pipeline: KeywordPipeline<S>) -> Self {
        Self {
            pipeline,
            parallel: true,
        }
    }

    /// Run documents on the rayon pool (`true`, the default) or in sequence
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn pipeline(&self) -> &KeywordPipeline<S> {
        &self.pipeline
    }

    pub fn run(&self, documents: &[Document]) -> BatchOutcome {
        let extract = |document: &Document| {
            let mut observer = TracingObserver::new(&document.id);
            self.pipeline.extract_observed(document, &mut observer)
        };

        // collect() on an indexed parallel iterator keeps input order
        let outcomes: Vec<Result<KeywordResult, DocumentError>> = if self.parallel {
            documents.par_iter().map(extract).collect()
        } else {
            documents.iter().map(extract).collect()
        };

        let mut results = Vec::with_capacity(outcomes.len());
        let mut summary = BatchSummary::default();
        for outcome in outcomes {
            match outcome {
                Ok(result) => {
                    summary.processed += 1;
                    if result.is_empty() {
                        summary.empty += 1;
                    }
                    results.push(result);
                }
                Err(err) => {
                    warn!(
                        document_id = %err.document_id,
                        error = %err.source,
                        "skipping document"
                    );
                    summary.skipped += 1;
                    summary.skipped_ids.push(err.document_id);
                }
            }
        }

        info!(
            processed = summary.processed,
            skipped = summary.skipped,
            empty = summary.empty,
            parallel = self.parallel,
            "batch finished"
        );
        BatchOutcome { results, summary }
    }
}
