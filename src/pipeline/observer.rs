//! Pipeline observer hooks for logging, profiling and debugging.
//!
//! Observers receive notifications at stage boundaries and one verdict per
//! tagged token, without coupling to stage logic.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::types::Token;

pub const STAGE_NORMALIZE: &str = "normalize";
pub const STAGE_TOKENIZE: &str = "tokenize";
pub const STAGE_TAG: &str = "tag";
pub const STAGE_FILTER: &str = "filter";

/// Stage names in execution order
pub const STAGES: [&str; 4] = [STAGE_NORMALIZE, STAGE_TOKENIZE, STAGE_TAG, STAGE_FILTER];

/// Wall-clock timer for one stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// Facts about a finished stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub elapsed: Duration,
    /// Items produced by the stage (tokens, or lemmas for the filter stage)
    pub items: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            items: None,
        }
    }

    pub fn with_items(mut self, items: usize) -> Self {
        self.items = Some(items);
        self
    }
}

/// What the filter decided for one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenVerdict {
    Kept { lemma: String },
    Rejected { rule: &'static str },
}

/// Receives callbacks while a document moves through the pipeline.
///
/// All methods default to no-ops.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    fn on_token(&mut self, _token: &Token, _verdict: &TokenVerdict) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Emits stage timings and token verdicts as `trace` events
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver<'a> {
    document_id: &'a str,
}

impl<'a> TracingObserver<'a> {
    pub fn new(document_id: &'a str) -> Self {
        Self { document_id }
    }
}

impl PipelineObserver for TracingObserver<'_> {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        trace!(
            document_id = self.document_id,
            stage,
            elapsed_us = report.elapsed.as_micros() as u64,
            items = report.items,
            "stage finished"
        );
    }

    fn on_token(&mut self, token: &Token, verdict: &TokenVerdict) {
        if let TokenVerdict::Rejected { rule } = verdict {
            trace!(
                document_id = self.document_id,
                surface = %token.surface,
                category = %token.category_label(),
                rule,
                "token rejected"
            );
        }
    }
}

/// Collects per-stage durations
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    timings: Vec<(&'static str, Duration)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timings(&self) -> &[(&'static str, Duration)] {
        &self.timings
    }

    pub fn total(&self) -> Duration {
        self.timings.iter().map(|(_, d)| *d).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.timings.push((stage, report.elapsed));
    }
}

/// Records every token with its verdict, in order
#[derive(Debug, Clone, Default)]
pub struct VerdictRecorder {
    entries: Vec<(Token, TokenVerdict)>,
}

impl VerdictRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(Token, TokenVerdict)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(Token, TokenVerdict)> {
        self.entries
    }
}

impl PipelineObserver for VerdictRecorder {
    fn on_token(&mut self, token: &Token, verdict: &TokenVerdict) {
        self.entries.push((token.clone(), verdict.clone()));
    }
}
