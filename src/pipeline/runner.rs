//! Keyword pipeline: one document in, one ordered lemma sequence out.
//!
//! Stages run in order:
//! 1. Normalize the raw text
//! 2. Tokenize
//! 3. Tag every token
//! 4. Filter and lemmatize survivors, in token order
//!
//! The pipeline never catches a [`LinguisticError`]; it attaches the document
//! id and hands it to the caller.

use std::sync::Arc;

use super::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, TokenVerdict, STAGE_FILTER,
    STAGE_NORMALIZE, STAGE_TAG, STAGE_TOKENIZE,
};
use super::DocumentError;
use crate::filter::TokenFilter;
use crate::nlp::{LinguisticError, LinguisticService};
use crate::types::{Document, KeywordResult};

/// Enter a tracing span for a pipeline stage.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::trace_span!("pipeline_stage", stage = $name).entered();
    };
}

/// The keyword pipeline over an injected, shared linguistic service
pub struct KeywordPipeline<S> {
    service: Arc<S>,
    filter: TokenFilter,
}

impl<S> std::fmt::Debug for KeywordPipeline<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordPipeline")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl<S: LinguisticService> KeywordPipeline<S> {
    pub fn new(service: Arc<S>, filter: TokenFilter) -> Self {
        Self { service, filter }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn filter(&self) -> &TokenFilter {
        &self.filter
    }

    /// Extract the lemma sequence of one document
    pub fn extract(&self, document: &Document) -> Result<KeywordResult, DocumentError> {
        self.extract_observed(document, &mut NoopObserver)
    }

    /// Extract with an observer receiving stage and token callbacks
    pub fn extract_observed(
        &self,
        document: &Document,
        observer: &mut impl PipelineObserver,
    ) -> Result<KeywordResult, DocumentError> {
        self.lemmas(&document.raw_text, observer)
            .map(|lemmas| KeywordResult::new(document.id.clone(), lemmas))
            .map_err(|source| DocumentError {
                document_id: document.id.clone(),
                source,
            })
    }

    fn lemmas(
        &self,
        raw_text: &str,
        observer: &mut impl PipelineObserver,
    ) -> Result<Vec<String>, LinguisticError> {
        // Stage 1: Normalize
        trace_stage!(STAGE_NORMALIZE);
        observer.on_stage_start(STAGE_NORMALIZE);
        let clock = StageClock::start();
        let text = self.service.normalize(raw_text);
        observer.on_stage_end(STAGE_NORMALIZE, &StageReport::new(clock.elapsed()));

        // Stage 2: Tokenize
        trace_stage!(STAGE_TOKENIZE);
        observer.on_stage_start(STAGE_TOKENIZE);
        let clock = StageClock::start();
        let tokens = self.service.tokenize(&text)?;
        let report = StageReport::new(clock.elapsed()).with_items(tokens.len());
        observer.on_stage_end(STAGE_TOKENIZE, &report);

        // Stage 3: Tag
        trace_stage!(STAGE_TAG);
        observer.on_stage_start(STAGE_TAG);
        let clock = StageClock::start();
        let expected = tokens.len();
        let tagged = self.service.tag(tokens)?;
        if tagged.len() != expected {
            return Err(LinguisticError::tagging(format!(
                "tagger returned {} tokens for {expected}",
                tagged.len()
            )));
        }
        let report = StageReport::new(clock.elapsed()).with_items(tagged.len());
        observer.on_stage_end(STAGE_TAG, &report);

        // Stage 4: Filter and lemmatize
        trace_stage!(STAGE_FILTER);
        observer.on_stage_start(STAGE_FILTER);
        let clock = StageClock::start();
        let mut lemmas = Vec::new();
        for token in &tagged {
            match self.filter.first_rejection(token) {
                None => {
                    let lemma = self.service.lemmatize(&token.surface);
                    observer.on_token(
                        token,
                        &TokenVerdict::Kept {
                            lemma: lemma.clone(),
                        },
                    );
                    lemmas.push(lemma);
                }
                Some(rule) => observer.on_token(token, &TokenVerdict::Rejected { rule }),
            }
        }
        let report = StageReport::new(clock.elapsed()).with_items(lemmas.len());
        observer.on_stage_end(STAGE_FILTER, &report);

        Ok(lemmas)
    }
}
