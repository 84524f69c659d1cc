//! Dictionary and suffix-stripping lemmatizer
//!
//! Lookup order: the model's lemma table, then the vocabulary (words that are
//! their own lemma), then a single inflectional suffix strip whose stem must be
//! known. Every returned value is a fixed point, so lemmatization is
//! idempotent.

use std::sync::Arc;

use super::normalizer::ZWNJ;
use super::tagger::TaggingModel;

/// Inflectional suffixes, longest first
const SUFFIXES: &[&str] = &["هایی", "های", "ترین", "ها", "تر", "ان", "ات", "ی"];

#[derive(Debug, Clone)]
pub struct Lemmatizer {
    model: Arc<TaggingModel>,
}

impl Lemmatizer {
    pub fn new(model: Arc<TaggingModel>) -> Self {
        Self { model }
    }

    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.model.lemma(word) {
            return lemma.to_string();
        }
        if self.model.is_vocabulary(word) {
            return word.to_string();
        }

        for suffix in SUFFIXES {
            let Some(stem) = word.strip_suffix(suffix) else {
                continue;
            };
            let stem = stem.trim_end_matches(ZWNJ);
            if stem.is_empty() {
                continue;
            }
            if let Some(lemma) = self.model.lemma(stem) {
                return lemma.to_string();
            }
            if self.model.is_vocabulary(stem) {
                return stem.to_string();
            }
        }

        word.to_string()
    }
}
