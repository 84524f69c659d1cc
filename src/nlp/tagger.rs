//! Lexicon-backed part-of-speech tagging
//!
//! The tagging model is a JSON resource holding a word → label lexicon and a
//! lemma table. It is loaded once and shared by the tagger and the
//! lemmatizer.
//!
//! ```json
//! {
//!   "version": 1,
//!   "default_tag": "NOUN",
//!   "tags": { "است": "VERB", "این": "DET" },
//!   "lemmas": { "شبکه‌ها": "شبکه" }
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::normalizer::PersianNormalizer;
use super::LinguisticError;
use crate::types::{parse_category, PosTag, Token};

/// Model format version understood by this crate
pub const MODEL_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse model: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported model version {found} (expected {expected})", expected = MODEL_VERSION)]
    UnsupportedVersion { found: u32 },
    #[error("unknown tag label `{label}` for `{word}`")]
    UnknownLabel { word: String, label: String },
    #[error("lemma table is not idempotent: `{form}` → `{lemma}` → `{next}`")]
    NonIdempotentLemma {
        form: String,
        lemma: String,
        next: String,
    },
}

/// On-disk shape of a tagging model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub version: u32,
    pub default_tag: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub lemmas: HashMap<String, String>,
}

/// A loaded, validated tagging model
#[derive(Debug, Clone)]
pub struct TaggingModel {
    tags: FxHashMap<String, (PosTag, bool)>,
    default_tag: (PosTag, bool),
    lemmas: FxHashMap<String, String>,
    /// Words that are their own lemma
    vocabulary: FxHashSet<String>,
}

impl TaggingModel {
    /// Load a model from a JSON file
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse a model from a JSON string
    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let file: ModelFile = serde_json::from_str(raw)?;
        Self::from_file(file)
    }

    /// Validate a parsed model file.
    ///
    /// Keys and values are normalized so lookups match normalized tokens.
    pub fn from_file(file: ModelFile) -> Result<Self, ModelError> {
        if file.version != MODEL_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: file.version,
            });
        }

        let normalizer = PersianNormalizer::new();

        let default_tag =
            parse_category(&file.default_tag).ok_or_else(|| ModelError::UnknownLabel {
                word: "<default>".to_string(),
                label: file.default_tag.clone(),
            })?;

        let mut tags = FxHashMap::default();
        for (word, label) in file.tags {
            let category = parse_category(&label).ok_or_else(|| ModelError::UnknownLabel {
                word: word.clone(),
                label: label.clone(),
            })?;
            tags.insert(normalizer.normalize(&word), category);
        }

        let lemmas: FxHashMap<String, String> = file
            .lemmas
            .into_iter()
            .map(|(form, lemma)| (normalizer.normalize(&form), normalizer.normalize(&lemma)))
            .collect();

        for (form, lemma) in &lemmas {
            if let Some(next) = lemmas.get(lemma) {
                if next != lemma {
                    return Err(ModelError::NonIdempotentLemma {
                        form: form.clone(),
                        lemma: lemma.clone(),
                        next: next.clone(),
                    });
                }
            }
        }

        let vocabulary = tags
            .keys()
            .filter(|word| !lemmas.contains_key(*word))
            .chain(lemmas.values())
            .cloned()
            .collect();

        Ok(Self {
            tags,
            default_tag,
            lemmas,
            vocabulary,
        })
    }

    /// Category recorded in the lexicon for `word`
    pub fn lookup(&self, word: &str) -> Option<(PosTag, bool)> {
        self.tags.get(word).copied()
    }

    pub fn default_tag(&self) -> (PosTag, bool) {
        self.default_tag
    }

    /// Lemma-table entry for `form`
    pub fn lemma(&self, form: &str) -> Option<&str> {
        self.lemmas.get(form).map(String::as_str)
    }

    /// Whether `word` is known to be its own lemma
    pub fn is_vocabulary(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }

    /// Number of lexicon entries
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Tagger backed by a [`TaggingModel`] lexicon
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    model: Arc<TaggingModel>,
    /// Longest token sequence the tagger accepts
    max_tokens: Option<usize>,
}

impl LexiconTagger {
    pub fn new(model: Arc<TaggingModel>) -> Self {
        Self {
            model,
            max_tokens: None,
        }
    }

    /// Set the token limit per call
    pub fn with_max_tokens(mut self, max_tokens: Option<usize>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn tag(&self, tokens: Vec<String>) -> Result<Vec<Token>, LinguisticError> {
        if let Some(limit) = self.max_tokens {
            if tokens.len() > limit {
                return Err(LinguisticError::tagging(format!(
                    "{} tokens exceed the limit of {limit}",
                    tokens.len()
                )));
            }
        }

        Ok(tokens
            .into_iter()
            .map(|surface| {
                let (pos, ezafe) = self.categorize(&surface);
                Token::new(surface, pos).with_ezafe(ezafe)
            })
            .collect())
    }

    fn categorize(&self, surface: &str) -> (PosTag, bool) {
        if let Some(category) = self.model.lookup(surface) {
            return category;
        }
        if surface.chars().all(|c| !c.is_alphanumeric()) {
            return (PosTag::Punctuation, false);
        }
        if surface.chars().any(|c| c.is_numeric()) {
            return (PosTag::Numeral, false);
        }
        self.model.default_tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Arc<TaggingModel> {
        Arc::new(
            TaggingModel::from_json(
                r#"{
                    "version": 1,
                    "default_tag": "NOUN",
                    "tags": { "است": "VERB", "این": "DET", "رابطه": "NOUN,EZ", "علمي": "ADJ" },
                    "lemmas": { "شبکهها": "شبکه" }
                }"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_lexicon_lookup() {
        let tokens = LexiconTagger::new(model())
            .tag(vec!["این".into(), "رابطه".into(), "است".into()])
            .unwrap();
        let labels: Vec<_> = tokens.iter().map(|t| t.category_label()).collect();
        assert_eq!(labels, vec!["DET", "NOUN,EZ", "VERB"]);
    }

    #[test]
    fn test_fallback_heuristics() {
        let tokens = LexiconTagger::new(model())
            .tag(vec!["،".into(), "۱۴۰۲".into(), "داده".into()])
            .unwrap();
        assert_eq!(tokens[0].pos, PosTag::Punctuation);
        assert_eq!(tokens[1].pos, PosTag::Numeral);
        assert_eq!(tokens[2].pos, PosTag::Noun);
    }

    #[test]
    fn test_preserves_order_and_length() {
        let input: Vec<String> = vec!["الف".into(), "ب".into(), "است".into(), "!".into()];
        let tokens = LexiconTagger::new(model()).tag(input.clone()).unwrap();
        let surfaces: Vec<_> = tokens.iter().map(|t| t.surface.clone()).collect();
        assert_eq!(surfaces, input);
    }

    #[test]
    fn test_keys_are_normalized() {
        // "علمي" is stored with an Arabic yeh
        let tagger = LexiconTagger::new(model());
        let tokens = tagger.tag(vec!["علمی".into()]).unwrap();
        assert_eq!(tokens[0].pos, PosTag::Adjective);
    }

    #[test]
    fn test_token_limit() {
        let tagger = LexiconTagger::new(model()).with_max_tokens(Some(2));
        let err = tagger
            .tag(vec!["الف".into(), "ب".into(), "پ".into()])
            .unwrap_err();
        assert!(matches!(err, LinguisticError::Tagging { .. }));
        assert!(tagger.tag(vec!["الف".into(), "ب".into()]).is_ok());
    }

    #[test]
    fn test_rejects_unknown_label() {
        let err = TaggingModel::from_json(
            r#"{ "version": 1, "default_tag": "NOUN", "tags": { "x": "BOGUS" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::UnknownLabel { .. }));
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let err = TaggingModel::from_json(r#"{ "version": 7, "default_tag": "NOUN" }"#)
            .unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedVersion { found: 7 }));
    }

    #[test]
    fn test_rejects_chained_lemmas() {
        let err = TaggingModel::from_json(
            r#"{ "version": 1, "default_tag": "NOUN", "lemmas": { "الف": "ب", "ب": "پ" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::NonIdempotentLemma { .. }));
    }

    #[test]
    fn test_vocabulary_includes_lemmas() {
        let model = model();
        assert!(model.is_vocabulary("شبکه"));
        assert!(model.is_vocabulary("است"));
        assert!(!model.is_vocabulary("شبکهها"));
    }
}
