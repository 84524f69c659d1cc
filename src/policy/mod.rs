//! Alphabet and stopword policy
//!
//! A [`PolicySpec`] is the configurable, serializable description of what the
//! token filter accepts. It is validated once at startup by the
//! [`validation::ValidationEngine`] and compiled into an immutable
//! [`FilterPolicy`].

pub mod errors;
pub mod validation;

use std::collections::HashMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::nlp::normalizer::PersianNormalizer;
use crate::nlp::stopwords::{StopwordFilter, BOILERPLATE};
use crate::types::PosTag;

pub use errors::{ErrorCode, PolicySpecError};
pub use validation::{Severity, ValidationEngine, ValidationReport, ValidationRule};

/// The 33 letters of the Persian alphabet
pub const PERSIAN_ALPHABET: &str = "اآبپتثجچحخدذرزژسشصضطظعغفقکگلمنوهی";

/// Latin, Persian and Arabic-Indic digits
pub const DIGITS: &str = "0123456789۰۱۲۳۴۵۶۷۸۹٠١٢٣٤٥٦٧٨٩";

/// Punctuation, conjunctions, verbs, adpositions, determiners, numerals and
/// pronouns
pub const FORBIDDEN_CATEGORIES: [PosTag; 8] = [
    PosTag::Punctuation,
    PosTag::CoordinatingConjunction,
    PosTag::Verb,
    PosTag::Adposition,
    PosTag::SubordinatingConjunction,
    PosTag::Determiner,
    PosTag::Numeral,
    PosTag::Pronoun,
];

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid filter policy: {}", summarize(.0))]
    Invalid(ValidationReport),
}

fn summarize(report: &ValidationReport) -> String {
    report
        .errors()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configurable description of the filter policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySpec {
    /// Permitted letters; whitespace is ignored
    pub alphabet: String,
    /// Digit characters; never permitted in a keyword
    pub digits: String,
    /// Category labels whose tokens are dropped
    pub forbidden_categories: Vec<String>,
    /// Boilerplate surface forms
    pub stoplist: Vec<String>,
    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    pub strict: bool,
    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for PolicySpec {
    fn default() -> Self {
        Self {
            alphabet: PERSIAN_ALPHABET.to_string(),
            digits: DIGITS.to_string(),
            forbidden_categories: FORBIDDEN_CATEGORIES
                .iter()
                .map(|t| t.as_label().to_string())
                .collect(),
            stoplist: BOILERPLATE.iter().map(|s| s.to_string()).collect(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl PolicySpec {
    /// Validate the spec and compile it.
    ///
    /// Warnings are logged; any error aborts with [`PolicyError::Invalid`]
    /// carrying the full report.
    pub fn compile(&self) -> Result<FilterPolicy, PolicyError> {
        self.compile_with(&ValidationEngine::with_defaults())
    }

    pub fn compile_with(&self, engine: &ValidationEngine) -> Result<FilterPolicy, PolicyError> {
        let report = engine.validate(self);
        for warning in report.warnings() {
            warn!(%warning, "filter policy warning");
        }
        if report.has_errors() {
            return Err(PolicyError::Invalid(report));
        }

        let normalizer = PersianNormalizer::new();
        let stoplist: Vec<String> = self
            .stoplist
            .iter()
            .map(|entry| normalizer.normalize(entry))
            .collect();

        Ok(FilterPolicy {
            alphabet: significant_chars(&self.alphabet),
            digits: significant_chars(&self.digits),
            forbidden: self
                .forbidden_categories
                .iter()
                .filter_map(|label| PosTag::from_label(label))
                .collect(),
            stopwords: StopwordFilter::from_list(&stoplist),
        })
    }
}

fn significant_chars(chars: &str) -> FxHashSet<char> {
    chars.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Compiled, immutable filter policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPolicy {
    alphabet: FxHashSet<char>,
    digits: FxHashSet<char>,
    forbidden: FxHashSet<PosTag>,
    stopwords: StopwordFilter,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::persian()
    }
}

impl FilterPolicy {
    /// The built-in Persian policy
    pub fn persian() -> Self {
        Self {
            alphabet: significant_chars(PERSIAN_ALPHABET),
            digits: significant_chars(DIGITS),
            forbidden: FORBIDDEN_CATEGORIES.into_iter().collect(),
            stopwords: StopwordFilter::default(),
        }
    }

    /// Whether `c` is a permitted letter
    pub fn is_permitted(&self, c: char) -> bool {
        self.alphabet.contains(&c)
    }

    pub fn is_digit(&self, c: char) -> bool {
        self.digits.contains(&c)
    }

    pub fn is_forbidden(&self, pos: PosTag) -> bool {
        self.forbidden.contains(&pos)
    }

    pub fn is_stopword(&self, surface: &str) -> bool {
        self.stopwords.is_stopword(surface)
    }

    pub fn alphabet_len(&self) -> usize {
        self.alphabet.len()
    }

    /// Forbidden categories in label order
    pub fn forbidden_categories(&self) -> Vec<PosTag> {
        PosTag::ALL
            .into_iter()
            .filter(|t| self.forbidden.contains(t))
            .collect()
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec_compiles_to_persian_policy() {
        let policy = PolicySpec::default().compile().unwrap();
        assert_eq!(policy, FilterPolicy::persian());
    }

    #[test]
    fn test_persian_alphabet() {
        let policy = FilterPolicy::persian();
        assert_eq!(policy.alphabet_len(), 33);
        for c in ['ا', 'آ', 'پ', 'چ', 'ژ', 'ک', 'گ', 'ی'] {
            assert!(policy.is_permitted(c), "{c} should be permitted");
        }
        for c in ['ي', 'ك', 'ء', 'a', '1', '۱', '\u{200C}'] {
            assert!(!policy.is_permitted(c), "{c:?} should not be permitted");
        }
    }

    #[test]
    fn test_forbidden_categories() {
        let policy = FilterPolicy::persian();
        assert_eq!(policy.forbidden_categories().len(), 8);
        assert!(policy.is_forbidden(PosTag::Verb));
        assert!(policy.is_forbidden(PosTag::Numeral));
        assert!(!policy.is_forbidden(PosTag::Noun));
        assert!(!policy.is_forbidden(PosTag::Adjective));
    }

    #[test]
    fn test_digits() {
        let policy = FilterPolicy::persian();
        assert!(policy.is_digit('7'));
        assert!(policy.is_digit('۷'));
        assert!(policy.is_digit('٧'));
        assert!(!policy.is_digit('ا'));
    }

    #[test]
    fn test_invalid_spec_is_rejected() {
        let spec = PolicySpec {
            forbidden_categories: vec!["VERBS".into()],
            ..PolicySpec::default()
        };
        let err = spec.compile().unwrap_err();
        let PolicyError::Invalid(report) = &err;
        assert_eq!(report.errors().count(), 1);
        assert!(err.to_string().contains("VERBS"));
    }

    #[test]
    fn test_stoplist_is_normalized() {
        // Arabic kaf and yeh in the configured entry
        let spec = PolicySpec {
            stoplist: vec!["كيفيت".into()],
            ..PolicySpec::default()
        };
        let policy = spec.compile().unwrap();
        assert!(policy.is_stopword("کیفیت"));
    }

    #[test]
    fn test_whitespace_in_alphabet_is_ignored() {
        let spec = PolicySpec {
            alphabet: "ا ب\nپ".into(),
            ..PolicySpec::default()
        };
        let policy = spec.compile().unwrap();
        assert_eq!(policy.alphabet_len(), 3);
        assert!(!policy.is_permitted(' '));
    }
}
