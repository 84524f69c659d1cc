//! Word tokenization
//!
//! Splits text into words (runs of letters, marks, digits and ZWNJ) and
//! single-character punctuation or symbol tokens.

use once_cell::sync::Lazy;
use regex::Regex;

use super::LinguisticError;

static WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{M}\p{N}\x{200C}]+|[^\s\p{L}\p{M}\p{N}\x{200C}]").expect("valid word pattern")
});

/// Marker left by lossy decoding of invalid UTF-8
const REPLACEMENT: char = '\u{FFFD}';

/// Regex-based word tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        WordTokenizer
    }

    /// Tokenize `text`, rejecting input that carries decoding damage
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>, LinguisticError> {
        if let Some(offset) = text.find(REPLACEMENT) {
            return Err(LinguisticError::malformed(format!(
                "replacement character at byte {offset}"
            )));
        }

        Ok(WORD
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_words_and_punctuation() {
        let tokens = WordTokenizer::new().tokenize("شبکه، داده (مدل)!").unwrap();
        assert_eq!(tokens, vec!["شبکه", "،", "داده", "(", "مدل", ")", "!"]);
    }

    #[test]
    fn test_keeps_zwnj_inside_words() {
        let tokens = WordTokenizer::new().tokenize("می\u{200C}شود").unwrap();
        assert_eq!(tokens, vec!["می\u{200C}شود"]);
    }

    #[test]
    fn test_mixed_script_stays_one_token() {
        let tokens = WordTokenizer::new().tokenize("مدلA1 ۱۴۰۲").unwrap();
        assert_eq!(tokens, vec!["مدلA1", "۱۴۰۲"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(WordTokenizer::new().tokenize("").unwrap().is_empty());
        assert!(WordTokenizer::new().tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_replacement_character() {
        let err = WordTokenizer::new().tokenize("کتاب\u{FFFD}").unwrap_err();
        assert!(matches!(err, LinguisticError::MalformedInput { .. }));
    }
}
