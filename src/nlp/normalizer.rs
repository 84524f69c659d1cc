//! Persian text normalization
//!
//! Unifies Arabic and Persian letter variants, strips diacritics and special
//! characters, and collapses whitespace before tokenization.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Zero-width non-joiner, kept inside words (e.g. `می‌شود`)
pub const ZWNJ: char = '\u{200C}';

/// Symbols and format characters, except ZWNJ and the replacement character
/// (the tokenizer reports U+FFFD as encoding damage).
static SPECIALS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{So}\p{Sk}\p{Cf}&&[^\x{200C}\x{FFFD}]]").expect("valid specials pattern")
});

/// Rule-based normalizer for Persian text
#[derive(Debug, Clone)]
pub struct PersianNormalizer {
    /// Map Latin and Arabic-Indic digits to Persian digits
    persian_digits: bool,
}

impl Default for PersianNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PersianNormalizer {
    pub fn new() -> Self {
        Self {
            persian_digits: true,
        }
    }

    /// Set whether digits are mapped to their Persian forms
    pub fn with_persian_digits(mut self, persian_digits: bool) -> Self {
        self.persian_digits = persian_digits;
        self
    }

    pub fn normalize(&self, text: &str) -> String {
        let stripped = strip_marks(&remove_specials(text));
        let composed: String = stripped.nfkc().collect();
        let cleaned = strip_marks(&remove_specials(&composed));

        let translated: String = cleaned
            .chars()
            .map(|c| self.translate(c))
            .collect();

        translated
            .split_whitespace()
            .filter_map(clean_zwnj)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn translate(&self, c: char) -> char {
        match c {
            'ي' | 'ى' | 'ۍ' | 'ێ' | 'ې' => 'ی',
            'ك' | 'ڪ' => 'ک',
            'ە' | 'ۀ' | 'ہ' => 'ه',
            '%' => '٪',
            '0'..='9' | '٠'..='٩' if self.persian_digits => {
                let value = c.to_digit(10).or_else(|| arabic_indic_value(c)).unwrap_or(0);
                char::from_u32('۰' as u32 + value).unwrap_or(c)
            }
            _ => c,
        }
    }
}

fn arabic_indic_value(c: char) -> Option<u32> {
    let value = (c as u32).checked_sub('٠' as u32)?;
    (value < 10).then_some(value)
}

fn remove_specials(text: &str) -> String {
    let filtered: String = text
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect();
    SPECIALS.replace_all(&filtered, "").into_owned()
}

/// Collapse ZWNJ runs and trim ZWNJ at word edges; `None` if nothing is left
fn clean_zwnj(word: &str) -> Option<String> {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        if c == ZWNJ && (out.is_empty() || out.ends_with(ZWNJ)) {
            continue;
        }
        out.push(c);
    }
    while out.ends_with(ZWNJ) {
        out.pop();
    }
    (!out.is_empty()).then_some(out)
}

/// Drop Arabic harakat, superscript alef and tatweel
fn strip_marks(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\u{064B}'..='\u{0652}' | '\u{0670}' | '\u{0640}'))
        .collect()
}
