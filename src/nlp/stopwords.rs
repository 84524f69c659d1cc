//! Boilerplate stop-list
//!
//! Surface forms dropped regardless of their grammatical category. Matching
//! is exact on the normalized surface form; no stemming or case folding.

use rustc_hash::FxHashSet;

/// Boilerplate terms of Persian abstracts ("purpose", "research", "review",
/// "present") plus bracket characters.
pub const BOILERPLATE: &[&str] = &["هدف", "پژوهش", "بررسی", "حاضر", ")", "(", "]", "["];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordFilter {
    entries: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::from_list(BOILERPLATE)
    }
}

impl StopwordFilter {
    /// Stop-list with no entries
    pub fn empty() -> Self {
        Self::from_list::<&str>(&[])
    }

    /// Stop-list holding exactly `entries`; duplicates collapse
    pub fn from_list<S: AsRef<str>>(entries: &[S]) -> Self {
        Self {
            entries: entries.iter().map(|e| e.as_ref().to_owned()).collect(),
        }
    }

    pub fn is_stopword(&self, surface: &str) -> bool {
        self.entries.contains(surface)
    }

    /// Entries in code point order
    pub fn sorted(&self) -> Vec<&str> {
        let mut entries: Vec<&str> = self.entries.iter().map(String::as_str).collect();
        entries.sort_unstable();
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
