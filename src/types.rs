//! Core data types
//!
//! Documents flow into the pipeline, tagged [`Token`]s are produced
//! transiently, and a [`KeywordResult`] comes out.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Grammatical category assigned by the tagger (Universal Dependencies tag set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Adjective,
    Adposition,
    Adverb,
    Auxiliary,
    CoordinatingConjunction,
    Determiner,
    Interjection,
    Noun,
    Numeral,
    Particle,
    Pronoun,
    ProperNoun,
    Punctuation,
    SubordinatingConjunction,
    Symbol,
    Verb,
    Other,
}

impl PosTag {
    /// Every tag, in label order
    pub const ALL: [PosTag; 17] = [
        PosTag::Adjective,
        PosTag::Adposition,
        PosTag::Adverb,
        PosTag::Auxiliary,
        PosTag::CoordinatingConjunction,
        PosTag::Determiner,
        PosTag::Interjection,
        PosTag::Noun,
        PosTag::Numeral,
        PosTag::Particle,
        PosTag::Pronoun,
        PosTag::ProperNoun,
        PosTag::Punctuation,
        PosTag::SubordinatingConjunction,
        PosTag::Symbol,
        PosTag::Verb,
        PosTag::Other,
    ];

    /// Parse a bare UD label such as `"NOUN"` (case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        let tag = match label.trim().to_uppercase().as_str() {
            "ADJ" => PosTag::Adjective,
            "ADP" => PosTag::Adposition,
            "ADV" => PosTag::Adverb,
            "AUX" => PosTag::Auxiliary,
            "CCONJ" => PosTag::CoordinatingConjunction,
            "DET" => PosTag::Determiner,
            "INTJ" => PosTag::Interjection,
            "NOUN" => PosTag::Noun,
            "NUM" => PosTag::Numeral,
            "PART" => PosTag::Particle,
            "PRON" => PosTag::Pronoun,
            "PROPN" => PosTag::ProperNoun,
            "PUNCT" => PosTag::Punctuation,
            "SCONJ" => PosTag::SubordinatingConjunction,
            "SYM" => PosTag::Symbol,
            "VERB" => PosTag::Verb,
            "X" => PosTag::Other,
            _ => return None,
        };
        Some(tag)
    }

    /// The UD label for this tag
    pub fn as_label(&self) -> &'static str {
        match self {
            PosTag::Adjective => "ADJ",
            PosTag::Adposition => "ADP",
            PosTag::Adverb => "ADV",
            PosTag::Auxiliary => "AUX",
            PosTag::CoordinatingConjunction => "CCONJ",
            PosTag::Determiner => "DET",
            PosTag::Interjection => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Numeral => "NUM",
            PosTag::Particle => "PART",
            PosTag::Pronoun => "PRON",
            PosTag::ProperNoun => "PROPN",
            PosTag::Punctuation => "PUNCT",
            PosTag::SubordinatingConjunction => "SCONJ",
            PosTag::Symbol => "SYM",
            PosTag::Verb => "VERB",
            PosTag::Other => "X",
        }
    }

    /// Check if this is a noun or proper noun
    pub fn is_noun(&self) -> bool {
        matches!(self, PosTag::Noun | PosTag::ProperNoun)
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Marker appended to a label when the token carries the ezafe construction
pub const EZAFE_MARKER: &str = "EZ";

/// Parse a full tagger label such as `"NOUN"` or `"NUM,EZ"`.
///
/// Returns the category and whether the ezafe marker was present.
pub fn parse_category(label: &str) -> Option<(PosTag, bool)> {
    let mut parts = label.split(',');
    let pos = PosTag::from_label(parts.next()?)?;
    let mut ezafe = false;
    for part in parts {
        if part.trim().eq_ignore_ascii_case(EZAFE_MARKER) {
            ezafe = true;
        } else {
            return None;
        }
    }
    Some((pos, ezafe))
}

/// A single document handed to the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Source path or URL; unique per batch
    pub id: String,
    pub raw_text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// A tagged token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface form as produced by the tokenizer
    pub surface: String,
    /// Grammatical category
    pub pos: PosTag,
    /// Whether the tagger marked the ezafe construction
    pub ezafe: bool,
}

impl Token {
    pub fn new(surface: impl Into<String>, pos: PosTag) -> Self {
        Self {
            surface: surface.into(),
            pos,
            ezafe: false,
        }
    }

    pub fn with_ezafe(mut self, ezafe: bool) -> Self {
        self.ezafe = ezafe;
        self
    }

    /// Full tagger label, e.g. `"NOUN,EZ"`
    pub fn category_label(&self) -> String {
        if self.ezafe {
            format!("{},{}", self.pos.as_label(), EZAFE_MARKER)
        } else {
            self.pos.as_label().to_string()
        }
    }
}

/// Lemmas extracted from one document, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordResult {
    pub document_id: String,
    pub lemmas: Vec<String>,
}

impl KeywordResult {
    pub fn new(document_id: impl Into<String>, lemmas: Vec<String>) -> Self {
        Self {
            document_id: document_id.into(),
            lemmas,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}
