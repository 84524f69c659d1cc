//! Structured policy diagnostics.

use std::fmt;

use serde::Serialize;

/// Stable machine-readable code for a policy finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    EmptyAlphabet,
    DigitInAlphabet,
    UnknownCategory,
    BlankEntry,
    DuplicateEntry,
    UnknownField,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyAlphabet => "empty_alphabet",
            Self::DigitInAlphabet => "digit_in_alphabet",
            Self::UnknownCategory => "unknown_category",
            Self::BlankEntry => "blank_entry",
            Self::DuplicateEntry => "duplicate_entry",
            Self::UnknownField => "unknown_field",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding against a [`PolicySpec`](super::PolicySpec), addressed by a
/// JSON-pointer-like path such as `/stoplist/3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicySpecError {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl PolicySpecError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for PolicySpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl std::error::Error for PolicySpecError {}
