//! Validation engine for filter policies.
//!
//! Every registered [`ValidationRule`] runs against the [`PolicySpec`];
//! findings are collected into one [`ValidationReport`] rather than stopping
//! at the first error.
//!
//! ```rust,ignore
//! use abstract_keywords::policy::validation::ValidationEngine;
//!
//! let report = ValidationEngine::with_defaults().validate(&spec);
//! for err in report.errors() {
//!     eprintln!("{err}");
//! }
//! ```

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::errors::{ErrorCode, PolicySpecError};
use super::PolicySpec;
use crate::types::PosTag;

/// Errors reject the policy; warnings are only logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding, tagged with the rule that produced it
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    /// Name of the rule that produced this finding
    pub rule: String,
    #[serde(flatten)]
    pub error: PolicySpecError,
}

impl ValidationDiagnostic {
    pub fn error(rule: &str, err: PolicySpecError) -> Self {
        Self {
            severity: Severity::Error,
            rule: rule.to_string(),
            error: err,
        }
    }

    pub fn warning(rule: &str, err: PolicySpecError) -> Self {
        Self {
            severity: Severity::Warning,
            rule: rule.to_string(),
            error: err,
        }
    }
}

/// Every finding of one validation run, in rule order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &PolicySpecError> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
            .map(|d| &d.error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &PolicySpecError> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &PolicySpecError> {
        self.with_severity(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// No errors; warnings allowed
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Inspects a [`PolicySpec`] and reports zero or more findings
pub trait ValidationRule: Send + Sync {
    /// Stable identifier, e.g. `"stoplist_entries"`
    fn name(&self) -> &str;

    fn validate(&self, spec: &PolicySpec) -> Vec<ValidationDiagnostic>;
}

pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Engine with every built-in rule
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(AlphabetNotEmptyRule));
        engine.add_rule(Box::new(AlphabetDigitOverlapRule));
        engine.add_rule(Box::new(ForbiddenCategoriesRule));
        engine.add_rule(Box::new(StoplistEntriesRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(&self, spec: &PolicySpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── 1. The alphabet must contain at least one letter ──────────────────────

struct AlphabetNotEmptyRule;

impl ValidationRule for AlphabetNotEmptyRule {
    fn name(&self) -> &str {
        "alphabet_not_empty"
    }

    fn validate(&self, spec: &PolicySpec) -> Vec<ValidationDiagnostic> {
        if spec.alphabet.chars().all(char::is_whitespace) {
            vec![ValidationDiagnostic::error(
                self.name(),
                PolicySpecError::new(
                    ErrorCode::EmptyAlphabet,
                    "/alphabet",
                    "permitted alphabet is empty; every token would be dropped",
                )
                .with_hint("List the permitted letters, e.g. \"اآبپت...\""),
            )]
        } else {
            vec![]
        }
    }
}

// ─── 2. Digits can never be permitted letters ──────────────────────────────

struct AlphabetDigitOverlapRule;

impl ValidationRule for AlphabetDigitOverlapRule {
    fn name(&self) -> &str {
        "alphabet_digit_overlap"
    }

    fn validate(&self, spec: &PolicySpec) -> Vec<ValidationDiagnostic> {
        let digits: FxHashSet<char> = spec
            .digits
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let mut seen = FxHashSet::default();
        spec.alphabet
            .chars()
            .filter(|c| digits.contains(c) || c.is_numeric())
            .filter(|c| seen.insert(*c))
            .map(|c| {
                ValidationDiagnostic::error(
                    self.name(),
                    PolicySpecError::new(
                        ErrorCode::DigitInAlphabet,
                        "/alphabet",
                        format!("digit `{c}` is listed as a permitted letter"),
                    )
                    .with_hint("Remove digits from the alphabet"),
                )
            })
            .collect()
    }
}

// ─── 3. Forbidden categories must be known tags ─────────────────────────────

struct ForbiddenCategoriesRule;

impl ValidationRule for ForbiddenCategoriesRule {
    fn name(&self) -> &str {
        "forbidden_categories_known"
    }

    fn validate(&self, spec: &PolicySpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();

        for (idx, label) in spec.forbidden_categories.iter().enumerate() {
            let path = format!("/forbidden_categories/{idx}");
            match PosTag::from_label(label) {
                None => out.push(ValidationDiagnostic::error(
                    self.name(),
                    PolicySpecError::new(
                        ErrorCode::UnknownCategory,
                        path,
                        format!("unknown grammatical category \"{label}\""),
                    )
                    .with_hint(format!(
                        "Use one of: {}",
                        PosTag::ALL
                            .iter()
                            .map(PosTag::as_label)
                            .collect::<Vec<_>>()
                            .join(", ")
                    )),
                )),
                Some(tag) if !seen.insert(tag) => out.push(ValidationDiagnostic::warning(
                    self.name(),
                    PolicySpecError::new(
                        ErrorCode::DuplicateEntry,
                        path,
                        format!("category \"{label}\" is listed more than once"),
                    ),
                )),
                Some(_) => {}
            }
        }

        out
    }
}

// ─── 4. Stop-list entries must be non-blank and unique ─────────────────────

struct StoplistEntriesRule;

impl ValidationRule for StoplistEntriesRule {
    fn name(&self) -> &str {
        "stoplist_entries"
    }

    fn validate(&self, spec: &PolicySpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();

        for (idx, entry) in spec.stoplist.iter().enumerate() {
            let path = format!("/stoplist/{idx}");
            if entry.trim().is_empty() {
                out.push(ValidationDiagnostic::error(
                    self.name(),
                    PolicySpecError::new(ErrorCode::BlankEntry, path, "stop-list entry is blank")
                        .with_hint("Remove the entry"),
                ));
            } else if !seen.insert(entry.as_str()) {
                out.push(ValidationDiagnostic::warning(
                    self.name(),
                    PolicySpecError::new(
                        ErrorCode::DuplicateEntry,
                        path,
                        format!("stop-list entry \"{entry}\" is listed more than once"),
                    ),
                ));
            }
        }

        out
    }
}

// ─── 5. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &PolicySpec) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<_> = spec.unknown_fields.keys().collect();
        keys.sort();

        keys.into_iter()
            .map(|key| {
                let finding = if spec.strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                finding(
                    self.name(),
                    PolicySpecError::new(
                        ErrorCode::UnknownField,
                        format!("/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("known fields: alphabet, digits, forbidden_categories, stoplist, strict"),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: &str) -> PolicySpec {
        serde_json::from_str(json).unwrap()
    }

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    // ─── Valid specs ────────────────────────────────────────────────────

    #[test]
    fn test_default_spec_is_valid() {
        let report = engine().validate(&PolicySpec::default());
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let report = engine().validate(&spec("{}"));
        assert!(report.is_empty());
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            engine().rule_names(),
            vec![
                "alphabet_not_empty",
                "alphabet_digit_overlap",
                "forbidden_categories_known",
                "stoplist_entries",
                "unknown_fields",
            ]
        );
    }

    // ─── Rule: alphabet_not_empty ───────────────────────────────────────

    #[test]
    fn test_blank_alphabet_fails() {
        let report = engine().validate(&spec(r#"{ "alphabet": "   " }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::EmptyAlphabet);
        assert_eq!(errs[0].path, "/alphabet");
    }

    // ─── Rule: alphabet_digit_overlap ───────────────────────────────────

    #[test]
    fn test_digit_in_alphabet_fails() {
        let report = engine().validate(&spec(r#"{ "alphabet": "ابپ۱1", "digits": "0123456789" }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 2);
        assert!(errs.iter().all(|e| e.code == ErrorCode::DigitInAlphabet));
    }

    #[test]
    fn test_repeated_digit_reported_once() {
        let report = engine().validate(&spec(r#"{ "alphabet": "اب11", "digits": "1" }"#));
        assert_eq!(report.errors().count(), 1);
    }

    // ─── Rule: forbidden_categories_known ───────────────────────────────

    #[test]
    fn test_unknown_category_fails() {
        let report = engine().validate(&spec(r#"{ "forbidden_categories": ["VERB", "VRB"] }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::UnknownCategory);
        assert_eq!(errs[0].path, "/forbidden_categories/1");
        assert!(errs[0].hint.as_deref().unwrap().contains("PUNCT"));
    }

    #[test]
    fn test_duplicate_category_warns() {
        let report = engine().validate(&spec(r#"{ "forbidden_categories": ["VERB", "verb"] }"#));
        assert!(report.is_valid());
        let warns: Vec<_> = report.warnings().collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].code, ErrorCode::DuplicateEntry);
    }

    // ─── Rule: stoplist_entries ─────────────────────────────────────────

    #[test]
    fn test_blank_stoplist_entry_fails() {
        let report = engine().validate(&spec(r#"{ "stoplist": ["هدف", " "] }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::BlankEntry);
        assert_eq!(errs[0].path, "/stoplist/1");
    }

    #[test]
    fn test_duplicate_stoplist_entry_warns() {
        let report = engine().validate(&spec(r#"{ "stoplist": ["هدف", "هدف"] }"#));
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    // ─── Rule: unknown_fields ───────────────────────────────────────────

    #[test]
    fn test_unknown_field_non_strict_warns() {
        let report = engine().validate(&spec(r#"{ "alphabett": "اب" }"#));
        assert!(report.is_valid());
        let warns: Vec<_> = report.warnings().collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].code, ErrorCode::UnknownField);
        assert_eq!(warns[0].path, "/alphabett");
    }

    #[test]
    fn test_unknown_field_strict_fails() {
        let report = engine().validate(&spec(r#"{ "alphabett": "اب", "strict": true }"#));
        assert!(report.has_errors());
    }

    // ─── Engine behaviour ───────────────────────────────────────────────

    #[test]
    fn test_collects_all_findings() {
        let report = engine().validate(&spec(
            r#"{
                "alphabet": "",
                "forbidden_categories": ["NOPE"],
                "stoplist": [""],
                "extra": 1,
                "strict": true
            }"#,
        ));
        assert_eq!(report.errors().count(), 4);
    }

    #[test]
    fn test_report_serializes() {
        let report = engine().validate(&spec(r#"{ "stoplist": [""] }"#));
        let json = serde_json::to_value(&report).unwrap();
        let diag = &json["diagnostics"][0];
        assert_eq!(diag["severity"], "error");
        assert_eq!(diag["rule"], "stoplist_entries");
        assert_eq!(diag["code"], "blank_entry");
        assert_eq!(diag["path"], "/stoplist/0");
    }

    #[test]
    fn test_custom_rule() {
        struct NoStrict;

        impl ValidationRule for NoStrict {
            fn name(&self) -> &str {
                "no_strict"
            }

            fn validate(&self, spec: &PolicySpec) -> Vec<ValidationDiagnostic> {
                if spec.strict {
                    vec![ValidationDiagnostic::warning(
                        self.name(),
                        PolicySpecError::new(ErrorCode::UnknownField, "/strict", "strict mode"),
                    )]
                } else {
                    vec![]
                }
            }
        }

        let mut engine = ValidationEngine::new();
        engine.add_rule(Box::new(NoStrict));
        let report = engine.validate(&spec(r#"{ "strict": true }"#));
        assert_eq!(report.len(), 1);
        assert!(report.is_valid());
    }
}
