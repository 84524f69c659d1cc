//! Token filter
//!
//! A token survives only if every [`TokenRule`] accepts it. Rules are
//! side-effect free and run in registration order; [`TokenFilter::keep`]
//! stops at the first rejection.

use crate::policy::FilterPolicy;
use crate::types::Token;

/// Characters that mark a token as a sentence-level exclamation or question
pub const SENTENCE_MARKS: [char; 2] = ['!', '?'];

/// A named keep/drop predicate over a tagged token
pub trait TokenRule: Send + Sync {
    /// Short, stable identifier (e.g., `"permitted_alphabet"`)
    fn name(&self) -> &'static str;

    fn accepts(&self, token: &Token, policy: &FilterPolicy) -> bool;
}

/// Rejects tokens whose category is forbidden by the policy
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowedCategoryRule;

impl TokenRule for AllowedCategoryRule {
    fn name(&self) -> &'static str {
        "allowed_category"
    }

    fn accepts(&self, token: &Token, policy: &FilterPolicy) -> bool {
        !policy.is_forbidden(token.pos)
    }
}

/// Rejects tokens containing `!` or `?`
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSentenceMarksRule;

impl TokenRule for NoSentenceMarksRule {
    fn name(&self) -> &'static str {
        "no_sentence_marks"
    }

    fn accepts(&self, token: &Token, _policy: &FilterPolicy) -> bool {
        !token.surface.contains(SENTENCE_MARKS)
    }
}

/// Rejects empty tokens and tokens with any character outside the alphabet
#[derive(Debug, Clone, Copy, Default)]
pub struct PermittedAlphabetRule;

impl TokenRule for PermittedAlphabetRule {
    fn name(&self) -> &'static str {
        "permitted_alphabet"
    }

    fn accepts(&self, token: &Token, policy: &FilterPolicy) -> bool {
        !token.surface.is_empty()
            && token
                .surface
                .chars()
                .all(|c| policy.is_permitted(c) && !policy.is_digit(c))
    }
}

/// Rejects boilerplate surface forms
#[derive(Debug, Clone, Copy, Default)]
pub struct NotStoplistedRule;

impl TokenRule for NotStoplistedRule {
    fn name(&self) -> &'static str {
        "not_stoplisted"
    }

    fn accepts(&self, token: &Token, policy: &FilterPolicy) -> bool {
        !policy.is_stopword(&token.surface)
    }
}

/// Ordered list of [`TokenRule`]s over one [`FilterPolicy`]
pub struct TokenFilter {
    policy: FilterPolicy,
    rules: Vec<Box<dyn TokenRule>>,
}

impl std::fmt::Debug for TokenFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenFilter")
            .field("policy", &self.policy)
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl Default for TokenFilter {
    fn default() -> Self {
        Self::new(FilterPolicy::persian())
    }
}

impl TokenFilter {
    /// Filter with the default rule set:
    /// `allowed_category`, `no_sentence_marks`, `permitted_alphabet`,
    /// `not_stoplisted`.
    pub fn new(policy: FilterPolicy) -> Self {
        let mut filter = Self::empty(policy);
        filter.add_rule(Box::new(AllowedCategoryRule));
        filter.add_rule(Box::new(NoSentenceMarksRule));
        filter.add_rule(Box::new(PermittedAlphabetRule));
        filter.add_rule(Box::new(NotStoplistedRule));
        filter
    }

    /// Filter without rules (keeps everything)
    pub fn empty(policy: FilterPolicy) -> Self {
        Self {
            policy,
            rules: Vec::new(),
        }
    }

    pub fn add_rule(&mut self, rule: Box<dyn TokenRule>) {
        self.rules.push(rule);
    }

    pub fn policy(&self) -> &FilterPolicy {
        &self.policy
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn keep(&self, token: &Token) -> bool {
        self.first_rejection(token).is_none()
    }

    /// Name of the first rule that rejects `token`, if any
    pub fn first_rejection(&self, token: &Token) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| !rule.accepts(token, &self.policy))
            .map(|rule| rule.name())
    }

    /// Names of every rule that rejects `token`
    pub fn rejections(&self, token: &Token) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| !rule.accepts(token, &self.policy))
            .map(|rule| rule.name())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PosTag;

    fn noun(surface: &str) -> Token {
        Token::new(surface, PosTag::Noun)
    }

    #[test]
    fn test_keeps_plain_noun() {
        let filter = TokenFilter::default();
        assert!(filter.keep(&noun("شبکه")));
        assert!(filter.keep(&Token::new("بزرگ", PosTag::Adjective)));
        assert!(filter.keep(&noun("آموزش")));
    }

    #[test]
    fn test_rejects_forbidden_categories() {
        let filter = TokenFilter::default();
        for pos in [
            PosTag::Punctuation,
            PosTag::CoordinatingConjunction,
            PosTag::Verb,
            PosTag::Adposition,
            PosTag::SubordinatingConjunction,
            PosTag::Determiner,
            PosTag::Numeral,
            PosTag::Pronoun,
        ] {
            let token = Token::new("شبکه", pos);
            assert_eq!(filter.first_rejection(&token), Some("allowed_category"));
        }
    }

    #[test]
    fn test_ezafe_does_not_change_category() {
        let filter = TokenFilter::default();
        let token = Token::new("دو", PosTag::Numeral).with_ezafe(true);
        assert!(!filter.keep(&token));
        assert!(filter.keep(&noun("رابطه").with_ezafe(true)));
    }

    #[test]
    fn test_rejects_sentence_marks() {
        let filter = TokenFilter::default();
        assert_eq!(
            filter.first_rejection(&noun("چرا?")),
            Some("no_sentence_marks")
        );
        assert!(filter
            .rejections(&noun("!"))
            .contains(&"no_sentence_marks"));
    }

    #[test]
    fn test_rejects_characters_outside_alphabet() {
        let filter = TokenFilter::default();
        for surface in ["model", "مدلA", "۱۴۰۲", "12", "كتاب", "می\u{200C}شود", "ء", ""] {
            assert_eq!(
                filter.first_rejection(&noun(surface)),
                Some("permitted_alphabet"),
                "{surface:?}"
            );
        }
    }

    #[test]
    fn test_rejects_stoplisted_words() {
        let filter = TokenFilter::default();
        for surface in ["هدف", "پژوهش", "بررسی", "حاضر"] {
            assert_eq!(filter.first_rejection(&noun(surface)), Some("not_stoplisted"));
        }
        // brackets fail the alphabet rule first but are stop-listed as well
        assert!(filter.rejections(&noun("(")).contains(&"not_stoplisted"));
    }

    #[test]
    fn test_rules_are_independent() {
        let filter = TokenFilter::default();
        let token = Token::new("هدف!", PosTag::Verb);
        assert_eq!(
            filter.rejections(&token),
            vec!["allowed_category", "no_sentence_marks", "permitted_alphabet"]
        );
    }

    #[test]
    fn test_keep_matches_rejections() {
        let filter = TokenFilter::default();
        let tokens = [
            noun("شبکه"),
            noun("هدف"),
            Token::new("است", PosTag::Verb),
            noun("x"),
        ];
        for token in &tokens {
            assert_eq!(filter.keep(token), filter.rejections(token).is_empty());
        }
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = TokenFilter::empty(FilterPolicy::persian());
        assert!(filter.keep(&Token::new("!", PosTag::Punctuation)));
        assert!(filter.rule_names().is_empty());
    }

    #[test]
    fn test_custom_rule() {
        struct MinLength;

        impl TokenRule for MinLength {
            fn name(&self) -> &'static str {
                "min_length"
            }

            fn accepts(&self, token: &Token, _policy: &FilterPolicy) -> bool {
                token.surface.chars().count() > 1
            }
        }

        let mut filter = TokenFilter::default();
        filter.add_rule(Box::new(MinLength));
        assert_eq!(filter.first_rejection(&noun("ب")), Some("min_length"));
        assert!(filter.keep(&noun("باب")));
    }
}
