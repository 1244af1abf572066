//! ESLint suppression directive parsing and formatting.
//!
//! Recognised forms (comment delimiters already stripped):
//! - `eslint-disable-next-line rule-a, rule-b -- explanation`
//! - `eslint-disable-line rule-a -- explanation`
//!
//! `eslint-disable` / `eslint-enable` ranges are not directives in this sense
//! and decode to `None`.

use regex::Regex;
use std::sync::LazyLock;

use crate::core::tree::CommentKind;

static DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*(eslint-disable-next-line|eslint-disable-line)(?:\s|$)(.*)").unwrap()
});

/// Separator between the rule list and the explanation.
const EXPLANATION_SEPARATOR: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveForm {
    /// `eslint-disable-next-line`, placed on the line before the violation.
    NextLine,
    /// `eslint-disable-line`, placed on the violating line itself.
    SameLine,
}

impl DirectiveForm {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::NextLine => "eslint-disable-next-line",
            Self::SameLine => "eslint-disable-line",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "eslint-disable-next-line" => Some(Self::NextLine),
            "eslint-disable-line" => Some(Self::SameLine),
            _ => None,
        }
    }
}

/// Decoded form of a suppression comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionDirective {
    pub form: DirectiveForm,
    /// Insertion-ordered, duplicate-free. Empty means "every rule".
    rules: Vec<String>,
    pub explanation: Option<String>,
}

impl SuppressionDirective {
    pub fn new(form: DirectiveForm, rule: impl Into<String>, explanation: Option<String>) -> Self {
        Self {
            form,
            rules: vec![rule.into()],
            explanation,
        }
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Whether `rule` is covered. A directive without rules covers all of them.
    pub fn suppresses(&self, rule: &str) -> bool {
        self.rules.is_empty() || self.rules.iter().any(|r| r == rule)
    }

    /// Append `rule` unless already covered. Returns true if the rule list changed.
    pub fn add_rule(&mut self, rule: &str) -> bool {
        if self.suppresses(rule) {
            return false;
        }
        self.rules.push(rule.to_string());
        true
    }

    /// Decode a comment body.
    ///
    /// # Returns
    /// - `Some(SuppressionDirective)` if the body starts with a supported keyword
    /// - `None` otherwise
    pub fn parse(text: &str) -> Option<Self> {
        let captures = DIRECTIVE_REGEX.captures(text)?;
        let form = DirectiveForm::from_keyword(captures.get(1)?.as_str())?;
        let rest = captures.get(2).map_or("", |m| m.as_str());

        let (rule_list, explanation) = match rest.split_once(EXPLANATION_SEPARATOR) {
            Some((rules, explanation)) => (rules, Some(explanation.trim())),
            None => (rest, None),
        };

        let mut rules: Vec<String> = Vec::new();
        for rule in rule_list.split(',').map(str::trim).filter(|r| !r.is_empty()) {
            if !rules.iter().any(|r| r == rule) {
                rules.push(rule.to_string());
            }
        }

        Some(Self {
            form,
            rules,
            explanation: explanation
                .filter(|e| !e.is_empty())
                .map(ToString::to_string),
        })
    }

    /// Encode as a comment body for a comment of `kind`.
    ///
    /// Block comments get a trailing space so they render as `/* ... */`.
    pub fn encode(&self, kind: CommentKind) -> String {
        let mut text = format!(" {}", self.form.keyword());
        if !self.rules.is_empty() {
            text.push(' ');
            text.push_str(&self.rules.join(", "));
        }
        if let Some(explanation) = &self.explanation {
            text.push_str(&format!(" {} {}", EXPLANATION_SEPARATOR, explanation));
        }
        if kind == CommentKind::Block {
            text.push(' ');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_next_line() {
        let directive = SuppressionDirective::parse(" eslint-disable-next-line eqeqeq").unwrap();
        assert_eq!(directive.form, DirectiveForm::NextLine);
        assert_eq!(directive.rules(), &["eqeqeq".to_string()]);
        assert_eq!(directive.explanation, None);
    }

    #[test]
    fn test_parse_same_line_with_explanation() {
        let directive =
            SuppressionDirective::parse(" eslint-disable-line eqeqeq, no-undef -- for reasons")
                .unwrap();
        assert_eq!(directive.form, DirectiveForm::SameLine);
        assert_eq!(
            directive.rules(),
            &["eqeqeq".to_string(), "no-undef".to_string()]
        );
        assert_eq!(directive.explanation.as_deref(), Some("for reasons"));
    }

    #[test]
    fn test_parse_block_comment_body() {
        let directive =
            SuppressionDirective::parse(" eslint-disable-next-line eqeqeq -- why not ").unwrap();
        assert_eq!(directive.rules(), &["eqeqeq".to_string()]);
        assert_eq!(directive.explanation.as_deref(), Some("why not"));
    }

    #[test]
    fn test_parse_collapses_duplicates() {
        let directive =
            SuppressionDirective::parse("eslint-disable-line a, b, a,  , b").unwrap();
        assert_eq!(directive.rules(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_parse_explanation_keeps_later_separators() {
        let directive =
            SuppressionDirective::parse("eslint-disable-line a -- see -- the docs").unwrap();
        assert_eq!(directive.explanation.as_deref(), Some("see -- the docs"));
    }

    #[test]
    fn test_parse_without_rules_covers_everything() {
        let directive = SuppressionDirective::parse(" eslint-disable-next-line").unwrap();
        assert!(directive.rules().is_empty());
        assert!(directive.suppresses("anything"));
    }

    #[test]
    fn test_parse_rejects_other_comments() {
        assert!(SuppressionDirective::parse(" just a comment").is_none());
        assert!(SuppressionDirective::parse(" eslint-disable eqeqeq").is_none());
        assert!(SuppressionDirective::parse(" eslint-enable").is_none());
        assert!(SuppressionDirective::parse(" eslint-disable-next-lines eqeqeq").is_none());
        assert!(SuppressionDirective::parse("TODO eslint-disable-line eqeqeq").is_none());
    }

    #[test]
    fn test_encode_line() {
        let directive = SuppressionDirective::new(
            DirectiveForm::NextLine,
            "eqeqeq",
            Some("TODO: Fix this the next time the file is edited.".to_string()),
        );
        assert_snapshot!(
            format!("//{}", directive.encode(CommentKind::Line)),
            @"// eslint-disable-next-line eqeqeq -- TODO: Fix this the next time the file is edited."
        );
    }

    #[test]
    fn test_encode_block_adds_trailing_space() {
        let directive = SuppressionDirective::new(DirectiveForm::SameLine, "eqeqeq", None);
        assert_eq!(
            directive.encode(CommentKind::Block),
            " eslint-disable-line eqeqeq "
        );
    }

    #[test]
    fn test_add_rule() {
        let mut directive = SuppressionDirective::new(DirectiveForm::NextLine, "a", None);
        assert!(directive.add_rule("b"));
        assert!(!directive.add_rule("a"));
        assert_eq!(directive.rules(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_decode_encode_round_trip() {
        let mut directive = SuppressionDirective::new(
            DirectiveForm::SameLine,
            "import/prefer-default-export",
            Some("legacy module".to_string()),
        );
        directive.add_rule("no-undef");

        for kind in [CommentKind::Line, CommentKind::Block] {
            let decoded = SuppressionDirective::parse(&directive.encode(kind)).unwrap();
            assert_eq!(decoded, directive);
        }
    }
}
