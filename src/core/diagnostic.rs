use serde::{Deserialize, Serialize};

/// ESLint severity for errors. Warnings (1) and "off" (0) are never suppressed.
pub const ERROR_SEVERITY: u8 = 2;

/// One reported violation, in the shape ESLint's JSON formatter emits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// 1-based line. Missing for some fatal messages.
    #[serde(default)]
    pub line: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// `None` for parse errors and other fatal messages.
    pub rule_id: Option<String>,
    pub severity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Diagnostic {
    pub fn new(line: usize, rule_id: impl Into<String>, severity: u8) -> Self {
        Self {
            line,
            column: None,
            rule_id: Some(rule_id.into()),
            severity,
            message: None,
        }
    }

    /// Rule id of an error-level diagnostic, `None` for anything that must
    /// not be suppressed.
    pub fn actionable_rule(&self) -> Option<&str> {
        if self.severity < ERROR_SEVERITY {
            return None;
        }
        self.rule_id.as_deref().filter(|r| !r.is_empty())
    }
}
