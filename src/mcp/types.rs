use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{
    Diagnostic, SkippedDiagnostic,
    diagnostic::ERROR_SEVERITY,
};

// ============================================================
// Config Types (get_config)
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project; the config file is searched upwards from here
    pub project_root_path: String,
}

/// Configuration DTO for MCP
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub message: String,
    pub rules: Vec<String>,
    pub inline: bool,
    pub base_config: Option<String>,
    pub ignores: Vec<String>,
    pub use_ignore_files: bool,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            message: c.message,
            rules: c.rules,
            inline: c.inline,
            base_config: c.base_config,
            ignores: c.ignores,
            use_ignore_files: c.use_ignore_files,
        }
    }
}

// ============================================================
// Suppress Types (suppress_source)
// ============================================================

/// One lint error to suppress
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticInput {
    /// 1-based line the linter reported
    pub line: usize,
    /// Rule id, e.g. "eqeqeq" or "react/jsx-key"
    pub rule_id: String,
    /// ESLint severity; only 2 (error) is suppressed. Defaults to 2
    pub severity: Option<u8>,
}

impl From<DiagnosticInput> for Diagnostic {
    fn from(input: DiagnosticInput) -> Self {
        Diagnostic::new(
            input.line,
            input.rule_id,
            input.severity.unwrap_or(ERROR_SEVERITY),
        )
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuppressSourceParams {
    /// Full text of the file to annotate
    pub source: String,
    /// File name; the extension selects the dialect (.js, .jsx, .ts, .tsx)
    pub file_path: String,
    pub diagnostics: Vec<DiagnosticInput>,
    /// Explanation for new directives (default: config value)
    pub message: Option<String>,
    /// Only suppress these rules (default: config value, empty means all)
    pub rules: Option<Vec<String>>,
    /// Use eslint-disable-line comments (default: config value)
    pub inline: Option<bool>,
    /// Project whose .hushlintrc.json supplies the defaults
    pub project_root_path: Option<String>,
}

/// Result of suppress_source
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuppressSourceResult {
    /// True if at least one directive was inserted or updated
    pub changed: bool,
    /// Annotated text, or the input unchanged
    pub source: String,
    pub inserted: usize,
    pub merged: usize,
    pub already_suppressed: usize,
    pub skipped: Vec<SkippedItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkippedItem {
    pub line: usize,
    pub rule_id: String,
    pub reason: String,
}

impl From<&SkippedDiagnostic> for SkippedItem {
    fn from(skipped: &SkippedDiagnostic) -> Self {
        Self {
            line: skipped.line,
            rule_id: skipped.rule_id.clone(),
            reason: skipped.reason.description().to_string(),
        }
    }
}
