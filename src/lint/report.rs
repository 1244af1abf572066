use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{LintResults, Linter, result_key};
use crate::core::diagnostic::Diagnostic;

/// One entry of ESLint's JSON formatter output.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EslintFileResult {
    pub file_path: String,
    #[serde(default)]
    pub messages: Vec<Diagnostic>,
}

/// Parse an ESLint JSON report. Relative file paths resolve against `base_dir`.
pub fn parse_report(json: &str, base_dir: &Path) -> Result<LintResults> {
    let results: Vec<EslintFileResult> =
        serde_json::from_str(json).context("Failed to parse ESLint JSON output")?;

    let mut lint_results = LintResults::new();
    for result in results {
        let path = base_dir.join(&result.file_path);
        lint_results
            .entry(result_key(&path.to_string_lossy()))
            .or_default()
            .extend(result.messages);
    }
    Ok(lint_results)
}

/// Diagnostics read from a saved `eslint --format json` report.
#[derive(Debug, Clone)]
pub struct EslintReport {
    path: PathBuf,
}

impl EslintReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Linter for EslintReport {
    fn lint(&self, _files: &[String]) -> Result<LintResults> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read ESLint report {}", self.path.display()))?;
        let base_dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        parse_report(&json, base_dir)
    }
}
