//! Diagnostic sources.
//!
//! The annotator only needs `(file, line, rule id, severity)` tuples. They
//! come either from running the project's ESLint or from a JSON report saved
//! earlier with `eslint --format json`.

mod eslint;
mod report;

use std::{collections::HashMap, fs};

use anyhow::Result;
use enum_dispatch::enum_dispatch;

use crate::core::diagnostic::Diagnostic;

pub use eslint::EslintCli;
pub use report::{EslintFileResult, EslintReport, parse_report};

/// Diagnostics per file, keyed by [`result_key`].
pub type LintResults = HashMap<String, Vec<Diagnostic>>;

/// Canonical form of `path` used to match linter output to scanned files.
pub fn result_key(path: &str) -> String {
    fs::canonicalize(path)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[enum_dispatch]
pub trait Linter {
    /// Lint `files`, returning the diagnostics of each.
    fn lint(&self, files: &[String]) -> Result<LintResults>;
}

#[enum_dispatch(Linter)]
#[derive(Debug, Clone)]
pub enum DiagnosticSource {
    EslintCli(EslintCli),
    EslintReport(EslintReport),
}
