use std::{path::PathBuf, process::Command};

use anyhow::{Context, Result, bail};

use super::{LintResults, Linter, parse_report};

/// Files per ESLint invocation, to stay clear of command-line length limits.
const FILES_PER_RUN: usize = 200;

/// Runs the project's own ESLint through `npx`.
#[derive(Debug, Clone)]
pub struct EslintCli {
    working_dir: PathBuf,
    /// Passed to ESLint as `--config`.
    base_config: Option<String>,
}

impl EslintCli {
    pub fn new(working_dir: impl Into<PathBuf>, base_config: Option<String>) -> Self {
        Self {
            working_dir: working_dir.into(),
            base_config,
        }
    }

    fn command(&self, files: &[String]) -> Command {
        let mut command = Command::new("npx");
        command
            .current_dir(&self.working_dir)
            .args(["--no-install", "eslint", "--format", "json"]);
        if let Some(config) = &self.base_config {
            command.arg("--config").arg(config);
        }
        command.args(files);
        command
    }
}

impl Linter for EslintCli {
    fn lint(&self, files: &[String]) -> Result<LintResults> {
        let mut results = LintResults::new();

        for chunk in files.chunks(FILES_PER_RUN) {
            let output = self
                .command(chunk)
                .output()
                .context("Failed to run eslint via npx; is eslint installed in this project?")?;

            // 0: no problems, 1: problems found, anything else: ESLint itself failed.
            if !matches!(output.status.code(), Some(0 | 1)) {
                bail!(
                    "eslint exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }

            let stdout = String::from_utf8_lossy(&output.stdout);
            results.extend(parse_report(&stdout, &self.working_dir)?);
        }
        Ok(results)
    }
}
