use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta::Settings;
use insta_cmd::get_cargo_bin;
use serde_json::{Value, json};
use tempfile::TempDir;

mod init;
mod suppress;

const BIN_NAME: &str = "hushlint";

pub const TODO: &str = "TODO: Fix this the next time the file is edited.";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops the config search from escaping the fixture.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Write `eslint.json` in ESLint's JSON formatter shape.
    ///
    /// Each entry is `(file, line, rule id)`, all with error severity.
    pub fn write_report(&self, errors: &[(&str, usize, &str)]) -> Result<()> {
        let mut files: Vec<(&str, Vec<Value>)> = Vec::new();
        for &(file, line, rule) in errors {
            let message = json!({
                "ruleId": rule,
                "severity": 2,
                "line": line,
                "column": 1,
                "message": format!("{rule} violation"),
            });
            match files.iter_mut().find(|(f, _)| *f == file) {
                Some((_, messages)) => messages.push(message),
                None => files.push((file, vec![message])),
            }
        }
        let report: Vec<Value> = files
            .into_iter()
            .map(|(file, messages)| json!({ "filePath": file, "messages": messages }))
            .collect();
        self.write_file("eslint.json", &serde_json::to_string_pretty(&report)?)
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    /// Snapshot settings that print the fixture directory as `[TEMP]`.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::clone_current();
        settings.add_filter(&regex::escape(&self.project_dir.to_string_lossy()), "[TEMP]");
        settings
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    /// `hushlint suppress --report eslint.json`
    pub fn suppress_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.args(["suppress", "--report", "eslint.json"]);
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
