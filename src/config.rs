use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use ignore::overrides::OverrideBuilder;
use serde::{Deserialize, Serialize};

use crate::core::annotate::{AnnotateOptions, DEFAULT_MESSAGE};
use crate::core::files::add_exclusion;

pub const CONFIG_FILE_NAME: &str = ".hushlintrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Explanation written after `--` in every new directive.
    #[serde(default = "default_message")]
    pub message: String,
    /// Rule whitelist. Empty means every rule.
    #[serde(default)]
    pub rules: Vec<String>,
    /// Write `eslint-disable-line` comments after the code.
    #[serde(default)]
    pub inline: bool,
    /// ESLint config file passed to the linter with `--config`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_config: Option<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Honour `.eslintignore`, or `.gitignore` when there is none.
    #[serde(default = "default_use_ignore_files")]
    pub use_ignore_files: bool,
}

fn default_message() -> String {
    DEFAULT_MESSAGE.to_string()
}

fn default_use_ignore_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            message: default_message(),
            rules: Vec::new(),
            inline: false,
            base_config: None,
            ignores: Vec::new(),
            use_ignore_files: default_use_ignore_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores`, or a message
    /// or rule name that cannot be written into a directive comment.
    pub fn validate(&self) -> Result<()> {
        let mut overrides = OverrideBuilder::new(".");
        for pattern in &self.ignores {
            add_exclusion(&mut overrides, pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        validate_message(&self.message)?;

        for rule in &self.rules {
            if rule.is_empty() || rule.contains(|c: char| c == ',' || c.is_whitespace()) {
                bail!("Invalid rule name in 'rules': \"{}\"", rule);
            }
        }

        Ok(())
    }

    pub fn annotate_options(&self) -> AnnotateOptions {
        AnnotateOptions {
            message: self.message.clone(),
            rules: self.rules.clone(),
            inline: self.inline,
        }
    }
}

/// A message must fit on one line and inside a `/* */` comment.
pub fn validate_message(message: &str) -> Result<()> {
    if message.contains('\n') || message.contains('\r') {
        bail!("Invalid 'message': must be a single line");
    }
    if message.contains("*/") {
        bail!("Invalid 'message': must not contain \"*/\"");
    }
    Ok(())
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
