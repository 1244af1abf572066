use std::{fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<ExitStatus> {
    if !write_default_config(Path::new("."))? {
        eprintln!(
            "{} {} already exists",
            "error:".bold().red(),
            CONFIG_FILE_NAME
        );
        return Ok(ExitStatus::Failure);
    }

    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
    Ok(ExitStatus::Success)
}

/// Write the default config into `dir`. Returns false if one already exists.
fn write_default_config(dir: &Path) -> Result<bool> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        return Ok(false);
    }

    let mut content = default_config_json()?;
    content.push('\n');
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(true)
}
