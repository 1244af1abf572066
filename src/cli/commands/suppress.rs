//! Suppress command - Insert eslint-disable comments for existing errors.
//!
//! Lints the selected files (or reads a saved ESLint report), then places an
//! `eslint-disable-next-line` directive (or `eslint-disable-line` with
//! `--inline`) for every error, merging into directives that are already
//! there.
//!
//! Use `--apply` to actually write the files (default is dry-run mode).

use std::{env, io};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{
    args::{SuppressArgs, SuppressCommand},
    exit_status::ExitStatus,
    report::{print_file_errors_to, print_summary_to, report_skipped_to},
};
use super::SuppressSummary;
use crate::{
    config::{CONFIG_FILE_NAME, Config, ConfigLoadResult, load_config},
    core::{
        annotate::parse_rule_list,
        files::scan_files,
        pipeline::{run_pipeline, write_changes},
    },
    lint::{DiagnosticSource, EslintCli, EslintReport, Linter},
};

pub fn suppress(cmd: SuppressCommand, verbose: bool) -> Result<ExitStatus> {
    let args = cmd.args;
    let base_dir = env::current_dir().context("Failed to resolve the working directory")?;

    let ConfigLoadResult { config, from_file } = load_config(&base_dir)?;
    if verbose && !from_file {
        eprintln!(
            "{} no {} found, using defaults",
            "note:".bold(),
            CONFIG_FILE_NAME
        );
    }
    let config = apply_overrides(config, &args);
    config.validate()?;

    let scan = scan_files(
        &base_dir,
        &args.paths,
        &config.ignores,
        config.use_ignore_files,
        verbose,
    );

    let mut stdout = io::stdout().lock();
    if scan.files.is_empty() {
        print_summary_to(&SuppressSummary::default(), &mut stdout);
        return Ok(ExitStatus::Success);
    }

    let source: DiagnosticSource = match &args.report {
        Some(path) => EslintReport::new(base_dir.join(path)).into(),
        None => EslintCli::new(&base_dir, config.base_config.clone()).into(),
    };
    if verbose {
        eprintln!("Linting {} file(s)", scan.files.len());
    }
    let lint = source.lint(&scan.files)?;

    let result = run_pipeline(&scan.files, &lint, &config.annotate_options());
    if args.apply {
        write_changes(&result)?;
    }

    let summary = SuppressSummary::new(&result, scan.files.len(), args.apply, &base_dir);
    report_skipped_to(&result.reports, &base_dir, &mut stdout);
    print_summary_to(&summary, &mut stdout);

    let mut stderr = io::stderr().lock();
    print_file_errors_to("read", &result.read_errors, &base_dir, verbose, &mut stderr);
    print_file_errors_to("parsed", &result.parse_errors, &base_dir, verbose, &mut stderr);

    let has_errors = !result.read_errors.is_empty() || !result.parse_errors.is_empty();
    Ok(ExitStatus::for_suppress(
        has_errors,
        !summary.files.is_empty(),
        args.apply,
    ))
}

/// Command-line flags take precedence over the config file.
fn apply_overrides(mut config: Config, args: &SuppressArgs) -> Config {
    if let Some(message) = &args.message {
        config.message = message.clone();
    }
    if let Some(rules) = &args.rules {
        config.rules = parse_rule_list(rules);
    }
    if args.inline {
        config.inline = true;
    }
    if let Some(base_config) = &args.base_config {
        config.base_config = Some(base_config.clone());
    }
    config
}
