//! Report formatting and printing utilities.
//!
//! Skipped diagnostics are shown in cargo style with the offending source
//! line. Everything takes a writer so output can be captured in tests; the
//! command layer passes stdout or stderr.

use std::{
    io::Write,
    path::Path,
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::SuppressSummary;
use crate::core::pipeline::{FileError, FileReport};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const TAB_WIDTH: usize = 4;

/// `path` relative to `base_dir` when it lies below it.
pub fn display_path(path: &str, base_dir: &Path) -> String {
    Path::new(path)
        .strip_prefix(base_dir)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Print the outcome of a suppress run.
pub fn print_summary_to<W: Write>(summary: &SuppressSummary, writer: &mut W) {
    if summary.files.is_empty() {
        let mut msg = format!(
            "Checked {} source {} - nothing to suppress",
            summary.files_checked,
            if summary.files_checked == 1 { "file" } else { "files" }
        );
        if summary.already_suppressed > 0 {
            msg.push_str(&format!(
                " ({} already suppressed)",
                summary.already_suppressed
            ));
        }
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
        return;
    }

    let counts = format!(
        "{} comment(s), {} {} comment(s) in {} file(s)",
        summary.inserted,
        if summary.is_apply { "updated" } else { "update" },
        summary.merged,
        summary.files.len()
    );

    if summary.is_apply {
        let _ = writeln!(writer, "{} {}", "Inserted".green().bold(), counts);
        return;
    }

    let _ = writeln!(writer, "{} {}:", "Would insert".yellow().bold(), counts);
    for file in &summary.files {
        let _ = writeln!(
            writer,
            "  - {}: {} new, {} updated",
            file.path, file.inserted, file.merged
        );
    }
    let _ = writeln!(
        writer,
        "Run with {} to write these comments.",
        "--apply".cyan()
    );
}

/// Print a cargo-style warning for every diagnostic that could not be placed.
pub fn report_skipped_to<W: Write>(reports: &[FileReport], base_dir: &Path, writer: &mut W) {
    let mut total = 0;
    for report in reports {
        if report.summary.skipped.is_empty() {
            continue;
        }
        let lines: Vec<&str> = report.source.lines().collect();
        let path = display_path(&report.path, base_dir);
        let max_line_width = report
            .summary
            .skipped
            .iter()
            .map(|s| s.line.to_string().len())
            .max()
            .unwrap_or(1);

        for skipped in &report.summary.skipped {
            total += 1;
            let _ = writeln!(
                writer,
                "{}: could not suppress \"{}\"  {}",
                "warning".bold().yellow(),
                skipped.rule_id,
                skipped.reason.description().dimmed().cyan()
            );
            let _ = writeln!(writer, "  {} {}:{}", "-->".blue(), path, skipped.line);

            if let Some(source_line) = skipped.line.checked_sub(1).and_then(|i| lines.get(i)) {
                print_source_line(source_line, skipped.line, max_line_width, writer);
            }
            let _ = writeln!(writer);
        }
    }

    if total > 0 {
        let _ = writeln!(
            writer,
            "{} {} diagnostic(s) left unsuppressed",
            FAILURE_MARK.yellow(),
            total
        );
    }
}

fn print_source_line<W: Write>(source_line: &str, line: usize, width: usize, writer: &mut W) {
    let expanded = source_line.replace('\t', &" ".repeat(TAB_WIDTH));
    let content = expanded.trim_start();
    let indent = UnicodeWidthStr::width(&expanded[..expanded.len() - content.len()]);
    let underline = UnicodeWidthStr::width(content.trim_end()).max(1);

    let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = width);
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        expanded.trim_end(),
        width = width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>indent$}{}",
        "",
        "|".blue(),
        "",
        "^".repeat(underline).yellow(),
        width = width,
        indent = indent
    );
}

/// Print files that could not be read or parsed.
///
/// Without `verbose` only a count is shown.
pub fn print_file_errors_to<W: Write>(
    what: &str,
    errors: &[FileError],
    base_dir: &Path,
    verbose: bool,
    writer: &mut W,
) {
    if errors.is_empty() {
        return;
    }
    if verbose {
        for error in errors {
            let _ = writeln!(
                writer,
                "{} {}: {}",
                "error:".bold().red(),
                display_path(&error.path, base_dir),
                error.error
            );
        }
    } else {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be {} (use {} for details)",
            "warning:".bold().yellow(),
            errors.len(),
            what,
            "-v".cyan()
        );
    }
}
