//! Per-file driver: parse, annotate, print.
//!
//! Files are independent, so the batch entry point fans out over `rayon`;
//! each worker owns the tree it builds.

use std::fs;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::core::annotate::{AnnotateOptions, AnnotationSummary, Annotator};
use crate::core::diagnostic::Diagnostic;
use crate::core::parsers::parse_source;
use crate::core::printer::print;
use crate::lint::{LintResults, result_key};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// At least one directive was inserted or merged.
    Changed(String),
    Unchanged,
}

impl FileOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

/// Annotate one source text.
///
/// Returns `Unchanged` without parsing when no diagnostic is actionable.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn annotate_source(
    source: &str,
    file_path: &str,
    diagnostics: &[Diagnostic],
    options: &AnnotateOptions,
) -> Result<(FileOutcome, AnnotationSummary)> {
    let has_work = diagnostics
        .iter()
        .filter_map(Diagnostic::actionable_rule)
        .any(|rule| options.allows(rule));
    if !has_work {
        return Ok((FileOutcome::Unchanged, AnnotationSummary::default()));
    }

    let mut tree = parse_source(source, file_path)?;
    let summary = Annotator::new(options).annotate(&mut tree, diagnostics);
    let outcome = if summary.changed() {
        FileOutcome::Changed(print(&tree, source))
    } else {
        FileOutcome::Unchanged
    };
    Ok((outcome, summary))
}

/// Result for one file of a batch.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: String,
    /// Original text, kept for reporting skipped diagnostics in context.
    pub source: String,
    pub outcome: FileOutcome,
    pub summary: AnnotationSummary,
}

#[derive(Debug, Clone)]
pub struct FileError {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct PipelineResult {
    /// Files that had actionable diagnostics, in input order.
    pub reports: Vec<FileReport>,
    pub parse_errors: Vec<FileError>,
    pub read_errors: Vec<FileError>,
}

impl PipelineResult {
    pub fn changed(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|r| r.outcome.is_changed())
    }
}

enum Processed {
    Report(FileReport),
    ParseError(FileError),
    ReadError(FileError),
    Clean,
}

fn process_file(path: &str, lint: &LintResults, options: &AnnotateOptions) -> Processed {
    let Some(diagnostics) = lint.get(&result_key(path)) else {
        return Processed::Clean;
    };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            return Processed::ReadError(FileError {
                path: path.to_string(),
                error: e.to_string(),
            });
        }
    };

    match annotate_source(&source, path, diagnostics, options) {
        Ok((FileOutcome::Unchanged, summary))
            if summary == AnnotationSummary::default() =>
        {
            Processed::Clean
        }
        Ok((outcome, summary)) => Processed::Report(FileReport {
            path: path.to_string(),
            source,
            outcome,
            summary,
        }),
        Err(e) => Processed::ParseError(FileError {
            path: path.to_string(),
            error: e.to_string(),
        }),
    }
}

/// Annotate `files` in parallel using the diagnostics in `lint`.
pub fn run_pipeline(files: &[String], lint: &LintResults, options: &AnnotateOptions) -> PipelineResult {
    let processed: Vec<Processed> = files
        .par_iter()
        .map(|path| process_file(path, lint, options))
        .collect();

    let mut result = PipelineResult::default();
    for item in processed {
        match item {
            Processed::Report(report) => result.reports.push(report),
            Processed::ParseError(error) => result.parse_errors.push(error),
            Processed::ReadError(error) => result.read_errors.push(error),
            Processed::Clean => {}
        }
    }
    result
}

/// Write every changed file back to disk. Returns the number written.
pub fn write_changes(result: &PipelineResult) -> Result<usize> {
    let mut written = 0;
    for report in result.changed() {
        if let FileOutcome::Changed(text) = &report.outcome {
            fs::write(&report.path, text)
                .with_context(|| format!("Failed to write {}", report.path))?;
            written += 1;
        }
    }
    Ok(written)
}
