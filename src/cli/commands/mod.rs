pub mod init;
pub mod suppress;

use std::path::Path;

use super::report::display_path;
use crate::core::pipeline::PipelineResult;

/// Per-file counts for the summary listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub inserted: usize,
    pub merged: usize,
}

#[derive(Debug, Default)]
pub struct SuppressSummary {
    pub files_checked: usize,
    pub inserted: usize,
    pub merged: usize,
    pub already_suppressed: usize,
    pub is_apply: bool,
    /// Files that changed (or would change), with paths relative to the
    /// working directory.
    pub files: Vec<FileChange>,
}

impl SuppressSummary {
    pub fn new(
        result: &PipelineResult,
        files_checked: usize,
        is_apply: bool,
        base_dir: &Path,
    ) -> Self {
        let mut summary = Self {
            files_checked,
            is_apply,
            ..Default::default()
        };
        for report in &result.reports {
            summary.inserted += report.summary.inserted;
            summary.merged += report.summary.merged;
            summary.already_suppressed += report.summary.already_suppressed;
            if report.outcome.is_changed() {
                summary.files.push(FileChange {
                    path: display_path(&report.path, base_dir),
                    inserted: report.summary.inserted,
                    merged: report.summary.merged,
                });
            }
        }
        summary
    }
}
