//! Source file discovery.
//!
//! Walks the requested paths for JavaScript and TypeScript sources, skipping
//! `node_modules`, the patterns from the config's `ignores`, and (unless
//! disabled) the entries of the project's `.eslintignore` or `.gitignore`.
//! Ignore files are matched with gitignore semantics.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use colored::Colorize;
use ignore::{
    WalkBuilder,
    gitignore::{Gitignore, GitignoreBuilder},
    overrides::{Override, OverrideBuilder},
};

/// Ignore files consulted in order; only the first one found is used.
pub const IGNORE_FILES: &[&str] = &[".eslintignore", ".gitignore"];

/// Directories never descended into.
const ALWAYS_SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sorted, de-duplicated file paths.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

pub fn is_source_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" | "mts" | "cts")
    )
}

/// Add one `ignores` glob to `builder` as an exclusion.
///
/// Override globs whitelist what they match; the `!` prefix makes them
/// exclude it instead.
pub fn add_exclusion(builder: &mut OverrideBuilder, pattern: &str) -> Result<(), ignore::Error> {
    builder.add(&format!("!{pattern}")).map(|_| ())
}

/// Load the first ignore file present in `base_dir`.
///
/// Negated entries (`!pattern`) are not supported; a file containing any is
/// reported and skipped entirely.
pub fn load_ignore_file(base_dir: &Path) -> Option<Gitignore> {
    for name in IGNORE_FILES {
        let path = base_dir.join(name);
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        if content.lines().any(|line| line.starts_with('!')) {
            eprintln!(
                "{} your {} contains negated entries, which are not supported; ignoring it",
                "warning:".bold().yellow(),
                name
            );
            return None;
        }

        let mut builder = GitignoreBuilder::new(base_dir);
        if let Some(error) = builder.add(&path) {
            eprintln!(
                "{} skipping invalid entries in {}: {}",
                "warning:".bold().yellow(),
                name,
                error
            );
        }
        return builder.build().ok();
    }
    None
}

/// Everything a scan leaves out. Matching happens on paths relative to the
/// project root.
struct Exclusions {
    base_dir: PathBuf,
    overrides: Override,
    ignore_file: Option<Gitignore>,
}

impl Exclusions {
    fn excludes(&self, path: &Path, is_dir: bool) -> bool {
        if is_dir
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| ALWAYS_SKIPPED_DIRS.contains(&name))
        {
            return true;
        }

        let Ok(relative) = path.strip_prefix(&self.base_dir) else {
            return false;
        };
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.overrides.matched(relative, is_dir).is_ignore()
            || self
                .ignore_file
                .as_ref()
                .is_some_and(|g| g.matched_path_or_any_parents(relative, is_dir).is_ignore())
    }
}

/// Collect source files under `paths` (relative to `base_dir`).
pub fn scan_files(
    base_dir: &Path,
    paths: &[String],
    ignores: &[String],
    use_ignore_files: bool,
    verbose: bool,
) -> ScanResult {
    let mut files: Vec<String> = Vec::new();
    let mut skipped_count = 0;

    let mut override_builder = OverrideBuilder::new(base_dir);
    for pattern in ignores {
        if let Err(e) = add_exclusion(&mut override_builder, pattern)
            && verbose
        {
            eprintln!(
                "{} Invalid ignore pattern '{}': {}",
                "warning:".bold().yellow(),
                pattern,
                e
            );
        }
    }
    let exclusions = Arc::new(Exclusions {
        base_dir: base_dir.to_path_buf(),
        overrides: override_builder.build().unwrap_or_else(|_| Override::empty()),
        ignore_file: if use_ignore_files {
            load_ignore_file(base_dir)
        } else {
            None
        },
    });

    let roots: Vec<PathBuf> = if paths.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        paths.iter().map(|p| base_dir.join(p)).collect()
    };

    for root in roots {
        if !root.exists() {
            skipped_count += 1;
            if verbose {
                eprintln!(
                    "{} Path does not exist: {}",
                    "warning:".bold().yellow(),
                    root.display()
                );
            }
            continue;
        }

        let mut builder = WalkBuilder::new(&root);
        builder.standard_filters(false);
        let filter = Arc::clone(&exclusions);
        builder.filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            entry.depth() == 0 || !filter.excludes(entry.path(), is_dir)
        });

        for entry in builder.build() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            if is_file && is_source_file(path) && !exclusions.excludes(path, false) {
                files.push(path.to_string_lossy().into_owned());
            }
        }
    }

    files.sort();
    files.dedup();
    ScanResult {
        files,
        skipped_count,
    }
}
