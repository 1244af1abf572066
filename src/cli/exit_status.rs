use std::process::ExitCode;

/// Process exit status.
///
/// A dry run that found work exits with `Failure` so CI can tell that a
/// `--apply` would change files.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Nothing left to suppress, or the changes were written.
    Success,
    /// Dry run with pending changes, or `init` over an existing config.
    Failure,
    /// Linter failure, unreadable or unparseable files, bad configuration.
    Error,
}

impl ExitStatus {
    pub fn for_suppress(has_errors: bool, pending_changes: bool, apply: bool) -> Self {
        if has_errors {
            Self::Error
        } else if pending_changes && !apply {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
