//! Exit codes and their mapping from application errors.

use crate::duplicates::CompareError;

/// Exit codes for the namedupe application.
///
/// - 0: Success (run completed, whether or not duplicates were found)
/// - 1: General error (unreadable directory, failed deletion, closed input)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: the run completed.
    Success = 0,
    /// General error: the run was aborted by a failure.
    GeneralError = 1,
    /// Interrupted: the run was stopped by Ctrl+C.
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "ND000",
            Self::GeneralError => "ND001",
            Self::Interrupted => "ND130",
        }
    }

    /// Pick the exit code for an error returned by [`crate::run_app`].
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        let interrupted = err
            .downcast_ref::<CompareError>()
            .is_some_and(|e| matches!(e, CompareError::Interrupted));
        if interrupted {
            Self::Interrupted
        } else {
            Self::GeneralError
        }
    }
}
