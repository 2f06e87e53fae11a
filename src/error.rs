//! Structured error handling and exit codes.

use serde::Serialize;

/// Exit codes for the sizedupe application.
///
/// - 0: Success (completed normally, at least one group matched)
/// - 1: General error (invalid directory, bad configuration, I/O failure)
/// - 2: No groups (completed normally, nothing matched the filter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed and matching groups were found.
    Success = 0,
    /// General error: The run failed.
    GeneralError = 1,
    /// No groups: Scan completed but no group matched the filter.
    NoGroups = 2,
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
            Self::Success => "SD000",
            Self::GeneralError => "SD001",
            Self::NoGroups => "SD002",
        }
    }

    /// Exit code for a completed run that matched `matched_groups` groups.
    #[must_use]
    pub fn for_matches(matched_groups: usize) -> Self {
        if matched_groups == 0 {
            Self::NoGroups
        } else {
            Self::Success
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "SD001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
