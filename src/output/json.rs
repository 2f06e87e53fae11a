//! JSON report of size groups.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "directory": "/home/user/notes",
//!   "filter": { "at_least": 2 },
//!   "groups": [
//!     { "size": 12, "count": 2, "files": ["/home/user/notes/a.txt", "/home/user/notes/b.txt"] }
//!   ],
//!   "summary": {
//!     "entries_inspected": 4,
//!     "files_scanned": 2,
//!     "skipped_not_regular": 0,
//!     "skipped_below_min_size": 1,
//!     "skipped_pattern_mismatch": 1,
//!     "skipped_vanished": 0,
//!     "size_groups": 1,
//!     "matched_groups": 1,
//!     "matched_files": 2,
//!     "reclaimable_space": 12,
//!     "duration_ms": 0,
//!     "exit_code": 0,
//!     "exit_code_name": "SD000"
//!   }
//! }
//! ```

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::OutputError;
use crate::duplicates::{GroupFilter, ScanSummary, SizeGroup};
use crate::error::ExitCode;

/// A single size group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSizeGroup {
    /// File size in bytes
    pub size: u64,
    /// Number of files
    pub count: usize,
    /// Paths as scanned
    pub files: Vec<String>,
}

impl From<&SizeGroup> for JsonSizeGroup {
    fn from(group: &SizeGroup) -> Self {
        Self {
            size: group.size,
            count: group.len(),
            files: group
                .paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    pub entries_inspected: usize,
    pub files_scanned: usize,
    pub skipped_not_regular: usize,
    pub skipped_below_min_size: usize,
    pub skipped_pattern_mismatch: usize,
    pub skipped_vanished: usize,
    /// Distinct sizes before filtering
    pub size_groups: usize,
    pub matched_groups: usize,
    pub matched_files: usize,
    /// Bytes held by all but one file of each matched group
    pub reclaimable_space: u64,
    pub duration_ms: u64,
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "SD000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from a ScanSummary and an exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            entries_inspected: summary.scan.inspected,
            files_scanned: summary.scan.kept,
            skipped_not_regular: summary.scan.not_regular,
            skipped_below_min_size: summary.scan.below_min_size,
            skipped_pattern_mismatch: summary.scan.pattern_mismatch,
            skipped_vanished: summary.scan.vanished,
            size_groups: summary.grouping.unique_sizes,
            matched_groups: summary.matched_groups,
            matched_files: summary.matched_files,
            reclaimable_space: summary.reclaimable_space,
            duration_ms: summary.duration.as_millis() as u64,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Directory that was scanned
    pub directory: String,
    /// Filter the groups were selected with
    pub filter: GroupFilter,
    /// Matched size groups
    pub groups: Vec<JsonSizeGroup>,
    /// Run statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the report for one run.
    #[must_use]
    pub fn new(
        directory: &Path,
        filter: GroupFilter,
        groups: &[SizeGroup],
        summary: &ScanSummary,
        exit_code: ExitCode,
    ) -> Self {
        Self {
            directory: directory.to_string_lossy().into_owned(),
            filter,
            groups: groups.iter().map(JsonSizeGroup::from).collect(),
            summary: JsonSummary::from_scan_summary(summary, exit_code),
        }
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), OutputError> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
