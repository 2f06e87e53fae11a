//! Human-readable report of size groups.
//!
//! ```text
//! Size group: 2 files of 12 B each
//!   /home/user/notes/a.txt
//!   /home/user/notes/b.txt
//!
//! 1 group(s) with at least 2 file(s): 2 files, 12 B in extra copies
//! ```

use std::io::Write;

use bytesize::ByteSize;

use super::OutputError;
use crate::duplicates::{GroupFilter, ScanSummary, SizeGroup};

/// Text report for one run.
#[derive(Debug)]
pub struct TextOutput<'a> {
    filter: GroupFilter,
    groups: &'a [SizeGroup],
    summary: &'a ScanSummary,
}

impl<'a> TextOutput<'a> {
    /// Prepare a report of `groups` selected by `filter`.
    #[must_use]
    pub fn new(filter: GroupFilter, groups: &'a [SizeGroup], summary: &'a ScanSummary) -> Self {
        Self {
            filter,
            groups,
            summary,
        }
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), OutputError> {
        if self.groups.is_empty() {
            writeln!(writer, "No size groups with {}.", self.filter)?;
            return Ok(());
        }

        for group in self.groups {
            writeln!(
                writer,
                "Size group: {} files of {} each",
                group.len(),
                format_size(group.size)
            )?;
            for path in &group.paths {
                writeln!(writer, "  {}", path.display())?;
            }
            writeln!(writer)?;
        }

        writeln!(
            writer,
            "{} group(s) with {}: {} files, {} in extra copies",
            self.summary.matched_groups,
            self.filter,
            self.summary.matched_files,
            format_size(self.summary.reclaimable_space)
        )?;
        Ok(())
    }
}

/// Format a byte count with IEC units.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    ByteSize::b(bytes).to_string()
}
