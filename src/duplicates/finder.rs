//! Scan, group and filter in one call.
//!
//! [`SizeGroupFinder`] wires the three steps together:
//!
//! 1. **Scan**: list the eligible files of the directory
//!    (see [`crate::scanner`])
//! 2. **Group**: partition them by size (see [`super::groups`])
//! 3. **Filter**: keep the groups matching the [`GroupFilter`]
//!    (see [`super::filter`])
//!
//! Each step completes before the next starts. A failing scan aborts the run
//! and no partial result is returned.
//!
//! # Example
//!
//! ```no_run
//! use sizedupe::duplicates::{FinderConfig, GroupFilter, SizeGroupFinder};
//! use std::path::Path;
//!
//! let finder = SizeGroupFinder::new(FinderConfig::default().with_filter(GroupFilter::AtLeast(2)));
//! let (groups, summary) = finder.find(Path::new(".")).unwrap();
//!
//! for group in &groups {
//!     println!("{} bytes: {} files", group.size, group.len());
//! }
//! println!("{} files scanned", summary.scan.kept);
//! ```

use std::path::Path;
use std::time::{Duration, Instant};

use super::filter::GroupFilter;
use super::groups::{group_by_size_with_stats, GroupingStats, SizeGroup};
use crate::scanner::{ScanError, ScanStats, Scanner, ScannerConfig};

/// Configuration for a finder run.
#[derive(Debug, Clone, Default)]
pub struct FinderConfig {
    /// Scanner settings (pattern, minimum size, link and race policies)
    pub scanner: ScannerConfig,
    /// Which size groups to report
    pub filter: GroupFilter,
}

impl FinderConfig {
    /// Set the scanner configuration.
    #[must_use]
    pub fn with_scanner(mut self, scanner: ScannerConfig) -> Self {
        self.scanner = scanner;
        self
    }

    /// Set the group filter.
    #[must_use]
    pub fn with_filter(mut self, filter: GroupFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Errors that abort a finder run.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The directory could not be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Outcome of a finder run.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Counters from the scan step
    pub scan: ScanStats,
    /// Counters from the grouping step
    pub grouping: GroupingStats,
    /// Groups left after filtering
    pub matched_groups: usize,
    /// Files in the groups left after filtering
    pub matched_files: usize,
    /// Bytes held by all but one file of each matched group
    pub reclaimable_space: u64,
    /// Wall time of the whole run
    pub duration: Duration,
}

/// Runs the scan, group and filter steps over one directory.
#[derive(Debug, Clone, Default)]
pub struct SizeGroupFinder {
    config: FinderConfig,
}

impl SizeGroupFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a finder reporting groups of two or more files, with no
    /// pattern and no minimum size.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// The configuration this finder runs with.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Scan `dir` and return the size groups matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Scan`] when the directory cannot be listed or
    /// an entry fails under the fatal vanished-entry policy.
    pub fn find(&self, dir: &Path) -> Result<(Vec<SizeGroup>, ScanSummary), FinderError> {
        let start = Instant::now();

        let scanner = Scanner::new(dir, self.config.scanner.clone());
        let (files, scan_stats) = scanner.scan()?;

        let (groups, grouping_stats) = group_by_size_with_stats(files);

        log::debug!("Selecting groups with {}", self.config.filter);
        let matched = self.config.filter.apply(groups);

        let summary = ScanSummary {
            scan: scan_stats,
            grouping: grouping_stats,
            matched_groups: matched.len(),
            matched_files: matched
                .iter()
                .fold(0, |acc: usize, group| acc.saturating_add(group.len())),
            reclaimable_space: reclaimable_space(&matched),
            duration: start.elapsed(),
        };

        log::info!(
            "{} group(s) with {} ({} files) in {:.2?}",
            summary.matched_groups,
            self.config.filter,
            summary.matched_files,
            summary.duration
        );

        Ok((matched, summary))
    }
}

/// Bytes held by extra copies across `groups`, saturating at `u64::MAX`.
#[must_use]
pub fn reclaimable_space(groups: &[SizeGroup]) -> u64 {
    groups
        .iter()
        .fold(0, |acc: u64, group| acc.saturating_add(group.potential_savings()))
}
