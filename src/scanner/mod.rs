//! Scanner module for listing the files of a single directory.
//!
//! This module provides functionality for:
//! - Non-recursive listing of the direct children of a directory
//! - Regular-file filtering (directories, symlinks and special files are skipped)
//! - Minimum size filtering
//! - Anchored file name pattern matching
//!
//! # Architecture
//!
//! - [`lister`]: Directory listing and per-entry eligibility checks
//!
//! # Example
//!
//! ```no_run
//! use sizedupe::scanner::{Scanner, ScannerConfig};
//! use std::path::Path;
//!
//! let config = ScannerConfig {
//!     min_size: 1024, // Skip files under 1KB
//!     ..Default::default()
//! };
//!
//! let scanner = Scanner::new(Path::new("."), config);
//! let (files, stats) = scanner.scan().unwrap();
//! for file in &files {
//!     println!("{}: {} bytes", file.path.display(), file.size);
//! }
//! println!("kept {} of {} entries", stats.kept, stats.inspected);
//! ```

pub mod lister;

use std::path::PathBuf;

use regex::Regex;

pub use lister::{scan_directory, Scanner};

/// A regular file discovered by the scanner.
///
/// The path is the scanned directory joined with the entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileEntry {
    /// Create a new FileEntry.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Configuration for a directory scan.
#[derive(Debug, Clone, Default)]
pub struct ScannerConfig {
    /// Only keep files whose name matches this pattern at its start.
    pub pattern: Option<Regex>,

    /// Minimum file size to include (in bytes).
    /// Files exactly this size are kept.
    pub min_size: u64,

    /// Treat a symlink pointing at a regular file as that file.
    /// Broken symlinks are skipped either way.
    pub follow_symlinks: bool,

    /// Skip entries that disappear between listing and stat instead of
    /// failing the whole scan.
    pub skip_vanished: bool,
}

impl ScannerConfig {
    /// Create a configuration with a pattern and a minimum size.
    #[must_use]
    pub fn new(pattern: Option<Regex>, min_size: u64) -> Self {
        Self {
            pattern,
            min_size,
            ..Default::default()
        }
    }

    /// Set symlink following.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set the per-entry skip policy for vanished entries.
    #[must_use]
    pub fn with_skip_vanished(mut self, skip: bool) -> Self {
        self.skip_vanished = skip;
        self
    }
}

/// Counters collected while scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Directory entries looked at
    pub inspected: usize,
    /// Entries returned to the caller
    pub kept: usize,
    /// Directories, symlinks and special files
    pub not_regular: usize,
    /// Regular files under the minimum size
    pub below_min_size: usize,
    /// Regular files whose name did not match the pattern
    pub pattern_mismatch: usize,
    /// Entries that disappeared mid-scan (only with `skip_vanished`)
    pub vanished: usize,
}

impl ScanStats {
    /// Total number of skipped entries.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.not_regular + self.below_min_size + self.pattern_mismatch + self.vanished
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified directory was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Permission was denied when listing the directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An entry disappeared between listing and stat.
    #[error("Entry vanished during scan: {0}")]
    Vanished(PathBuf),

    /// The directory itself could not be read for another reason.
    #[error("Cannot read directory {path}: {source}")]
    DirectoryIo {
        /// Directory being scanned
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An I/O error occurred while inspecting an entry.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Whether the error concerns the scanned directory itself rather than
    /// one of its entries.
    #[must_use]
    pub fn is_invalid_directory(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::NotADirectory(_)
                | Self::PermissionDenied(_)
                | Self::DirectoryIo { .. }
        )
    }
}
