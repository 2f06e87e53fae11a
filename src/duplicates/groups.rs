//! Size-based file grouping.
//!
//! # Overview
//!
//! Files with different sizes cannot be duplicates, so grouping by exact
//! size is the first step of duplicate detection. Grouping here is a pure
//! partition: every input file lands in exactly one [`SizeGroup`], and groups
//! with a single member are kept. Narrowing down to duplicate candidates is
//! the job of the [`filter`](super::filter) module.
//!
//! Grouping is stable: groups appear in the order their size was first seen,
//! and paths inside a group keep their input order.
//!
//! # Example
//!
//! ```
//! use sizedupe::scanner::FileEntry;
//! use sizedupe::duplicates::group_by_size;
//! use std::path::PathBuf;
//!
//! let files = vec![
//!     FileEntry::new(PathBuf::from("/file1.txt"), 1024),
//!     FileEntry::new(PathBuf::from("/file2.txt"), 2048),
//!     FileEntry::new(PathBuf::from("/file3.txt"), 1024),
//! ];
//!
//! let groups = group_by_size(files);
//!
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[0].size, 1024);
//! assert_eq!(groups[0].paths, vec![PathBuf::from("/file1.txt"), PathBuf::from("/file3.txt")]);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::scanner::FileEntry;

/// A set of paths sharing one file size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeGroup {
    /// File size in bytes (shared by all files in this group)
    pub size: u64,
    /// Paths with this exact size, in first-seen order
    pub paths: Vec<PathBuf>,
}

impl SizeGroup {
    /// Create an empty size group.
    #[must_use]
    pub fn new(size: u64) -> Self {
        Self {
            size,
            paths: Vec::new(),
        }
    }

    /// Create a size group with initial paths.
    #[must_use]
    pub fn with_paths(size: u64, paths: Vec<PathBuf>) -> Self {
        Self { size, paths }
    }

    /// Add a path to this group.
    pub fn add(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Check if this group has potential duplicates (2+ files).
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.paths.len() > 1
    }

    /// Whether `path` is a member of this group.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Total size of all files in this group, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.size.saturating_mul(self.paths.len() as u64)
    }

    /// Bytes held by all copies but one, saturating at `u64::MAX`.
    #[must_use]
    pub fn potential_savings(&self) -> u64 {
        self.size
            .saturating_mul((self.paths.len() as u64).saturating_sub(1))
    }
}

/// Statistics from the grouping step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of files grouped
    pub total_files: usize,
    /// Total size of all files in bytes, saturating at `u64::MAX`
    pub total_size: u64,
    /// Number of distinct sizes (one group each)
    pub unique_sizes: usize,
    /// Number of groups holding a single file
    pub singleton_groups: usize,
    /// Member count of the largest group
    pub largest_group: usize,
}

impl GroupingStats {
    /// Number of files sharing their size with at least one other file.
    #[must_use]
    pub fn shared_size_files(&self) -> usize {
        self.total_files - self.singleton_groups
    }
}

/// Partition files into groups of identical size.
///
/// Every file of size S ends up in the one group whose `size` is S.
/// Singleton groups are kept. An empty input yields no groups.
#[must_use]
pub fn group_by_size(files: impl IntoIterator<Item = FileEntry>) -> Vec<SizeGroup> {
    group_by_size_with_stats(files).0
}

/// Group files by size and report statistics about the result.
///
/// # Performance
///
/// - Time complexity: O(n) where n is the number of files
/// - No file I/O is performed
///
/// # Example
///
/// ```
/// use sizedupe::scanner::FileEntry;
/// use sizedupe::duplicates::group_by_size_with_stats;
/// use std::path::PathBuf;
///
/// let files = vec![
///     FileEntry::new(PathBuf::from("/a.txt"), 100),
///     FileEntry::new(PathBuf::from("/b.txt"), 100),
///     FileEntry::new(PathBuf::from("/c.txt"), 200),
/// ];
///
/// let (groups, stats) = group_by_size_with_stats(files);
///
/// assert_eq!(groups.len(), 2);
/// assert_eq!(stats.total_files, 3);
/// assert_eq!(stats.singleton_groups, 1);
/// assert_eq!(stats.largest_group, 2);
/// ```
#[must_use]
pub fn group_by_size_with_stats(
    files: impl IntoIterator<Item = FileEntry>,
) -> (Vec<SizeGroup>, GroupingStats) {
    let mut groups: Vec<SizeGroup> = Vec::new();
    let mut index_by_size: HashMap<u64, usize> = HashMap::new();
    let mut stats = GroupingStats::default();

    for file in files {
        stats.total_files += 1;
        stats.total_size = stats.total_size.saturating_add(file.size);

        let index = *index_by_size.entry(file.size).or_insert_with(|| {
            groups.push(SizeGroup::new(file.size));
            groups.len() - 1
        });
        groups[index].add(file.path);
    }

    stats.unique_sizes = groups.len();
    for group in &groups {
        if group.len() == 1 {
            stats.singleton_groups += 1;
        } else {
            log::debug!("Size group {} bytes: {} files", group.size, group.len());
        }
        stats.largest_group = stats.largest_group.max(group.len());
    }

    log::info!(
        "Grouped {} file(s) into {} size group(s)",
        stats.total_files,
        stats.unique_sizes
    );

    (groups, stats)
}
