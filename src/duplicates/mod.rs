//! Duplicate candidate detection module.
//!
//! This module provides functionality for:
//! - Size-based file grouping
//! - Group selection by member count
//! - The combined scan → group → filter run

pub mod filter;
pub mod finder;
pub mod groups;

pub use filter::{filter_groups, groups_with_at_least, groups_with_exactly, GroupFilter};
pub use finder::{reclaimable_space, FinderConfig, FinderError, ScanSummary, SizeGroupFinder};
pub use groups::{group_by_size, group_by_size_with_stats, GroupingStats, SizeGroup};
