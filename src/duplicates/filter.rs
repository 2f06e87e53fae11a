//! Group selection by cardinality.
//!
//! [`filter_groups`] is the primitive: it keeps the groups an arbitrary
//! predicate accepts, in their input order. [`groups_with_at_least`] and
//! [`groups_with_exactly`] are the two standard cardinality checks built on
//! it, and [`GroupFilter`] carries one of them through configuration.
//!
//! # Example
//!
//! ```
//! use sizedupe::duplicates::{groups_with_at_least, SizeGroup};
//! use std::path::PathBuf;
//!
//! let groups = vec![
//!     SizeGroup::with_paths(12, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]),
//!     SizeGroup::with_paths(5, vec![PathBuf::from("c.py")]),
//! ];
//!
//! let candidates = groups_with_at_least(2, groups);
//! assert_eq!(candidates.len(), 1);
//! assert_eq!(candidates[0].size, 12);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SizeGroup;

/// Keep the groups for which `predicate` returns `true`.
///
/// Relative order is preserved. A predicate that matches nothing yields an
/// empty result.
#[must_use]
pub fn filter_groups<P>(groups: impl IntoIterator<Item = SizeGroup>, predicate: P) -> Vec<SizeGroup>
where
    P: Fn(&SizeGroup) -> bool,
{
    let mut total = 0usize;
    let kept: Vec<SizeGroup> = groups
        .into_iter()
        .inspect(|_| total += 1)
        .filter(|group| predicate(group))
        .collect();

    log::info!("Kept {} of {} file group(s)", kept.len(), total);
    kept
}

/// Keep the groups with `amount` or more members.
#[must_use]
pub fn groups_with_at_least(
    amount: usize,
    groups: impl IntoIterator<Item = SizeGroup>,
) -> Vec<SizeGroup> {
    filter_groups(groups, |group| group.len() >= amount)
}

/// Keep the groups with exactly `amount` members.
#[must_use]
pub fn groups_with_exactly(
    amount: usize,
    groups: impl IntoIterator<Item = SizeGroup>,
) -> Vec<SizeGroup> {
    filter_groups(groups, |group| group.len() == amount)
}

/// A cardinality condition on size groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupFilter {
    /// Member count is at least N
    AtLeast(usize),
    /// Member count is exactly N
    Exactly(usize),
}

impl Default for GroupFilter {
    /// Duplicate candidates: two or more files of the same size.
    fn default() -> Self {
        Self::AtLeast(2)
    }
}

impl GroupFilter {
    /// Whether `group` satisfies this condition.
    #[must_use]
    pub fn matches(&self, group: &SizeGroup) -> bool {
        match *self {
            Self::AtLeast(n) => group.len() >= n,
            Self::Exactly(n) => group.len() == n,
        }
    }

    /// Keep the groups satisfying this condition.
    #[must_use]
    pub fn apply(&self, groups: impl IntoIterator<Item = SizeGroup>) -> Vec<SizeGroup> {
        match *self {
            Self::AtLeast(n) => groups_with_at_least(n, groups),
            Self::Exactly(n) => groups_with_exactly(n, groups),
        }
    }
}

impl fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtLeast(n) => write!(f, "at least {n} file(s)"),
            Self::Exactly(n) => write!(f, "exactly {n} file(s)"),
        }
    }
}
