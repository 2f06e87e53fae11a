//! Single-level directory lister.
//!
//! # Overview
//!
//! This module provides the [`Scanner`] struct, which lists the direct
//! children of one directory and keeps the regular files that pass the
//! configured size and name filters. It uses [`walkdir`] bounded to depth 1,
//! so subdirectories are reported as entries but never descended into.
//!
//! Entries are checked in a fixed order, and the first failing check decides
//! why an entry was skipped:
//!
//! 1. regular file (directories, symlinks, sockets and devices are skipped)
//! 2. size at least `min_size`
//! 3. file name matches the pattern at its start
//!
//! # Example
//!
//! ```no_run
//! use regex::Regex;
//! use sizedupe::scanner::scan_directory;
//! use std::path::Path;
//!
//! let pattern = Regex::new(r".+\.(?:py|txt)$").unwrap();
//! let files = scan_directory(Path::new("/home/user/notes"), Some(&pattern), 10).unwrap();
//! println!("Found {} files", files.len());
//! ```

use std::fs::{self, Metadata};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use super::{FileEntry, ScanError, ScanStats, ScannerConfig};

/// Lists the eligible files of a single directory.
#[derive(Debug)]
pub struct Scanner {
    /// Directory to list
    root: PathBuf,
    /// Scanner configuration
    config: ScannerConfig,
}

impl Scanner {
    /// Create a new scanner for the given directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Directory to list
    /// * `config` - Scanner configuration options
    #[must_use]
    pub fn new(path: &Path, config: ScannerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// The directory this scanner lists.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the directory and return the eligible files in listing order.
    ///
    /// # Errors
    ///
    /// Fails with [`ScanError::NotFound`], [`ScanError::NotADirectory`] or
    /// [`ScanError::PermissionDenied`] when the directory itself cannot be
    /// listed. An entry that disappears before it can be inspected fails the
    /// scan with [`ScanError::Vanished`] unless `skip_vanished` is set.
    /// No partial result is returned on failure.
    pub fn scan(&self) -> Result<(Vec<FileEntry>, ScanStats), ScanError> {
        self.check_root()?;

        log::debug!("Scanning entries of {}", self.root.display());

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        self.scan_entries(walker)
    }

    /// Apply the entry checks to already listed entries.
    fn scan_entries<I>(&self, entries: I) -> Result<(Vec<FileEntry>, ScanStats), ScanError>
    where
        I: IntoIterator<Item = walkdir::Result<DirEntry>>,
    {
        let mut files = Vec::new();
        let mut stats = ScanStats::default();

        for entry_result in entries {
            stats.inspected += 1;

            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    self.skip_vanished_or_fail(self.handle_walk_error(e), &mut stats)?;
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            log::trace!("Inspecting entry \"{}\"", name);

            let metadata = match self.regular_file_metadata(&entry) {
                Ok(Some(metadata)) => metadata,
                Ok(None) => {
                    log::trace!("Skipping \"{}\": not a regular file", name);
                    stats.not_regular += 1;
                    continue;
                }
                Err(e) => {
                    self.skip_vanished_or_fail(e, &mut stats)?;
                    continue;
                }
            };

            let size = metadata.len();
            if size < self.config.min_size {
                log::trace!(
                    "Skipping \"{}\": size {} is under minimum of {}",
                    name,
                    size,
                    self.config.min_size
                );
                stats.below_min_size += 1;
                continue;
            }

            if !self.passes_pattern_filter(&name) {
                log::trace!("Skipping \"{}\": does not match pattern", name);
                stats.pattern_mismatch += 1;
                continue;
            }

            log::debug!("Keeping \"{}\" ({} bytes)", name, size);
            stats.kept += 1;
            files.push(FileEntry::new(entry.into_path(), size));
        }

        log::info!(
            "Have {} matching file(s) in {} ({} skipped)",
            files.len(),
            self.root.display(),
            stats.skipped()
        );

        Ok((files, stats))
    }

    /// Count a vanished entry when `skip_vanished` is set; any other error
    /// is returned as is.
    fn skip_vanished_or_fail(
        &self,
        error: ScanError,
        stats: &mut ScanStats,
    ) -> Result<(), ScanError> {
        match error {
            ScanError::Vanished(path) if self.config.skip_vanished => {
                log::warn!("Skipping entry that vanished during scan: {}", path.display());
                stats.vanished += 1;
                Ok(())
            }
            err => Err(err),
        }
    }

    /// Verify that the root exists and is a directory.
    fn check_root(&self) -> Result<(), ScanError> {
        match fs::metadata(&self.root) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(ScanError::NotADirectory(self.root.clone())),
            Err(e) => Err(self.root_error(e)),
        }
    }

    /// Resolve the metadata of an entry if it is a regular file.
    ///
    /// Returns `Ok(None)` for directories, special files, symlinks (unless
    /// following them) and broken symlinks.
    fn regular_file_metadata(&self, entry: &DirEntry) -> Result<Option<Metadata>, ScanError> {
        let file_type = entry.file_type();

        if file_type.is_symlink() {
            if !self.config.follow_symlinks {
                return Ok(None);
            }
            return match fs::metadata(entry.path()) {
                Ok(metadata) if metadata.is_file() => Ok(Some(metadata)),
                Ok(_) => Ok(None),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    // A dangling target is a broken link; a missing link vanished.
                    match fs::symlink_metadata(entry.path()) {
                        Ok(_) => {
                            log::trace!("Broken symlink: {}", entry.path().display());
                            Ok(None)
                        }
                        Err(link_error) => Err(entry_error(entry.path(), link_error)),
                    }
                }
                Err(e) => Err(entry_error(entry.path(), e)),
            };
        }

        if !file_type.is_file() {
            return Ok(None);
        }

        // The entry may have been replaced since it was listed.
        match entry.metadata() {
            Ok(metadata) if metadata.is_file() => Ok(Some(metadata)),
            Ok(_) => Ok(None),
            Err(e) => Err(self.handle_walk_error(e)),
        }
    }

    /// Check the entry name against the configured pattern.
    fn passes_pattern_filter(&self, name: &str) -> bool {
        self.config
            .pattern
            .as_ref()
            .map_or(true, |pattern| matches_at_start(pattern, name))
    }

    /// Map an I/O error on the root directory.
    fn root_error(&self, error: io::Error) -> ScanError {
        match error.kind() {
            ErrorKind::NotFound => ScanError::NotFound(self.root.clone()),
            ErrorKind::PermissionDenied => {
                log::warn!("Permission denied: {}", self.root.display());
                ScanError::PermissionDenied(self.root.clone())
            }
            _ => ScanError::DirectoryIo {
                path: self.root.clone(),
                source: error,
            },
        }
    }

    /// Convert a walkdir error into a scan error.
    ///
    /// Errors at depth 0 concern the directory itself; deeper ones concern
    /// a single entry.
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let at_root = error.depth() == 0;
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        match error.into_io_error() {
            Some(io_error) if at_root => self.root_error(io_error),
            Some(io_error) => entry_error(&path, io_error),
            None => ScanError::Io {
                path,
                source: io::Error::other("filesystem loop detected"),
            },
        }
    }
}

/// Map an I/O error on a single entry.
fn entry_error(path: &Path, error: io::Error) -> ScanError {
    if error.kind() == ErrorKind::NotFound {
        log::debug!("Entry not found (may have been deleted): {}", path.display());
        ScanError::Vanished(path.to_path_buf())
    } else {
        log::warn!("I/O error for {}: {}", path.display(), error);
        ScanError::Io {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Whether `pattern` matches `name` starting at its first character.
///
/// A match that only occurs later in the name does not count.
#[must_use]
pub fn matches_at_start(pattern: &Regex, name: &str) -> bool {
    // The leftmost match starts at 0 whenever any match does.
    pattern.find(name).is_some_and(|m| m.start() == 0)
}

/// List `dir` and return its eligible files.
///
/// Convenience wrapper around [`Scanner`] with symlinks skipped and the
/// fatal vanished-entry policy.
///
/// # Errors
///
/// See [`Scanner::scan`].
pub fn scan_directory(
    dir: &Path,
    pattern: Option<&Regex>,
    min_size: u64,
) -> Result<Vec<FileEntry>, ScanError> {
    let config = ScannerConfig::new(pattern.cloned(), min_size);
    let (files, _stats) = Scanner::new(dir, config).scan()?;
    Ok(files)
}
