//! Command-line interface definitions for sizedupe.
//!
//! # Example
//!
//! ```bash
//! # Groups of two or more same-size files (default)
//! sizedupe ~/Downloads
//!
//! # Only .py and .txt files of at least 10 bytes
//! sizedupe ~/notes --pattern '.+\.(?:py|txt)$' --min-size 10
//!
//! # Exactly three files per group, as JSON
//! sizedupe ~/Downloads --exactly 3 --output json
//!
//! # Trace every skipped entry
//! sizedupe -vv ~/Downloads
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::ConfigOverrides;
use crate::duplicates::GroupFilter;

/// Group the files of a directory by size.
///
/// Lists the regular files directly inside DIR, groups them by exact byte
/// size and prints the groups matching the member count filter. Files are
/// not read or compared: same size does not prove same content.
#[derive(Debug, Parser)]
#[command(name = "sizedupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Directory whose files are grouped (not recursive)
    #[arg(value_name = "DIR")]
    pub path: PathBuf,

    /// Regular expression file names must match from their first character
    #[arg(short, long, value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Minimum file size to consider (e.g., 10, 1KB, 1MiB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub min_size: Option<u64>,

    /// Report groups with at least N files [default: 2]
    #[arg(long, value_name = "N", conflicts_with = "exactly")]
    pub at_least: Option<usize>,

    /// Report groups with exactly N files
    #[arg(long, value_name = "N")]
    pub exactly: Option<usize>,

    /// Treat symbolic links to regular files as those files
    #[arg(long, overrides_with = "no_follow_symlinks")]
    pub follow_symlinks: bool,

    /// Skip symbolic links even if the configuration follows them
    #[arg(long, overrides_with = "follow_symlinks")]
    pub no_follow_symlinks: bool,

    /// Skip entries deleted during the scan instead of failing
    #[arg(long, overrides_with = "no_skip_vanished")]
    pub skip_vanished: bool,

    /// Fail on entries deleted during the scan even if the configuration skips them
    #[arg(long, overrides_with = "skip_vanished")]
    pub no_skip_vanished: bool,

    /// Configuration file (default: config.toml in the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

impl Cli {
    /// The group filter requested on the command line, if any.
    #[must_use]
    pub fn group_filter(&self) -> Option<GroupFilter> {
        match (self.at_least, self.exactly) {
            (_, Some(n)) => Some(GroupFilter::Exactly(n)),
            (Some(n), None) => Some(GroupFilter::AtLeast(n)),
            (None, None) => None,
        }
    }

    /// Settings given on the command line, for the top configuration layer.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            min_size: self.min_size,
            pattern: self.pattern.clone(),
            group_filter: self.group_filter(),
            follow_symlinks: switch(self.follow_symlinks, self.no_follow_symlinks),
            skip_vanished: switch(self.skip_vanished, self.no_skip_vanished),
        }
    }
}

// `--flag` / `--no-flag` pair; neither leaves the lower layers in charge.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    Text,
    /// JSON for scripting
    Json,
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use sizedupe::cli::parse_size;
///
/// assert_eq!(parse_size("10").unwrap(), 10);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// assert_eq!(parse_size("1.5MiB").unwrap(), 1_572_864);
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, negative, not a number, has an
/// unknown suffix, or does not fit in 64 bits.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }
    if s.starts_with('-') {
        return Err("Size cannot be negative".to_string());
    }

    let split = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    let (num_str, suffix) = (&s[..split], s[split..].trim().to_ascii_uppercase());

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1 << 10,
        "MB" | "M" => 1_000_000,
        "MIB" => 1 << 20,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1 << 30,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1 << 40,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    // Whole numbers stay exact; fractions go through f64.
    if let Ok(whole) = num_str.parse::<u64>() {
        return whole
            .checked_mul(multiplier)
            .ok_or_else(|| format!("Size too large: '{s}'"));
    }
    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;
    let bytes = num * multiplier as f64;
    if bytes >= u64::MAX as f64 {
        return Err(format!("Size too large: '{s}'"));
    }
    Ok(bytes as u64)
}
