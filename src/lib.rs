//! sizedupe - Same-size file grouping
//!
//! Lists the regular files directly inside a directory, groups them by exact
//! byte size and keeps the groups whose member count matches a condition.
//! Same-size groups are duplicate candidates; file contents are never read.
//!
//! The pipeline is three steps, each usable on its own:
//!
//! ```no_run
//! use regex::Regex;
//! use sizedupe::duplicates::{group_by_size, groups_with_at_least};
//! use sizedupe::scanner::scan_directory;
//! use std::path::Path;
//!
//! let pattern = Regex::new(r".+\.(?:py|txt)$").unwrap();
//! let files = scan_directory(Path::new("/home/user/notes"), Some(&pattern), 10).unwrap();
//! let groups = group_by_size(files);
//! let candidates = groups_with_at_least(2, groups);
//! ```

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::SizeGroupFinder;
use crate::error::ExitCode;
use crate::output::{JsonOutput, TextOutput};

/// Run the command line application.
///
/// # Errors
///
/// Fails on invalid configuration, an unreadable directory, or a report
/// that cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("Warning: logging already initialized: {e}");
    }

    let config = Config::load(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;
    let finder_config = config.finder_config()?;
    let filter = finder_config.filter;

    let finder = SizeGroupFinder::new(finder_config);
    let (groups, summary) = finder
        .find(&cli.path)
        .with_context(|| format!("Failed to scan {}", cli.path.display()))?;

    let exit_code = ExitCode::for_matches(groups.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.output {
        OutputFormat::Text => TextOutput::new(filter, &groups, &summary).write_to(&mut out)?,
        OutputFormat::Json => {
            JsonOutput::new(&cli.path, filter, &groups, &summary, exit_code).write_to(&mut out)?;
        }
    }
    out.flush()?;

    Ok(exit_code)
}
