//! Logging setup for sizedupe.
//!
//! Library code logs through the `log` facade only; this module installs the
//! `env_logger` backend for the binary. The level comes from, in order:
//!
//! 1. The `RUST_LOG` environment variable, if set
//! 2. `--quiet` (errors only)
//! 3. `--verbose` count: `-v` for debug (kept files, group sizes),
//!    `-vv` for trace (every skipped entry and the reason)
//! 4. Info otherwise (stage summaries)
//!
//! Debug builds prefix each line with a timestamp, and with the module path
//! from `-v` on. Release builds print level and message only.
//!
//! # Example
//!
//! ```rust,no_run
//! use sizedupe::logging::init_logging;
//!
//! // -vv on the command line
//! init_logging(2, false).unwrap();
//! log::trace!("every skipped entry is reported");
//! ```

use env_logger::Builder;
use log::{LevelFilter, SetLoggerError};
use std::env;
use std::io::Write;

/// Environment variable that overrides the CLI verbosity flags.
pub const LOG_ENV: &str = "RUST_LOG";

/// Install the global logger.
///
/// # Errors
///
/// Fails if a logger has already been installed in this process.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<(), SetLoggerError> {
    let from_env = env::var(LOG_ENV).ok();

    let mut builder = Builder::new();
    match &from_env {
        Some(filters) => {
            builder.parse_filters(filters);
        }
        None => {
            builder.filter_level(level_for(verbose, quiet));
        }
    }
    configure_format(&mut builder, verbose);
    builder.try_init()?;

    match from_env {
        Some(filters) => log::debug!("Logging configured from {}={}", LOG_ENV, filters),
        None => log::debug!("Logging at level {}", level_for(verbose, quiet)),
    }
    Ok(())
}

/// Map the CLI flags to a level. `quiet` wins over `verbose`.
#[must_use]
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(debug_assertions)]
fn configure_format(builder: &mut Builder, verbose: u8) {
    let with_module = verbose >= 1;
    builder.format(move |buf, record| {
        let timestamp = buf.timestamp_seconds();
        let level = record.level();
        let style = buf.default_level_style(level);
        write!(buf, "{} {style}{:<5}{style:#} ", timestamp, level)?;
        if with_module {
            write!(buf, "[{}] ", record.module_path().unwrap_or("unknown"))?;
        }
        writeln!(buf, "{}", record.args())
    });
}

#[cfg(not(debug_assertions))]
fn configure_format(builder: &mut Builder, _verbose: u8) {
    builder.format(|buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        writeln!(buf, "{style}{:<5}{style:#} {}", level, record.args())
    });
}
