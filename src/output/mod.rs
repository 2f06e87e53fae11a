//! Report formatters for size group results.
//!
//! - Text for reading in a terminal
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use sizedupe::duplicates::SizeGroupFinder;
//! use sizedupe::error::ExitCode;
//! use sizedupe::output::JsonOutput;
//! use std::path::Path;
//!
//! let finder = SizeGroupFinder::with_defaults();
//! let dir = Path::new(".");
//! let (groups, summary) = finder.find(dir).unwrap();
//!
//! let exit_code = ExitCode::for_matches(groups.len());
//! let output = JsonOutput::new(dir, finder.config().filter, &groups, &summary, exit_code);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod json;
pub mod text;

pub use json::JsonOutput;
pub use text::TextOutput;

/// Errors that can occur while writing a report.
#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error while writing report: {0}")]
    Io(#[from] std::io::Error),
}
