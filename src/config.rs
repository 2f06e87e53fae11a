//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. A TOML file: `--config <PATH>` if given, otherwise `config.toml` in
//!    the platform config directory (skipped when absent)
//! 3. Environment variables prefixed `SIZEDUPE_` (e.g. `SIZEDUPE_MIN_SIZE=10`)
//! 4. Command-line flags ([`ConfigOverrides`])
//!
//! # Example file
//!
//! ```toml
//! min_size = 10
//! pattern = '.+\.(?:py|txt)$'
//! group_filter = { at_least = 2 }
//! follow_symlinks = false
//! skip_vanished = false
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::duplicates::{FinderConfig, GroupFilter};
use crate::scanner::ScannerConfig;

/// Prefix of the environment variables read into the configuration.
pub const ENV_PREFIX: &str = "SIZEDUPE_";

/// Errors raised while resolving the configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// A layer could not be parsed or has the wrong shape.
    #[error("Invalid configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// The file name pattern is not a valid regular expression.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Why it failed to compile
        #[source]
        source: regex::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum file size in bytes; smaller files are skipped.
    pub min_size: u64,
    /// Regular expression the file name must match from its start.
    pub pattern: Option<String>,
    /// Which size groups to report.
    pub group_filter: GroupFilter,
    /// Treat symlinks to regular files as those files.
    pub follow_symlinks: bool,
    /// Skip entries that vanish mid-scan instead of failing.
    pub skip_vanished: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_size: 0,
            pattern: None,
            group_filter: GroupFilter::default(),
            follow_symlinks: false,
            skip_vanished: false,
        }
    }
}

/// Values set on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    /// `--min-size`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u64>,
    /// `--pattern`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// `--at-least` or `--exactly`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_filter: Option<GroupFilter>,
    /// `--follow-symlinks` / `--no-follow-symlinks`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_symlinks: Option<bool>,
    /// `--skip-vanished` / `--no-skip-vanished`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_vanished: Option<bool>,
}

impl Config {
    /// Build the layered figment without the command-line layer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if `config_file` is given but
    /// does not exist.
    pub fn figment(config_file: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        match config_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                log::debug!("Loading config from {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
            None => {
                if let Some(path) = Self::default_path().filter(|p| p.is_file()) {
                    log::debug!("Loading config from {}", path.display());
                    figment = figment.merge(Toml::file(path));
                }
            }
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Resolve all layers, command-line overrides last.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a file is missing or a layer is malformed.
    pub fn load(
        config_file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let config: Config = Self::figment(config_file)?
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(Box::new)?;
        log::debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "sizedupe", "sizedupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Compile the file name pattern, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if the pattern does not compile.
    pub fn compile_pattern(&self) -> Result<Option<Regex>, ConfigError> {
        self.pattern
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()
    }

    /// Turn the configuration into finder settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if the pattern does not compile.
    pub fn finder_config(&self) -> Result<FinderConfig, ConfigError> {
        let scanner = ScannerConfig::new(self.compile_pattern()?, self.min_size)
            .with_follow_symlinks(self.follow_symlinks)
            .with_skip_vanished(self.skip_vanished);

        Ok(FinderConfig::default()
            .with_scanner(scanner)
            .with_filter(self.group_filter))
    }
}
