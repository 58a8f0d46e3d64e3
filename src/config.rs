//! Configuration loading and logging initialization.
//!
//! Configuration is an optional TOML file; a missing file falls back to
//! the defaults, and command-line flags override whatever was loaded.

use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ConfigError;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchConfig {
    /// Thread budget for the branch search; defaults to the number of
    /// logical CPUs when unset.
    pub threads: Option<usize>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::ReadFile(e)),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.search.threads == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "search.threads",
                reason: "must be at least 1".into(),
            });
        }
        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected 'pretty' or 'json', got '{other}'"),
            }),
        }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    /// `RUST_LOG` takes precedence over the configured level when set.
    /// Events go to stderr; stdout carries only program output.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(io::stderr)
                    .init();
            }
            _ => {
                fmt().with_env_filter(filter).with_writer(io::stderr).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}
