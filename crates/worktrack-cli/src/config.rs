//! CLI configuration
//!
//! Loaded from a TOML file (`--config`, else `./worktrack.toml` when it
//! exists), then overridden by `WORKTRACK_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use worktrack_report::{alerts, burndown, period};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "worktrack.toml";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`CliConfig`]
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },

    /// Environment override with an unusable value
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// Variable name
        key: String,
        /// Offending value
        value: String,
    },
}

/// Settings for the `worktrack` binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Weekly buckets in `periods`
    pub weeks: u32,
    /// Monthly buckets in `periods`
    pub months: u32,
    /// Days ahead a project deadline raises an alert
    pub alert_horizon_days: u32,
    /// Days drawn past the end of a burndown
    pub burndown_tail_days: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_json: false,
            weeks: period::DEFAULT_WEEKS,
            months: period::DEFAULT_MONTHS,
            alert_horizon_days: alerts::DEFAULT_HORIZON_DAYS,
            burndown_tail_days: burndown::DEFAULT_TAIL_DAYS,
        }
    }
}

impl CliConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With log level
    #[inline]
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// With JSON log output
    #[inline]
    #[must_use]
    pub fn with_log_json(mut self, json: bool) -> Self {
        self.log_json = json;
        self
    }

    /// With weekly and monthly bucket counts
    #[inline]
    #[must_use]
    pub fn with_periods(mut self, weeks: u32, months: u32) -> Self {
        self.weeks = weeks;
        self.months = months;
        self
    }

    /// Load from `path`, or from the default file if present, then apply
    /// environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from a TOML file only (no env overrides)
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `WORKTRACK_*` overrides from an arbitrary lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("WORKTRACK_LOG_LEVEL") {
            self.log_level = v;
        }
        if let Some(v) = lookup("WORKTRACK_LOG_JSON") {
            self.log_json = parse_bool("WORKTRACK_LOG_JSON", &v)?;
        }
        if let Some(v) = lookup("WORKTRACK_WEEKS") {
            self.weeks = parse_number("WORKTRACK_WEEKS", &v)?;
        }
        if let Some(v) = lookup("WORKTRACK_MONTHS") {
            self.months = parse_number("WORKTRACK_MONTHS", &v)?;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
