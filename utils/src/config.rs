//! State-tooling configuration with TOML file support.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strand_codec::DecodeLimits;
use thiserror::Error;

use crate::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config not serializable: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Configuration for a process that reads or writes saved ledger state.
///
/// Every field has a default, so an empty file is a valid configuration.
/// Decode bounds live under a `[limits]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub limits: DecodeLimits,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl StateConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Install the global subscriber described by this configuration.
    pub fn init_logging(&self) {
        crate::init_logging(self.log_format, &self.log_level);
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            limits: DecodeLimits::default(),
        }
    }
}
