//! Viewer configuration
//!
//! Resolved in layers: built-in defaults, then the YAML config file, then
//! the `FACTSHEET_ENDPOINT` environment variable. Command-line flags are
//! applied last by the binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding the endpoint address
pub const ENDPOINT_ENV: &str = "FACTSHEET_ENDPOINT";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:1337/graphql";
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("endpoint must be an http(s) URL, got '{0}'")]
    InvalidEndpoint(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GraphQL endpoint address
    pub endpoint: String,
    /// Search debounce delay in milliseconds
    pub debounce_ms: u64,
    /// Per-request timeout; unset means no limit beyond the transport's own
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            request_timeout_secs: None,
        }
    }
}

/// Default config file location (~/.config/factsheet/config.yaml)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("factsheet").join("config.yaml"))
}

impl Config {
    /// Load from `path`, or the default location when `None`. A missing
    /// default file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(ref path) if path.exists() => Self::from_file(path)?,
                _ => Self::default(),
            },
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                debug!(endpoint = %endpoint, "endpoint taken from {}", ENDPOINT_ENV);
                config.endpoint = endpoint;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidEndpoint(self.endpoint.clone()))
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
