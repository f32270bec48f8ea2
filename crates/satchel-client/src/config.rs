//! Client configuration loaded from a YAML file.
//!
//! The config covers only client-local concerns: where persisted state
//! (the favorites list) lives, the log level, and the invite lifetime used
//! when an invite is simulated locally. Everything gameplay-relevant comes
//! from the authority at runtime.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Directory where client-side state is persisted.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Lifetime in seconds for locally simulated trade invites.
    #[serde(default = "default_invite_expiry_secs")]
    pub invite_expiry_secs: u64,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            invite_expiry_secs: default_invite_expiry_secs(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".")
}

const fn default_invite_expiry_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_owned()
}
