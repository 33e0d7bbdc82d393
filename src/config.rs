//! Aggregator configuration.
//!
//! Configuration is read from TOML. Every section is optional and falls back
//! to its defaults; the adapter address list can be overridden from the
//! environment so deployments can inject it without editing the file.

use crate::adapter::domain::{AdapterDomainError, Credentials};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that replaces `adapters.addresses`.
pub const ADDRESSES_ENV: &str = "DBAAS_ADAPTER_ADDRESSES";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration from {path}: {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level aggregator configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Adapter fleet settings.
    pub adapters: AdaptersConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AggregatorConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not valid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Applies environment overrides read through `lookup`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl FnOnce(&str) -> Option<String>) -> Self {
        if let Some(addresses) = lookup(ADDRESSES_ENV) {
            self.adapters.addresses = Some(addresses);
        }
        self
    }

    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_process_env(self) -> Self {
        self.with_env_overrides(|name| std::env::var(name).ok())
    }
}

/// Adapter fleet settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AdaptersConfig {
    /// Comma-separated adapter base URLs registered at startup.
    pub addresses: Option<String>,
    /// Username presented to adapters.
    pub username: String,
    /// Password presented to adapters.
    #[serde(deserialize_with = "deserialize_secret")]
    pub password: SecretString,
}

impl AdaptersConfig {
    /// Builds adapter credentials from the configured username and password.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterDomainError::EmptyUsername`] when no username is set.
    pub fn credentials(&self) -> Result<Credentials, AdapterDomainError> {
        Credentials::new(
            self.username.as_str(),
            SecretString::from(self.password.expose_secret().to_owned()),
        )
    }
}

impl Default for AdaptersConfig {
    fn default() -> Self {
        Self {
            addresses: None,
            username: "dbaas-aggregator".to_owned(),
            password: SecretString::from(String::new()),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Structured JSON for log aggregators.
    Json,
    /// Multi-line human-readable output.
    Pretty,
    /// Single-line human-readable output.
    #[default]
    Compact,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            format: LogFormat::default(),
        }
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}
