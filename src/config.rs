//! Configuration management for the explorer.
//!
//! Handles loading provider settings from a TOML file, with environment
//! variable overrides for the endpoint, timeout and wire variant.

use crate::error::{ExplorerError, Result};
use crate::wire::WireVariant;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Query API endpoint of the public IYP instance.
pub const DEFAULT_QUERY_API_URL: &str = "https://iyp.iijlab.net/iyp/db/neo4j/query/v2";

/// Transaction API commit endpoint of the public IYP instance.
pub const DEFAULT_TRANSACTION_API_URL: &str = "https://iyp.iijlab.net/iyp/db/neo4j/tx/commit";

/// Default timeout before a query is considered failed.
pub const DEFAULT_TIMEOUT_MS: u64 = 180_000;

/// Overrides the endpoint URL.
pub const ENV_API_URL: &str = "IYP_API_URL";

/// Overrides the request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "IYP_TIMEOUT_MS";

/// Overrides the wire variant (`query` or `transaction`).
pub const ENV_API_VARIANT: &str = "IYP_API_VARIANT";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Graph query provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Settings for the remote graph query endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Endpoint to POST queries to. Defaults per wire variant when unset.
    #[serde(default, alias = "baseUrl")]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms", alias = "timeoutMs")]
    pub timeout_ms: u64,

    /// Which provider envelope to speak.
    #[serde(default)]
    pub variant: WireVariant,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: default_timeout_ms(),
            variant: WireVariant::default(),
        }
    }
}

impl ProviderConfig {
    /// Creates a config for the given variant with default endpoint and timeout.
    pub fn new(variant: WireVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Sets the endpoint URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the configured endpoint, or the public IYP endpoint for the variant.
    pub fn endpoint(&self) -> &str {
        match &self.base_url {
            Some(url) => url,
            None => match self.variant {
                WireVariant::Query => DEFAULT_QUERY_API_URL,
                WireVariant::Transaction => DEFAULT_TRANSACTION_API_URL,
            },
        }
    }

    /// Returns the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Checks that the endpoint is an http(s) URL and the timeout is usable.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(self.endpoint())
            .map_err(|e| ExplorerError::config(format!("Invalid base URL: {e}")))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ExplorerError::config(format!(
                "Invalid scheme '{}'. Expected 'http' or 'https'",
                url.scheme()
            )));
        }

        if self.timeout_ms == 0 {
            return Err(ExplorerError::config("timeout_ms must be greater than zero"));
        }

        Ok(())
    }

    /// Applies `IYP_API_URL`, `IYP_TIMEOUT_MS` and `IYP_API_VARIANT` overrides.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, keyed by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(variant) = lookup(ENV_API_VARIANT) {
            self.variant = variant.parse().map_err(ExplorerError::config)?;
        }
        if let Some(url) = lookup(ENV_API_URL) {
            self.base_url = Some(url);
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            self.timeout_ms = timeout.parse().map_err(|_| {
                ExplorerError::config(format!("{ENV_TIMEOUT_MS} is not a number: '{timeout}'"))
            })?;
        }
        Ok(())
    }

    /// Returns a short description for logs.
    pub fn display_string(&self) -> String {
        format!("{} ({}, {} ms)", self.endpoint(), self.variant, self.timeout_ms)
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("iyp-explorer")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ExplorerError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Loads the default config file, applies environment overrides and validates.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_file(&Self::default_path())?;
        config.provider.apply_env_overrides()?;
        config.provider.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            ExplorerError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
