//! Configuration loading from language-mcp.toml and the environment.

use language::{ApiKey, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Config file read from the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "language-mcp.toml";

/// Environment variable holding the API key. Overrides the config file.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Language API settings.
    #[serde(default)]
    pub language: LanguageConfig,
}

/// Language API settings.
#[derive(Deserialize)]
pub struct LanguageConfig {
    /// API key. May be omitted when `GOOGLE_API_KEY` is set.
    pub api_key: Option<String>,

    /// Documents collection URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for LanguageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load the explicit config file, or the default one if it exists.
    ///
    /// An explicit path must be readable; a missing default file just means
    /// defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load(CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Apply an API key from the environment, if one is set.
    pub fn with_env_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.language.api_key = Some(key);
        }
        self
    }

    /// Build the client configuration.
    ///
    /// Fails when no API key is configured.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let key = self
            .language
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let api_key = ApiKey::new(key).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.language.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "language.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(ClientConfig::new(api_key)
            .base_url(&self.language.base_url)
            .timeout(Duration::from_secs(self.language.timeout_secs)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("API key not configured: set GOOGLE_API_KEY or language.api_key in language-mcp.toml")]
    MissingApiKey,

    #[error("invalid config: {0}")]
    Invalid(String),
}
