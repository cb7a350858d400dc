//! Google Cloud Natural Language REST backend.

use std::time::{Duration, Instant};

use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use super::LanguageBackend;
use crate::document::RemoteRequest;
use crate::{Error, Result};

/// Documents collection of the v1 REST API. Methods are addressed as
/// `{base}:{method}`.
pub const DEFAULT_BASE_URL: &str = "https://language.googleapis.com/v1/documents";

/// Hard upper bound for one request. Not a retry budget.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// API key credential.
///
/// Sent only as the `key` query parameter; `Debug` and `Display` never show
/// the secret.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(Error::Config("API key is empty".to_string()));
        }
        Ok(Self(key))
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl std::fmt::Display for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Immutable client configuration, fixed at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration with the default base URL and timeout.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for the Language API.
///
/// Holds one connection pool for the life of the process.
pub struct LanguageClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl LanguageClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {}: {e}", config.base_url)))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn method_url(&self, endpoint: &str) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        Url::parse_with_params(
            &format!("{base}:{endpoint}"),
            &[("key", self.config.api_key.expose())],
        )
        .map_err(|e| Error::Transport(format!("invalid request URL for {endpoint}: {e}")))
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Transport(format!("timed out after {:?}", self.config.timeout))
        } else {
            // The URL carries the API key.
            Error::Transport(e.without_url().to_string())
        }
    }
}

impl std::fmt::Display for LanguageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "language({})", self.config.base_url)
    }
}

impl LanguageBackend for LanguageClient {
    async fn analyze(&self, request: &RemoteRequest) -> Result<Value> {
        let endpoint = request.endpoint;
        let url = self.method_url(endpoint)?;
        let started = Instant::now();

        let response = self
            .client
            .post(url)
            .header("accept", "application/json")
            .json(&request.payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(endpoint, %status, "Language API returned an error");
            return Err(Error::RemoteApi { status, body });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!(
            endpoint,
            %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Language API call complete"
        );
        Ok(body)
    }
}
