//! Language API backend abstraction.
//!
//! The dispatcher talks to the remote service through [`LanguageBackend`],
//! so the HTTP client can be swapped for a fake in tests.

mod google;

pub use google::{ApiKey, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, LanguageClient};

use crate::Result;
use crate::document::RemoteRequest;
use serde_json::Value;
use std::future::Future;

/// Trait for Language API backends.
pub trait LanguageBackend: Send + Sync {
    /// Send one analysis request and return the raw JSON response.
    ///
    /// Implementations must not retry.
    fn analyze(&self, request: &RemoteRequest) -> impl Future<Output = Result<Value>> + Send;
}
