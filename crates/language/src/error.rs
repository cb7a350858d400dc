use reqwest::StatusCode;
use thiserror::Error;

/// Errors from a single tool invocation.
///
/// The `Display` text is what the host sees in an error-flagged result.
#[derive(Debug, Error)]
pub enum Error {
    #[error("'text' argument is required and must be a non-empty string")]
    Validation,

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("Language API request failed with status {status}: {body}")]
    RemoteApi { status: StatusCode, body: String },

    #[error("request to Language API failed: {0}")]
    Transport(String),

    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
