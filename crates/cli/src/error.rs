//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
///
/// Any of these is fatal: the process prints it and exits with status 1.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is missing, unreadable or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The Language API client could not be built.
    #[error(transparent)]
    Language(#[from] language::Error),

    /// The MCP transport failed.
    #[error(transparent)]
    Mcp(#[from] mcp::Error),

    /// Failed to render output.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
