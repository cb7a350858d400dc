//! Language analysis tools for MCP hosts.
//!
//! This crate exposes four Google Cloud Natural Language operations as MCP
//! tools. Each call validates its `text` argument, makes exactly one REST
//! request and reshapes the response into a compact summary.
//!
//! # Overview
//!
//! - **LanguageBackend**: the seam to the remote service; [`LanguageClient`]
//!   is the HTTP implementation.
//! - **Operation**: the table binding tool names to remote methods and shapers.
//! - **Dispatcher**: routes `tools/call` requests and implements
//!   [`mcp::ToolHandler`].
//!
//! # Example
//!
//! ```no_run
//! use language::{ApiKey, ClientConfig, Dispatcher, LanguageClient};
//! use serde_json::json;
//!
//! # async fn example() -> language::Result<()> {
//! let config = ClientConfig::new(ApiKey::new("AIza...")?);
//! let dispatcher = Dispatcher::new(LanguageClient::new(config)?);
//!
//! let result = dispatcher
//!     .invoke("analyze_sentiment", Some(&json!({"text": "What a lovely day."})))
//!     .await;
//! println!("{}", result.joined_text());
//! # Ok(())
//! # }
//! ```

mod backend;
pub mod catalog;
mod dispatch;
mod document;
mod error;
mod operation;
pub mod shape;

pub use backend::{
    ApiKey, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, LanguageBackend, LanguageClient,
};
pub use dispatch::Dispatcher;
pub use document::{AnalyzeRequest, Document, DocumentType, EncodingType, RemoteRequest};
pub use error::{Error, Result};
pub use operation::Operation;
