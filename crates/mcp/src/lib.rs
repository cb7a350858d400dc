//! MCP (Model Context Protocol) server library.
//!
//! This crate provides the protocol types and a stdio server loop for
//! exposing tools to an MCP host. The host talks newline-delimited
//! JSON-RPC 2.0; requests are answered one at a time in arrival order.
//!
//! # Example
//!
//! ```no_run
//! use mcp::{CallToolResult, Server, ServerInfo, Tool, ToolHandler};
//! use serde_json::Value;
//!
//! struct Hello;
//!
//! impl ToolHandler for Hello {
//!     fn tools(&self) -> Vec<Tool> {
//!         vec![Tool {
//!             name: "hello".to_string(),
//!             description: "Say hello".to_string(),
//!             input_schema: serde_json::json!({"type": "object"}),
//!         }]
//!     }
//!
//!     async fn call_tool(&self, _name: &str, _arguments: Option<&Value>) -> CallToolResult {
//!         CallToolResult::text("hello")
//!     }
//! }
//!
//! # async fn example() -> mcp::Result<()> {
//! let info = ServerInfo {
//!     name: "hello".to_string(),
//!     version: "0.1.0".to_string(),
//! };
//! Server::new(info, Hello).serve_stdio().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod protocol;
mod server;

pub use error::{Error, Result};
pub use protocol::{
    CallToolParams, CallToolResult, ClientInfo, DEFAULT_PROTOCOL_VERSION, InitializeParams,
    InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult, RequestId,
    ServerCapabilities, ServerInfo, Tool, ToolContent, ToolsCapability,
};
pub use server::{MAX_MESSAGE_SIZE, Server, ToolHandler};
