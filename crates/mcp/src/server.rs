//! MCP stdio server loop (newline-delimited JSON-RPC).

use std::future::Future;

use serde_json::Value;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::protocol::{
    CallToolParams, CallToolResult, DEFAULT_PROTOCOL_VERSION, InitializeParams, InitializeResult,
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities,
    ServerInfo, Tool,
};

/// Maximum size of a single inbound message line (1MB).
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// One inbound line as read off the wire.
enum Frame {
    Line,
    Oversized(usize),
}

/// Trait for the tool surface a server exposes.
///
/// Implementations advertise their tools and execute calls. A call always
/// resolves to a [`CallToolResult`]; failures are reported through its
/// `is_error` flag rather than as protocol errors.
pub trait ToolHandler: Send + Sync {
    /// Tools advertised through `tools/list`.
    fn tools(&self) -> Vec<Tool>;

    /// Execute a tool call.
    fn call_tool(
        &self,
        name: &str,
        arguments: Option<&Value>,
    ) -> impl Future<Output = CallToolResult> + Send;
}

/// An MCP server answering requests one at a time, in arrival order.
pub struct Server<H> {
    info: ServerInfo,
    handler: H,
}

impl<H: ToolHandler> Server<H> {
    pub fn new(info: ServerInfo, handler: H) -> Self {
        Self { info, handler }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve newline-delimited JSON-RPC from `reader`, writing responses to
    /// `writer`. Returns when the reader reaches EOF.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        while let Some(frame) = read_frame(&mut reader, &mut buf).await? {
            let response = match frame {
                Frame::Oversized(size) => {
                    warn!(size, max = MAX_MESSAGE_SIZE, "message too large");
                    Some(JsonRpcResponse::failure(
                        None,
                        JsonRpcError::invalid_request(format!(
                            "message of {size} bytes exceeds {MAX_MESSAGE_SIZE}"
                        )),
                    ))
                }
                Frame::Line if buf.iter().all(u8::is_ascii_whitespace) => continue,
                Frame::Line => self.handle_line(&buf).await,
            };

            let Some(response) = response else {
                continue;
            };

            let response_json = serde_json::to_string(&response)?;
            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        debug!("input closed, stopping server");
        Ok(())
    }

    /// Handle one raw message line. Returns `None` for notifications.
    ///
    /// Bytes that are not valid UTF-8 JSON are a parse error.
    pub async fn handle_line(&self, line: &[u8]) -> Option<JsonRpcResponse> {
        match serde_json::from_slice::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!(error = %e, "unparseable message");
                Some(JsonRpcResponse::failure(None, JsonRpcError::parse_error(e)))
            }
        }
    }

    /// Handle one decoded request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "notification");
            return None;
        };

        debug!(method = %request.method, id = ?id, "request");

        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(Value::Object(Default::default())),
            "tools/list" => to_result(ListToolsResult {
                tools: self.handler.tools(),
            }),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(Some(id), error),
        })
    }

    fn initialize(&self, params: Option<Value>) -> std::result::Result<Value, JsonRpcError> {
        let params: InitializeParams = match params {
            Some(p) => serde_json::from_value(p).map_err(JsonRpcError::invalid_params)?,
            None => InitializeParams::default(),
        };

        let client = params
            .client_info
            .as_ref()
            .map_or("unknown", |c| c.name.as_str());
        info!(client, protocol = ?params.protocol_version, "initialize");

        to_result(InitializeResult {
            protocol_version: params
                .protocol_version
                .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string()),
            capabilities: ServerCapabilities::tools_only(),
            server_info: self.info.clone(),
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> std::result::Result<Value, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::invalid_params("missing params"))?;
        let params: CallToolParams =
            serde_json::from_value(params).map_err(JsonRpcError::invalid_params)?;

        let result = self
            .handler
            .call_tool(&params.name, params.arguments.as_ref())
            .await;
        to_result(result)
    }
}

/// Read the next line into `buf` without holding more than
/// `MAX_MESSAGE_SIZE + 1` bytes of it. The trailing newline is stripped.
/// Returns `None` at EOF.
async fn read_frame<R>(reader: &mut R, buf: &mut Vec<u8>) -> Result<Option<Frame>>
where
    R: AsyncBufRead + Unpin,
{
    let limit = MAX_MESSAGE_SIZE as u64 + 1;

    buf.clear();
    let read = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
    if read == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        return Ok(Some(Frame::Line));
    }
    if buf.len() <= MAX_MESSAGE_SIZE {
        // final line without a newline
        return Ok(Some(Frame::Line));
    }

    // Drop the rest of the oversized line in bounded chunks.
    let mut size = read;
    loop {
        buf.clear();
        let read = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
        if buf.last() == Some(&b'\n') {
            size += read - 1;
            break;
        }
        size += read;
        if read == 0 {
            break;
        }
    }
    buf.clear();
    Ok(Some(Frame::Oversized(size)))
}

fn to_result(value: impl serde::Serialize) -> std::result::Result<Value, JsonRpcError> {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::new(JsonRpcError::INTERNAL_ERROR, format!("internal error: {e}")))
}
