//! Tool server reading JSON-RPC 2.0 messages from stdin and writing one
//! response line per request to stdout.

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, warn};

use crate::cellar::Cellar;
use crate::errors::Result;

use super::tools::{get_tool_definitions, handle_tool_call};
use super::transport::{ErrorCode, JsonRpcRequest, JsonRpcResponse};

/// Protocol revision announced in the `initialize` response.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// The tool server wrapping a `Cellar` instance.
pub struct McpServer {
    cellar: Cellar,
}

impl McpServer {
    /// Creates a server answering tool calls with `cellar`.
    pub fn new(cellar: Cellar) -> Self {
        Self { cellar }
    }

    /// Serves stdin/stdout until stdin is closed.
    pub async fn run(&self) -> Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.serve(reader, &mut stdout).await
    }

    /// Serves line-delimited requests from `reader`, writing responses to
    /// `writer`, until the reader is exhausted.
    pub async fn serve<R, W>(&self, reader: R, writer: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(line) {
                Ok(request) => self.handle_request(&request),
                Err(e) => {
                    warn!(error = %e, "unparsable JSON-RPC message");
                    Some(JsonRpcResponse::error(
                        Value::Null,
                        ErrorCode::ParseError,
                        format!("failed to parse JSON-RPC request: {}", e),
                    ))
                }
            };

            let Some(resp) = response else {
                continue;
            };
            let json_line = match serde_json::to_string(&resp) {
                Ok(s) => s,
                Err(e) => {
                    error!(error = %e, "failed to serialize response");
                    continue;
                }
            };
            writer.write_all(json_line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        Ok(())
    }

    /// Dispatches a parsed request. Returns `None` for notifications.
    pub fn handle_request(&self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "handling request");
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(id)),
            "initialized" | "notifications/initialized" => None,
            "tools/list" => Some(JsonRpcResponse::success(
                id,
                json!({ "tools": get_tool_definitions() }),
            )),
            "tools/call" => Some(self.handle_tools_call(id, request.params.as_ref())),
            "ping" => Some(JsonRpcResponse::success(id, json!({}))),
            _ if request.is_notification() => None,
            _ => Some(JsonRpcResponse::error(
                id,
                ErrorCode::MethodNotFound,
                format!("method not found: {}", request.method),
            )),
        }
    }

    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "cellar-lookup",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        )
    }

    fn handle_tools_call(&self, id: Value, params: Option<&Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(
                id,
                ErrorCode::InvalidParams,
                "missing params for tools/call".to_string(),
            );
        };

        let Some(tool_name) = params.get("name").and_then(|v| v.as_str()) else {
            return JsonRpcResponse::error(
                id,
                ErrorCode::InvalidParams,
                "missing 'name' in tools/call params".to_string(),
            );
        };

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        match handle_tool_call(&self.cellar, tool_name, arguments) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                warn!(tool = tool_name, error = %e, "tool call rejected");
                JsonRpcResponse::from_error(id, &e)
            }
        }
    }
}
