//! MCP (Model Context Protocol) tool server.
//!
//! Provides a JSON-RPC 2.0 interface over stdio exposing CELEX validation and
//! the ECLI reverse lookup as tools.

/// Server loop and request dispatch.
pub mod server;

/// Tool definitions and dispatch.
pub mod tools;

/// JSON-RPC 2.0 transport types.
pub mod transport;

pub use server::McpServer;
pub use tools::{get_tool_definitions, handle_tool_call, ToolDefinition};
pub use transport::{ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
