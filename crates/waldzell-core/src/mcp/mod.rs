//! Model Context Protocol (MCP) server for the metagame library.
//!
//! Exposes two tools (`getMetagame`, `listMetagames`) and the
//! `resources/list` / `resources/read` pair over stdio.

pub mod error;
pub mod messages;
pub mod server;
pub mod tools;

pub use error::{McpError, Result};
pub use messages::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpMessage, ServerInfo};
pub use server::McpServer;
pub use tools::{ToolDefinition, tool_definitions};
