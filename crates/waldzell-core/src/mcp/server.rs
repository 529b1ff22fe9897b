//! MCP server exposing the metagame library over JSON-RPC.
//!
//! Messages are newline-delimited JSON. Each request is handled on the
//! blocking pool, so a slow scan never holds up other requests; responses
//! are written in completion order through a single writer task.

use crate::config::Config;
use crate::mcp::messages::{
    InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpMessage, ServerInfo,
    error_codes,
};
use crate::mcp::tools::{
    GET_METAGAME, LIST_METAGAMES, ListMetagamesArgs, parse_args, parse_get_metagame_args,
    text_content, tool_definitions,
};
use crate::mcp::{McpError, Result};
use crate::metagames::MetagameLibrary;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Metagame MCP server.
#[derive(Debug, Clone)]
pub struct McpServer {
    library: Arc<MetagameLibrary>,
    info: ServerInfo,
}

impl McpServer {
    /// Create a server from loaded configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_library(
            MetagameLibrary::from_config(&config.metagames),
            ServerInfo { name: config.server.name.clone(), version: config.server.version.clone() },
        )
    }

    pub fn with_library(library: MetagameLibrary, info: ServerInfo) -> Self {
        Self { library: Arc::new(library), info }
    }

    pub fn library(&self) -> &MetagameLibrary {
        &self.library
    }

    /// Handle one line of input. Returns `None` when no reply is due
    /// (notifications, stray responses, blank lines).
    pub fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        if line.trim().is_empty() {
            return None;
        }

        match McpMessage::from_bytes(line.as_bytes()) {
            Ok(McpMessage::Request(request)) => Some(self.handle_request(&request)),
            Ok(McpMessage::Notification(notification)) => {
                debug!(method = %notification.method, "Received notification");
                None
            }
            Ok(McpMessage::Response(response)) => {
                warn!(id = ?response.id, "Ignoring unsolicited response");
                None
            }
            Err(e) if e.is_parse_error() => {
                warn!(error = %e, "Dropping unparsable message");
                Some(JsonRpcResponse::failure(
                    None,
                    JsonRpcError::new(error_codes::PARSE_ERROR, format!("Parse error: {e}")),
                ))
            }
            Err(e) => {
                warn!(error = %e, "Dropping invalid JSON-RPC message");
                Some(JsonRpcResponse::failure(
                    recover_id(line),
                    JsonRpcError::new(error_codes::INVALID_REQUEST, format!("Invalid request: {e}")),
                ))
            }
        }
    }

    /// Handle a JSON-RPC request.
    pub fn handle_request(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let request_id = request.id.clone();
        debug!(method = %request.method, id = ?request_id, "Handling request");

        let result = match request.method.as_str() {
            "initialize" => serde_json::to_value(InitializeResult::new(self.info.clone()))
                .map_err(|e| JsonRpcError::internal(e.to_string())),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => self.call_tool(request.params.as_ref()),
            "resources/list" => self.list_resources(),
            "resources/read" => self.read_resource(request.params.as_ref()),
            other => Err(JsonRpcError::method_not_found(other)),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(request_id, value),
            Err(error) => JsonRpcResponse::failure(request_id, error),
        }
    }

    fn call_tool(&self, params: Option<&Value>) -> std::result::Result<Value, JsonRpcError> {
        let Some(tool_name) = params.and_then(|p| p.get("name")).and_then(Value::as_str) else {
            return Err(JsonRpcError::invalid_params("Missing 'name' parameter in tools/call"));
        };
        let arguments = params.and_then(|p| p.get("arguments"));

        match tool_name {
            GET_METAGAME => self.get_metagame(arguments),
            LIST_METAGAMES => self.list_metagames(arguments),
            other => Err(JsonRpcError::invalid_params(format!("Unknown tool: {other}"))),
        }
    }

    fn get_metagame(&self, arguments: Option<&Value>) -> std::result::Result<Value, JsonRpcError> {
        let args = parse_get_metagame_args(arguments)?;
        match self.library.get_document(&args.name) {
            Ok(text) => Ok(text_content(text)),
            Err(e) if e.is_invalid_name() => {
                debug!(name = %args.name, error = %e, "Metagame lookup failed");
                Err(JsonRpcError::invalid_params(format!("Invalid metagame name: {}", args.name)))
            }
            Err(e) => {
                warn!(name = %args.name, error = %e, "Metagame read failed");
                Err(JsonRpcError::internal("File read error"))
            }
        }
    }

    fn list_metagames(&self, arguments: Option<&Value>) -> std::result::Result<Value, JsonRpcError> {
        let args: ListMetagamesArgs = parse_args(arguments)?;
        self.library
            .list_documents(&args.filter(), args.format)
            .map(text_content)
            .map_err(|e| JsonRpcError::internal(e.to_string()))
    }

    fn list_resources(&self) -> std::result::Result<Value, JsonRpcError> {
        let resources =
            self.library.list_resources().map_err(|e| JsonRpcError::internal(e.to_string()))?;
        Ok(json!({ "resources": resources }))
    }

    fn read_resource(&self, params: Option<&Value>) -> std::result::Result<Value, JsonRpcError> {
        let Some(uri) = params.and_then(|p| p.get("uri")).and_then(Value::as_str) else {
            return Err(JsonRpcError::invalid_params("Missing 'uri' parameter in resources/read"));
        };

        let contents = self.library.read_resource(uri).map_err(|e| {
            JsonRpcError::internal(format!("Failed to read resource: {uri}"))
                .with_data(json!({ "error": e.to_string() }))
        })?;
        Ok(json!({ "contents": [contents] }))
    }

    /// Serve newline-delimited JSON-RPC from `reader`, replying on `writer`,
    /// until `reader` reaches end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub async fn serve<R, W>(self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

        let writer_task = tokio::spawn(async move {
            let mut writer = writer;
            while let Some(response) = rx.recv().await {
                let bytes = serde_json::to_vec(&response)?;
                writer.write_all(&bytes).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
            Ok::<(), McpError>(())
        });

        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            if tx.is_closed() {
                warn!("Response writer stopped, no longer reading requests");
                break;
            }

            let server = self.clone();
            let tx = tx.clone();
            tokio::task::spawn_blocking(move || {
                if let Some(response) = server.handle_line(&line) {
                    if tx.send(response).is_err() {
                        debug!("Response writer stopped, reply dropped");
                    }
                }
            });
        }

        drop(tx);
        writer_task
            .await
            .map_err(|e| McpError::Transport(format!("Writer task failed: {e}")))??;

        debug!("Input closed, server stopped");
        Ok(())
    }

    /// Serve on the process's stdin and stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if stdio fails.
    pub async fn serve_stdio(self) -> Result<()> {
        info!(
            name = %self.info.name,
            version = %self.info.version,
            root = %self.library.root().display(),
            "Starting metagame MCP server on stdio"
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }
}

/// Best-effort `id` of a message that is JSON but not valid JSON-RPC.
fn recover_id(line: &str) -> Option<Value> {
    serde_json::from_str::<Value>(line)
        .ok()
        .and_then(|value| value.get("id").cloned())
        .filter(|id| id.is_string() || id.is_number())
}
