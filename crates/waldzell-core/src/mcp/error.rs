//! Error types for MCP operations.

use std::io;
use thiserror::Error;

/// Result type for MCP operations.
pub type Result<T> = std::result::Result<T, McpError>;

/// Errors that can occur while serving MCP.
#[derive(Debug, Error)]
pub enum McpError {
    /// Transport error.
    #[error("MCP transport error: {0}")]
    Transport(String),

    /// Protocol error.
    #[error("MCP protocol error: {0}")]
    Protocol(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// True when the input was not JSON at all, as opposed to JSON that is
    /// not a JSON-RPC message.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Json(e) if e.is_syntax() || e.is_eof())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcp_error_display() {
        let err = McpError::Protocol("Invalid JSON-RPC message format".to_string());
        assert!(err.to_string().contains("protocol error"));
        assert!(err.to_string().contains("Invalid JSON-RPC message format"));
    }

    #[test]
    fn test_mcp_error_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let mcp_err: McpError = io_err.into();
        assert!(matches!(mcp_err, McpError::Io(_)));
    }

    #[test]
    fn test_mcp_error_json_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let mcp_err: McpError = json_err.into();
        assert!(matches!(mcp_err, McpError::Json(_)));
        assert!(mcp_err.is_parse_error());
    }

    #[test]
    fn test_shape_errors_are_not_parse_errors() {
        let shape_err = serde_json::from_str::<Vec<String>>(r#"{"a": 1}"#).unwrap_err();
        assert!(!McpError::from(shape_err).is_parse_error());
        assert!(!McpError::Protocol("no method".to_string()).is_parse_error());
    }
}
