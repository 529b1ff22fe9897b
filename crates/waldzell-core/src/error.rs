//! Error types for Waldzell Core.

use crate::config::ConfigError;
use crate::mcp::McpError;
use crate::metagames::MetagameError;
use thiserror::Error;

/// Core error type for Waldzell operations.
#[derive(Error, Debug)]
pub enum WaldzellError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Metagame discovery or resolution errors
    #[error("Metagame error: {0}")]
    Metagame(#[from] MetagameError),

    /// MCP serving errors
    #[error("MCP error: {0}")]
    Mcp(#[from] McpError),
}

/// Result type alias for Waldzell operations.
pub type Result<T> = std::result::Result<T, WaldzellError>;
