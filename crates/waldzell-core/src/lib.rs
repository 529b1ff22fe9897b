//! Waldzell Core - Metagame discovery and serving.
//!
//! This crate provides:
//! - Discovery of markdown metagames under a root directory, with optional
//!   per-directory `metadata.json` overlays
//! - Flat and tree listings filtered by category, subcategory and complexity
//! - Resolution of `metagame://` identifiers to document text
//! - An MCP server exposing all of the above over stdio
//!
//! # Example
//!
//! ```rust,no_run
//! use waldzell_core::{config::Config, mcp::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> waldzell_core::error::Result<()> {
//!     let config = Config::load(None)?;
//!     McpServer::new(&config).serve_stdio().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod mcp;
pub mod metagames;

pub use config::Config;
pub use error::{Result, WaldzellError};
pub use mcp::McpServer;
pub use metagames::{
    Complexity, DocumentDescriptor, ListFilter, ListFormat, MetagameError, MetagameLibrary,
    ResourceContents, ResourceIndex, ResourceResolver,
};
