//! `waldzell serve`

use waldzell_core::{Config, McpServer};

/// Run the MCP server until stdin closes.
pub async fn execute(config: &Config) -> anyhow::Result<()> {
    if !config.metagames.root.is_dir() {
        // Listing will fail per request; the server still answers everything else.
        tracing::warn!(
            root = %config.metagames.root.display(),
            "Metagame root is not a directory"
        );
    }

    McpServer::new(config)
        .serve_stdio()
        .await
        .map_err(|e| anyhow::anyhow!("MCP server failed: {}", e))
}
