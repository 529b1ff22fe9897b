//! Curated descriptions for the metagames that ship with the library.
//!
//! Consulted only when a document has no `displayName` in its directory
//! metadata.

/// Curated description for a metagame base name, if one exists.
pub fn curated_description(name: &str) -> Option<&'static str> {
    match name {
        "ulysses-protocol" => Some("High-stakes debugging and problem-solving framework"),
        "refactoring-game" => Some("Game-theoretic refactoring under budget constraints"),
        "mcp-server-implementation-game" => Some("End-to-end MCP server implementation"),
        _ => None,
    }
}

/// Generic description used when nothing better is known.
pub fn fallback_description(name: &str) -> String {
    format!("Metagame: {name}")
}
