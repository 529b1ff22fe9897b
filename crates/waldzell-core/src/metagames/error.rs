//! Error types for metagame operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or resolving metagames.
#[derive(Error, Debug)]
pub enum MetagameError {
    /// The metagame root or a requested document does not exist.
    #[error("Metagame not found: {0}")]
    NotFound(String),

    /// Identifier is missing the `metagame://` scheme or names an unusable path.
    #[error("Invalid metagame identifier: {0}. Identifier must start with 'metagame://'")]
    InvalidIdentifier(String),

    /// The document exists but could not be read.
    #[error("Failed to read metagame at {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory under the root could not be traversed.
    #[error("Failed to scan metagame tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// A filter or format argument could not be understood.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Listing payload could not be serialized.
    #[error("Failed to serialize metagame listing: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MetagameError {
    /// True for failures the caller can fix by asking for a different name.
    pub fn is_invalid_name(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidIdentifier(_))
    }
}

/// Result type alias for metagame operations.
pub type Result<T> = std::result::Result<T, MetagameError>;
