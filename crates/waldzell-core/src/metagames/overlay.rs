//! Per-directory metadata overlays.
//!
//! A directory may contain a `metadata.json` describing the documents that sit
//! directly inside it:
//!
//! ```json
//! {
//!   "metagames": [
//!     { "id": "bar", "displayName": "Bar Game", "complexity": "advanced",
//!       "type": "game", "tags": ["refactoring"] }
//!   ]
//! }
//! ```
//!
//! A bare top-level array of entries is accepted as well. Entries are joined
//! to documents by `id == name` and apply only to their own directory.

use crate::metagames::descriptions::{curated_description, fallback_description};
use crate::metagames::types::Complexity;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the metadata file looked up in every directory.
pub const METADATA_FILE_NAME: &str = "metadata.json";

/// One entry of a directory's metadata file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OverlayEntry {
    /// Base name of the document this entry describes.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MetadataFile {
    Entries(Vec<OverlayEntry>),
    Wrapped {
        #[serde(alias = "entries")]
        metagames: Vec<OverlayEntry>,
    },
}

/// Metadata entries declared in a single directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataOverlay {
    entries: Vec<OverlayEntry>,
}

impl MetadataOverlay {
    /// Load the overlay for a directory.
    ///
    /// A missing, unreadable or malformed metadata file yields an empty
    /// overlay; it never fails the surrounding scan.
    pub fn load(directory: &Path) -> Self {
        let path = directory.join(METADATA_FILE_NAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(path = %path.display(), error = %e, "Unreadable metadata file");
                }
                return Self::default();
            }
        };

        match Self::parse(&content) {
            Ok(overlay) => overlay,
            Err(e) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %e,
                    "Ignoring malformed metadata file"
                );
                Self::default()
            }
        }
    }

    /// Parse metadata file content.
    ///
    /// # Errors
    ///
    /// Returns error if the content is not one of the accepted JSON shapes.
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        let entries = match serde_json::from_str::<MetadataFile>(content)? {
            MetadataFile::Entries(entries) | MetadataFile::Wrapped { metagames: entries } => {
                entries
            }
        };
        Ok(Self { entries })
    }

    /// Entry for a document base name, if declared.
    pub fn get(&self, name: &str) -> Option<&OverlayEntry> {
        find_entry(&self.entries, name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Find the entry whose `id` equals `name`. The first declaration wins when a
/// file repeats an id.
pub fn find_entry<'a>(entries: &'a [OverlayEntry], name: &str) -> Option<&'a OverlayEntry> {
    entries.iter().find(|entry| entry.id == name)
}

/// Description for a document: overlay `displayName`, then the curated table,
/// then a generic string.
pub fn resolve_description(entry: Option<&OverlayEntry>, name: &str) -> String {
    entry
        .and_then(|e| e.display_name.clone())
        .or_else(|| curated_description(name).map(str::to_string))
        .unwrap_or_else(|| fallback_description(name))
}
