//! The operations exposed to protocol layers, built on the index and resolver.

use crate::config::MetagamesConfig;
use crate::metagames::error::Result;
use crate::metagames::index::ResourceIndex;
use crate::metagames::resolver::ResourceResolver;
use crate::metagames::types::{
    ListFilter, ListFormat, ResourceContents, ResourceDescriptor, identifier_for,
};
use std::path::{Path, PathBuf};

/// Metagame library rooted at one directory.
///
/// Holds no mutable state; concurrent calls each work from their own scan.
#[derive(Debug, Clone)]
pub struct MetagameLibrary {
    index: ResourceIndex,
    resolver: ResourceResolver,
}

impl MetagameLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self { index: ResourceIndex::new(root.clone()), resolver: ResourceResolver::new(root) }
    }

    pub fn from_config(config: &MetagamesConfig) -> Self {
        Self::new(config.root.clone())
    }

    pub fn root(&self) -> &Path {
        self.index.root()
    }

    pub fn index(&self) -> &ResourceIndex {
        &self.index
    }

    pub fn resolver(&self) -> &ResourceResolver {
        &self.resolver
    }

    /// Markdown text of the metagame called `name` (a bare name or a relative
    /// path).
    ///
    /// # Errors
    ///
    /// Propagates resolution errors; see [`ResourceResolver::resolve`].
    pub fn get_document(&self, name: &str) -> Result<String> {
        Ok(self.resolver.resolve(&identifier_for(name))?.text)
    }

    /// Listing payload for `filter` in `format`.
    ///
    /// # Errors
    ///
    /// Returns error if the tree cannot be scanned.
    pub fn list_documents(&self, filter: &ListFilter, format: ListFormat) -> Result<String> {
        self.index.render(filter, format)
    }

    /// Every document as an MCP resource.
    ///
    /// # Errors
    ///
    /// Returns error if the tree cannot be scanned.
    pub fn list_resources(&self) -> Result<Vec<ResourceDescriptor>> {
        Ok(self.index.list(&ListFilter::all())?.into_iter().map(ResourceDescriptor::from).collect())
    }

    /// Content of the resource at `uri`.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors; see [`ResourceResolver::resolve`].
    pub fn read_resource(&self, uri: &str) -> Result<ResourceContents> {
        self.resolver.resolve(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metagames::error::MetagameError;
    use tempfile::TempDir;

    fn library() -> (TempDir, MetagameLibrary) {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("ulysses-protocol.md"), "# Ulysses").unwrap();
        std::fs::create_dir_all(temp_dir.path().join("games")).unwrap();
        std::fs::write(temp_dir.path().join("games/chess.md"), "# Chess").unwrap();
        let library = MetagameLibrary::new(temp_dir.path());
        (temp_dir, library)
    }

    #[test]
    fn test_get_document_by_name_and_path() {
        let (_temp_dir, library) = library();
        assert_eq!(library.get_document("ulysses-protocol").unwrap(), "# Ulysses");
        assert_eq!(library.get_document("chess").unwrap(), "# Chess");
        assert_eq!(library.get_document("games/chess").unwrap(), "# Chess");
    }

    #[test]
    fn test_get_document_invalid_name() {
        let (_temp_dir, library) = library();
        let err = library.get_document("../etc/passwd").unwrap_err();
        assert!(matches!(err, MetagameError::InvalidIdentifier(_)));
        assert!(library.get_document("nothing-here").unwrap_err().is_invalid_name());
    }

    #[test]
    fn test_list_resources() {
        let (_temp_dir, library) = library();
        let resources = library.list_resources().unwrap();

        assert_eq!(resources.len(), 2);
        let ulysses = resources.iter().find(|r| r.name == "ulysses-protocol").unwrap();
        assert_eq!(ulysses.uri, "metagame://ulysses-protocol");
        assert_eq!(ulysses.mime_type, "text/markdown");
        assert_eq!(ulysses.description, "High-stakes debugging and problem-solving framework");
    }

    #[test]
    fn test_read_resource_keeps_requested_uri() {
        let (_temp_dir, library) = library();
        let contents = library.read_resource("metagame://chess").unwrap();
        assert_eq!(contents.uri, "metagame://chess");
        assert_eq!(contents.text, "# Chess");
    }
}
