//! Resource index: scanner plus overlays, filtered into flat or tree views.

use crate::metagames::discovery::DirectoryScanner;
use crate::metagames::error::Result;
use crate::metagames::overlay::MetadataOverlay;
use crate::metagames::types::{DocumentDescriptor, ListFilter, ListFormat};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Tree group for documents without a category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Tree group for documents without a subcategory.
pub const GENERAL: &str = "general";

/// `category -> subcategory -> [name]`.
pub type MetagameTree = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Builds descriptor sets for a metagame root.
///
/// Every call re-scans the tree; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ResourceIndex {
    scanner: DirectoryScanner,
}

#[derive(Serialize)]
struct ListItem<'a> {
    name: &'a str,
    uri: &'a str,
    description: &'a str,
}

impl ResourceIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { scanner: DirectoryScanner::new(root) }
    }

    pub fn root(&self) -> &Path {
        self.scanner.root()
    }

    /// Descriptors matching `filter`, ordered by relative path.
    ///
    /// # Errors
    ///
    /// Returns error if the root is missing or the tree cannot be walked.
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<DocumentDescriptor>> {
        if !filter.tags.is_empty() {
            tracing::debug!(tags = ?filter.tags, "Tag filter accepted but not applied");
        }

        let entries = self.scanner.scan(filter.category.as_deref())?;

        // Loaded at most once per directory, and only for this call.
        let mut overlays: HashMap<PathBuf, MetadataOverlay> = HashMap::new();
        let mut descriptors: Vec<DocumentDescriptor> = entries
            .iter()
            .map(|entry| {
                let overlay = overlays
                    .entry(entry.directory.clone())
                    .or_insert_with(|| MetadataOverlay::load(&entry.directory));
                DocumentDescriptor::from_relative_path(&entry.relative_path, overlay.get(entry.name()))
            })
            .filter(|descriptor| filter.matches(descriptor))
            .collect();

        descriptors.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        tracing::info!(
            root = %self.root().display(),
            count = descriptors.len(),
            "Listed metagames"
        );

        Ok(descriptors)
    }

    /// Descriptors matching `filter`, grouped by category and subcategory.
    ///
    /// # Errors
    ///
    /// Returns error if the root is missing or the tree cannot be walked.
    pub fn tree(&self, filter: &ListFilter) -> Result<MetagameTree> {
        Ok(build_tree(&self.list(filter)?))
    }

    /// Listing payload in the requested format, as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns error if listing or serialization fails.
    pub fn render(&self, filter: &ListFilter, format: ListFormat) -> Result<String> {
        let descriptors = self.list(filter)?;
        let payload = match format {
            ListFormat::List => {
                let items: Vec<ListItem<'_>> = descriptors
                    .iter()
                    .map(|d| ListItem {
                        name: &d.name,
                        uri: &d.identifier,
                        description: &d.description,
                    })
                    .collect();
                serde_json::to_string_pretty(&items)?
            }
            ListFormat::Detailed => serde_json::to_string_pretty(&descriptors)?,
            ListFormat::Tree => serde_json::to_string_pretty(&build_tree(&descriptors))?,
        };
        Ok(payload)
    }
}

/// Group an already filtered list. The number of names across all leaves
/// equals `descriptors.len()`.
pub fn build_tree(descriptors: &[DocumentDescriptor]) -> MetagameTree {
    let mut tree = MetagameTree::new();
    for descriptor in descriptors {
        let category = descriptor.category.as_deref().unwrap_or(UNCATEGORIZED);
        let subcategory = descriptor.subcategory.as_deref().unwrap_or(GENERAL);
        tree.entry(category.to_string())
            .or_default()
            .entry(subcategory.to_string())
            .or_default()
            .push(descriptor.name.clone());
    }
    tree
}

/// Total number of names held in a tree's leaves.
pub fn tree_len(tree: &MetagameTree) -> usize {
    tree.values().flat_map(BTreeMap::values).map(Vec::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metagames::error::MetagameError;
    use crate::metagames::types::Complexity;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    fn fixture() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "refactoring-game.md", "# Refactoring");
        write(root, "foo/bar.md", "# Bar");
        write(
            root,
            "foo/metadata.json",
            r#"{"metagames": [{"id": "bar", "displayName": "Bar Game", "complexity": "beginner"}]}"#,
        );
        write(root, "foo/deep/baz.md", "# Baz");
        write(root, "food/qux.md", "# Qux");
        temp_dir
    }

    #[test]
    fn test_list_all() {
        let temp_dir = fixture();
        let index = ResourceIndex::new(temp_dir.path());
        let descriptors = index.list(&ListFilter::all()).unwrap();

        let paths: Vec<&str> = descriptors.iter().map(|d| d.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["foo/bar", "foo/deep/baz", "food/qux", "refactoring-game"]);

        let bar = &descriptors[0];
        assert_eq!(bar.category.as_deref(), Some("foo"));
        assert_eq!(bar.description, "Bar Game");
        assert_eq!(bar.complexity, Some(Complexity::Beginner));
    }

    #[test]
    fn test_overlay_not_inherited_by_subdirectories() {
        let temp_dir = fixture();
        write(temp_dir.path(), "foo/deep/bar.md", "# Nested bar");

        let index = ResourceIndex::new(temp_dir.path());
        let descriptors = index.list(&ListFilter::all()).unwrap();
        let nested = descriptors.iter().find(|d| d.relative_path == "foo/deep/bar").unwrap();

        assert_eq!(nested.description, "Metagame: bar");
        assert_eq!(nested.complexity, None);
    }

    #[test]
    fn test_list_category_is_exact() {
        let temp_dir = fixture();
        let index = ResourceIndex::new(temp_dir.path());
        let descriptors = index.list(&ListFilter::all().with_category("foo")).unwrap();

        assert_eq!(descriptors.len(), 2);
        assert!(descriptors.iter().all(|d| d.category.as_deref() == Some("foo")));
    }

    #[test]
    fn test_list_subcategory_and_complexity() {
        let temp_dir = fixture();
        let index = ResourceIndex::new(temp_dir.path());

        let deep = index.list(&ListFilter::all().with_subcategory("deep")).unwrap();
        assert_eq!(deep.len(), 1);
        assert_eq!(deep[0].name, "baz");

        let beginner = index.list(&ListFilter::all().with_complexity(Complexity::Beginner)).unwrap();
        assert_eq!(beginner.len(), 1);
        assert_eq!(beginner[0].name, "bar");
    }

    #[test]
    fn test_tags_filter_has_no_effect() {
        let temp_dir = fixture();
        let index = ResourceIndex::new(temp_dir.path());
        let filter = ListFilter { tags: vec!["nothing-has-this".to_string()], ..ListFilter::all() };

        assert_eq!(index.list(&filter).unwrap().len(), index.list(&ListFilter::all()).unwrap().len());
    }

    #[test]
    fn test_tree_groups_with_sentinels() {
        let temp_dir = fixture();
        let index = ResourceIndex::new(temp_dir.path());
        let tree = index.tree(&ListFilter::all()).unwrap();

        assert_eq!(tree[UNCATEGORIZED][GENERAL], vec!["refactoring-game"]);
        assert_eq!(tree["foo"][GENERAL], vec!["bar"]);
        assert_eq!(tree["foo"]["deep"], vec!["baz"]);
        assert_eq!(tree["food"][GENERAL], vec!["qux"]);
        assert_eq!(tree_len(&tree), 4);
    }

    #[test]
    fn test_render_formats() {
        let temp_dir = fixture();
        let index = ResourceIndex::new(temp_dir.path());
        let filter = ListFilter::all().with_category("foo");

        let list: serde_json::Value =
            serde_json::from_str(&index.render(&filter, ListFormat::List).unwrap()).unwrap();
        assert_eq!(list[0]["uri"], "metagame://foo/bar");
        assert!(list[0].get("relativePath").is_none());

        let detailed: serde_json::Value =
            serde_json::from_str(&index.render(&filter, ListFormat::Detailed).unwrap()).unwrap();
        assert_eq!(detailed[0]["relativePath"], "foo/bar");
        assert_eq!(detailed[0]["complexity"], "beginner");

        let tree: serde_json::Value =
            serde_json::from_str(&index.render(&filter, ListFormat::Tree).unwrap()).unwrap();
        assert_eq!(tree["foo"]["deep"][0], "baz");
    }

    #[test]
    fn test_list_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let index = ResourceIndex::new(temp_dir.path().join("nowhere"));
        assert!(matches!(index.list(&ListFilter::all()), Err(MetagameError::NotFound(_))));
    }
}
