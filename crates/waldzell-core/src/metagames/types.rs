//! Core types for metagame documents.

use crate::metagames::error::MetagameError;
use crate::metagames::overlay::OverlayEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scheme prefix shared by every metagame identifier.
pub const METAGAME_SCHEME: &str = "metagame://";

/// Extension of documents picked up by the scanner (compared case-insensitively).
pub const MARKDOWN_EXTENSION: &str = "md";

/// Content type reported for every resolved document.
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";

/// Builds the identifier for a relative path (`foo/bar` -> `metagame://foo/bar`).
pub fn identifier_for(relative_path: &str) -> String {
    format!("{METAGAME_SCHEME}{relative_path}")
}

/// One markdown document discovered under the metagame root.
///
/// Descriptors live for a single request; nothing holds on to them between
/// calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDescriptor {
    /// File base name without extension. Not unique across directories.
    pub name: String,
    /// Slash-joined path from the root, extension stripped. Unique per scan.
    pub relative_path: String,
    /// `metagame://` followed by `relative_path`.
    #[serde(rename = "uri")]
    pub identifier: String,
    /// Resolved description (overlay, curated table, then generic fallback).
    pub description: String,
    /// First directory segment of `relative_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Second directory segment of `relative_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl DocumentDescriptor {
    /// Builds a descriptor from a scanned relative path and the overlay entry
    /// declared for it in the same directory, if any.
    pub fn from_relative_path(relative_path: &str, entry: Option<&OverlayEntry>) -> Self {
        let mut segments: Vec<&str> = relative_path.split('/').collect();
        let name = segments.pop().unwrap_or_default().to_string();
        let category = segments.first().map(|s| (*s).to_string());
        let subcategory = segments.get(1).map(|s| (*s).to_string());

        Self {
            description: crate::metagames::overlay::resolve_description(entry, &name),
            name,
            relative_path: relative_path.to_string(),
            identifier: identifier_for(relative_path),
            category,
            subcategory,
            complexity: entry.and_then(|e| e.complexity),
            kind: entry.and_then(|e| e.kind.clone()),
            tags: entry.and_then(|e| e.tags.clone()),
        }
    }
}

/// Difficulty tier attached to a metagame through directory metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Complexity::Beginner => write!(f, "beginner"),
            Complexity::Intermediate => write!(f, "intermediate"),
            Complexity::Advanced => write!(f, "advanced"),
            Complexity::Expert => write!(f, "expert"),
        }
    }
}

impl FromStr for Complexity {
    type Err = MetagameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "expert" => Ok(Self::Expert),
            other => Err(MetagameError::InvalidFilter(format!(
                "unknown complexity '{other}' (expected beginner, intermediate, advanced or expert)"
            ))),
        }
    }
}

/// Filter applied by the resource index. Every field is optional; a missing
/// field places no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub complexity: Option<Complexity>,
    /// Accepted for compatibility with callers but not applied: the matching
    /// semantics for tags have never been defined.
    pub tags: Vec<String>,
}

impl ListFilter {
    /// Filter with no constraints.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to an exact category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restricts to an exact subcategory.
    #[must_use]
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Restricts to an exact complexity tier.
    #[must_use]
    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = Some(complexity);
        self
    }

    /// Checks if a descriptor satisfies the category, subcategory and
    /// complexity constraints.
    pub fn matches(&self, descriptor: &DocumentDescriptor) -> bool {
        fn exact<T: PartialEq>(wanted: Option<&T>, actual: Option<&T>) -> bool {
            wanted.is_none_or(|w| actual == Some(w))
        }

        exact(self.category.as_ref(), descriptor.category.as_ref())
            && exact(self.subcategory.as_ref(), descriptor.subcategory.as_ref())
            && exact(self.complexity.as_ref(), descriptor.complexity.as_ref())
    }
}

/// Shape of the listing payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    /// `{name, uri, description}` per document.
    #[default]
    List,
    /// `category -> subcategory -> [name]`.
    Tree,
    /// Full descriptors.
    Detailed,
}

impl fmt::Display for ListFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListFormat::List => write!(f, "list"),
            ListFormat::Tree => write!(f, "tree"),
            ListFormat::Detailed => write!(f, "detailed"),
        }
    }
}

impl FromStr for ListFormat {
    type Err = MetagameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list" => Ok(Self::List),
            "tree" => Ok(Self::Tree),
            "detailed" => Ok(Self::Detailed),
            other => Err(MetagameError::InvalidFilter(format!(
                "unknown format '{other}' (expected list, tree or detailed)"
            ))),
        }
    }
}

/// Entry returned by `resources/list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

impl From<DocumentDescriptor> for ResourceDescriptor {
    fn from(descriptor: DocumentDescriptor) -> Self {
        Self {
            uri: descriptor.identifier,
            name: descriptor.name,
            description: descriptor.description,
            mime_type: MARKDOWN_MIME_TYPE.to_string(),
        }
    }
}

/// Text of a resolved document, tagged with the identifier that was asked for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

impl ResourceContents {
    /// Wraps markdown text for the given identifier.
    pub fn markdown(uri: impl Into<String>, text: impl Into<String>) -> Self {
        Self { uri: uri.into(), mime_type: MARKDOWN_MIME_TYPE.to_string(), text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay_entry(id: &str) -> OverlayEntry {
        OverlayEntry {
            id: id.to_string(),
            display_name: Some("Bar Game".to_string()),
            complexity: Some(Complexity::Advanced),
            kind: Some("game".to_string()),
            tags: Some(vec!["refactoring".to_string()]),
        }
    }

    #[test]
    fn test_descriptor_at_root_has_no_category() {
        let descriptor = DocumentDescriptor::from_relative_path("refactoring-game", None);
        assert_eq!(descriptor.name, "refactoring-game");
        assert_eq!(descriptor.identifier, "metagame://refactoring-game");
        assert_eq!(descriptor.category, None);
        assert_eq!(descriptor.subcategory, None);
        assert_eq!(
            descriptor.description,
            "Game-theoretic refactoring under budget constraints"
        );
    }

    #[test]
    fn test_descriptor_segments() {
        let descriptor = DocumentDescriptor::from_relative_path("software/testing/tdd-kata", None);
        assert_eq!(descriptor.name, "tdd-kata");
        assert_eq!(descriptor.category.as_deref(), Some("software"));
        assert_eq!(descriptor.subcategory.as_deref(), Some("testing"));
        assert_eq!(descriptor.identifier, "metagame://software/testing/tdd-kata");
    }

    #[test]
    fn test_descriptor_takes_overlay_fields() {
        let entry = overlay_entry("bar");
        let descriptor = DocumentDescriptor::from_relative_path("foo/bar", Some(&entry));
        assert_eq!(descriptor.category.as_deref(), Some("foo"));
        assert_eq!(descriptor.subcategory, None);
        assert_eq!(descriptor.description, "Bar Game");
        assert_eq!(descriptor.complexity, Some(Complexity::Advanced));
        assert_eq!(descriptor.kind.as_deref(), Some("game"));
        assert_eq!(descriptor.tags, Some(vec!["refactoring".to_string()]));
    }

    #[test]
    fn test_descriptor_serializes_uri_and_type() {
        let entry = overlay_entry("bar");
        let descriptor = DocumentDescriptor::from_relative_path("foo/bar", Some(&entry));
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["uri"], "metagame://foo/bar");
        assert_eq!(json["relativePath"], "foo/bar");
        assert_eq!(json["type"], "game");
        assert_eq!(json["complexity"], "advanced");
        assert!(json.get("subcategory").is_none());
    }

    #[test]
    fn test_complexity_from_str() {
        assert_eq!("Expert".parse::<Complexity>().unwrap(), Complexity::Expert);
        assert!(matches!(
            "legendary".parse::<Complexity>(),
            Err(MetagameError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_filter_matches_exactly() {
        let descriptor = DocumentDescriptor::from_relative_path("software/testing/tdd-kata", None);

        assert!(ListFilter::all().matches(&descriptor));
        assert!(ListFilter::all().with_category("software").matches(&descriptor));
        assert!(!ListFilter::all().with_category("soft").matches(&descriptor));
        assert!(ListFilter::all().with_subcategory("testing").matches(&descriptor));
        assert!(!ListFilter::all().with_complexity(Complexity::Beginner).matches(&descriptor));
    }

    #[test]
    fn test_list_format_default_and_parse() {
        assert_eq!(ListFormat::default(), ListFormat::List);
        assert_eq!("TREE".parse::<ListFormat>().unwrap(), ListFormat::Tree);
        assert!("table".parse::<ListFormat>().is_err());
    }
}
