//! Metagame document discovery and resolution.
//!
//! Metagames are markdown playbooks kept in a directory tree. The first and
//! second directory levels act as category and subcategory, and any
//! directory may carry a `metadata.json` overlay naming and classifying the
//! documents inside it. Documents are addressed as `metagame://<path>`.

pub mod descriptions;
pub mod discovery;
pub mod error;
pub mod index;
pub mod library;
pub mod overlay;
pub mod resolver;
pub mod types;

pub use discovery::{DirectoryScanner, ScanEntry};
pub use error::{MetagameError, Result};
pub use index::{GENERAL, MetagameTree, ResourceIndex, UNCATEGORIZED, build_tree};
pub use library::MetagameLibrary;
pub use overlay::{METADATA_FILE_NAME, MetadataOverlay, OverlayEntry};
pub use resolver::{ResolveState, ResourceResolver};
pub use types::{
    Complexity, DocumentDescriptor, ListFilter, ListFormat, METAGAME_SCHEME, MARKDOWN_MIME_TYPE,
    ResourceContents, ResourceDescriptor, identifier_for,
};
