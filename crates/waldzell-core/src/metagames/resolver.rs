//! Identifier resolution.
//!
//! Resolution runs as a small state machine:
//!
//! ```text
//! ParseIdentifier -> DirectLookup -> Read -> Done
//!                         |           ^
//!                         v           |
//!                    FallbackScan ----+
//! ```
//!
//! The direct lookup reads `<root>/<candidate>.md`. Only when that file does
//! not exist does the resolver scan the tree for a document whose base name
//! or relative path equals the candidate. Any other I/O failure ends the
//! resolution immediately.

use crate::metagames::discovery::DirectoryScanner;
use crate::metagames::error::{MetagameError, Result};
use crate::metagames::types::{MARKDOWN_EXTENSION, METAGAME_SCHEME, ResourceContents};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// One step of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveState {
    /// Check the scheme and extract the candidate path.
    ParseIdentifier,
    /// Try `<root>/<candidate>.md`.
    DirectLookup { candidate: String },
    /// Search a full scan for a matching document.
    FallbackScan { candidate: String },
    /// Document text has been loaded.
    Read { text: String },
    /// Terminal success.
    Done(ResourceContents),
}

/// Maps `metagame://` identifiers to document content.
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    scanner: DirectoryScanner,
}

impl ResourceResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { scanner: DirectoryScanner::new(root) }
    }

    pub fn root(&self) -> &Path {
        self.scanner.root()
    }

    /// Resolve an identifier to its document content.
    ///
    /// # Errors
    ///
    /// - `InvalidIdentifier` if the scheme is wrong or the path is unusable
    /// - `NotFound` if neither the direct path nor the fallback search match
    /// - `ReadError` for I/O failures other than absence
    pub fn resolve(&self, identifier: &str) -> Result<ResourceContents> {
        let mut state = ResolveState::ParseIdentifier;
        loop {
            state = match self.step(identifier, state)? {
                ResolveState::Done(contents) => return Ok(contents),
                next => next,
            };
        }
    }

    /// Advance a resolution of `identifier` by one state.
    ///
    /// # Errors
    ///
    /// Returns the terminal error of the resolution, if this step produces one.
    pub fn step(&self, identifier: &str, state: ResolveState) -> Result<ResolveState> {
        match state {
            ResolveState::ParseIdentifier => {
                let candidate = parse_identifier(identifier)?;
                Ok(ResolveState::DirectLookup { candidate: candidate.to_string() })
            }
            ResolveState::DirectLookup { candidate } => {
                let path = self.root().join(format!("{candidate}.{MARKDOWN_EXTENSION}"));
                match read_document(&path)? {
                    Some(text) => Ok(ResolveState::Read { text }),
                    None => {
                        tracing::debug!(
                            identifier,
                            path = %path.display(),
                            "Direct lookup missed, scanning for a match"
                        );
                        Ok(ResolveState::FallbackScan { candidate })
                    }
                }
            }
            ResolveState::FallbackScan { candidate } => {
                let path = self.find_match(&candidate)?;
                match read_document(&path)? {
                    Some(text) => Ok(ResolveState::Read { text }),
                    None => Err(MetagameError::NotFound(identifier.to_string())),
                }
            }
            ResolveState::Read { text } => {
                Ok(ResolveState::Done(ResourceContents::markdown(identifier, text)))
            }
            done @ ResolveState::Done(_) => Ok(done),
        }
    }

    /// Path of the first document, in traversal order, whose base name or
    /// relative path equals `candidate`.
    fn find_match(&self, candidate: &str) -> Result<PathBuf> {
        let entries = self.scanner.scan(None)?;
        let mut matches = entries
            .into_iter()
            .filter(|entry| entry.name() == candidate || entry.relative_path == candidate);

        let first = matches
            .next()
            .ok_or_else(|| MetagameError::NotFound(format!("{METAGAME_SCHEME}{candidate}")))?;

        let others: Vec<String> = matches.map(|entry| entry.relative_path).collect();
        if !others.is_empty() {
            tracing::warn!(
                candidate,
                chosen = %first.relative_path,
                ignored = ?others,
                "Ambiguous metagame name, using first match"
            );
        }

        Ok(first.path)
    }
}

/// Strip the scheme and validate the remaining relative path.
///
/// # Errors
///
/// Returns `InvalidIdentifier` for a missing scheme, an empty path, or a path
/// that is absolute or contains `.`/`..` segments.
pub fn parse_identifier(identifier: &str) -> Result<&str> {
    let invalid = || MetagameError::InvalidIdentifier(identifier.to_string());

    let candidate = identifier.strip_prefix(METAGAME_SCHEME).ok_or_else(invalid)?;
    if candidate.is_empty()
        || candidate.split('/').any(|segment| matches!(segment, "" | "." | ".."))
        || !Path::new(candidate).components().all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(invalid());
    }

    Ok(candidate)
}

/// Read a document, mapping "does not exist" to `Ok(None)`.
fn read_document(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(MetagameError::ReadError { path: path.to_path_buf(), source: e }),
    }
}
