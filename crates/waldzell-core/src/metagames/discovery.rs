//! Metagame discovery from the file system.

use crate::metagames::error::{MetagameError, Result};
use crate::metagames::types::MARKDOWN_EXTENSION;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A markdown document found by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    /// Slash-joined path from the root with the extension stripped.
    pub relative_path: String,
    /// Directory holding the file; its metadata overlay applies to this entry.
    pub directory: PathBuf,
    /// Full path of the markdown file.
    pub path: PathBuf,
}

impl ScanEntry {
    /// File base name without extension.
    pub fn name(&self) -> &str {
        self.relative_path.rsplit('/').next().unwrap_or(&self.relative_path)
    }
}

/// Directory scanner.
///
/// Walks the metagame root and yields one entry per markdown file. The walk
/// keeps its own stack of open directories, so nesting depth is not bounded
/// by the call stack. Siblings are visited in file-name order, and symbolic
/// links are followed so that listing sees the same files direct lookup reads.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    root: PathBuf,
}

impl DirectoryScanner {
    /// Create a scanner rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the root for markdown documents.
    ///
    /// With a `category_filter`, first-level directories whose name does not
    /// contain the filter are skipped entirely. Files directly under the root
    /// are always reported.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the root is missing or not a directory, and
    /// `Walk` if any directory below it cannot be read. No partial results
    /// are returned.
    pub fn scan(&self, category_filter: Option<&str>) -> Result<Vec<ScanEntry>> {
        if !self.root.is_dir() {
            return Err(MetagameError::NotFound(self.root.display().to_string()));
        }

        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| descend_into(entry, category_filter));

        let mut entries: Vec<ScanEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_markdown(entry.path()) {
                continue;
            }

            let Some(relative_path) = self.relative_path(entry.path()) else {
                tracing::debug!(path = %entry.path().display(), "Skipping unaddressable file name");
                continue;
            };
            let directory = entry.path().parent().map_or_else(|| self.root.clone(), Path::to_path_buf);
            let scanned = ScanEntry { relative_path, directory, path: entry.into_path() };

            // `a.md` and `a.MD` share a relative path. Direct lookup reads the
            // lowercase file, so that one is kept.
            match positions.get(&scanned.relative_path) {
                Some(&index) => {
                    let existing = &mut entries[index];
                    let replace = has_exact_extension(&scanned.path)
                        && !has_exact_extension(&existing.path);
                    let (kept, ignored) = if replace {
                        (&scanned.path, &existing.path)
                    } else {
                        (&existing.path, &scanned.path)
                    };
                    tracing::warn!(
                        relative_path = %scanned.relative_path,
                        kept = %kept.display(),
                        ignored = %ignored.display(),
                        "Duplicate metagame path differing only in extension case"
                    );
                    if replace {
                        *existing = scanned;
                    }
                }
                None => {
                    positions.insert(scanned.relative_path.clone(), entries.len());
                    entries.push(scanned);
                }
            }
        }

        tracing::debug!(
            root = %self.root.display(),
            category_filter = ?category_filter,
            count = entries.len(),
            "Scanned metagame tree"
        );

        Ok(entries)
    }

    /// Slash-joined path with the extension stripped, or `None` when a
    /// segment could never appear in a valid identifier (`.`, `..`, empty).
    fn relative_path(&self, path: &Path) -> Option<String> {
        let mut segments: Vec<String> = path
            .strip_prefix(&self.root)
            .ok()?
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        let file_name = segments.pop()?;
        let stem = file_name.rsplit_once('.').map_or(file_name.as_str(), |(stem, _)| stem);
        segments.push(stem.to_string());

        if segments.iter().any(|s| matches!(s.as_str(), "" | "." | "..")) {
            return None;
        }
        Some(segments.join("/"))
    }
}

/// Category pruning applies to first-level directories only.
fn descend_into(entry: &DirEntry, category_filter: Option<&str>) -> bool {
    if entry.depth() != 1 || !entry.file_type().is_dir() {
        return true;
    }
    category_filter.is_none_or(|filter| entry.file_name().to_string_lossy().contains(filter))
}

fn has_exact_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == MARKDOWN_EXTENSION)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
}
