//! Deterministic directory walking.

use std::path::PathBuf;
use walkdir::WalkDir;

use crate::paths::{AppDir, has_extension};

/// Files under `dir` with the given extension, in lexical order.
///
/// Non-recursive directories yield only their direct children. Unreadable
/// entries are skipped.
pub fn files_with_extension(dir: &AppDir, extension: &str) -> Vec<PathBuf> {
    if !dir.path.is_dir() {
        tracing::debug!(dir = ?dir.path, "Directory does not exist, skipping");
        return Vec::new();
    }

    let max_depth = if dir.recursive { usize::MAX } else { 1 };

    WalkDir::new(&dir.path)
        .follow_links(true)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(%e, "Skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, &[extension]))
        .collect()
}
