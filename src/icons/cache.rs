//! In-memory cache of encoded icons.
//!
//! Entries are written once and never evicted. Concurrent readers share the
//! lock; a writer racing another writer for the same key stores an equal value.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::platform::Platform;

/// Cache key. Indexed platforms key by path and resource index, others by
/// path alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IconKey {
    Indexed(PathBuf, i32),
    Path(PathBuf),
}

impl IconKey {
    /// The key scheme used on `platform`.
    pub fn for_platform(platform: Platform, path: &Path, index: i32) -> Self {
        if platform.has_indexed_icons() {
            Self::Indexed(path.to_path_buf(), index)
        } else {
            Self::Path(path.to_path_buf())
        }
    }
}

/// Process-wide icon cache. Construct once and share by reference.
#[derive(Debug, Default)]
pub struct IconCache {
    entries: RwLock<HashMap<IconKey, Arc<[u8]>>>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &IconKey) -> Option<Arc<[u8]>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    pub fn set(&self, key: IconKey, data: Arc<[u8]>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, data);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
