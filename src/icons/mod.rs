//! Icon resolution for discovered applications.
//!
//! Every icon comes out as PNG, whatever the source: an image file, an icon
//! container, an executable's icon resources, or the shell's icon for a file.

mod backend;
mod cache;
pub mod decode;
mod pipeline;
#[cfg(windows)]
mod win32;

pub use backend::{IconBackend, SystemBackend};
pub use cache::{IconCache, IconKey};
pub use pipeline::IconResolver;

use std::sync::Arc;

use crate::paths::sanitize_resource_name;

/// A resolved icon, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconResource {
    /// File-safe name derived from the application name, ending in `.png`.
    pub name: String,
    /// PNG bytes, shared with the cache.
    pub data: Arc<[u8]>,
}

impl IconResource {
    pub fn new(app_name: &str, data: Arc<[u8]>) -> Self {
        Self {
            name: format!("{}.png", sanitize_resource_name(app_name)),
            data,
        }
    }
}
