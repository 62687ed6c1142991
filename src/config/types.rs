//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default icon size requested from the freedesktop icon lookup.
pub const DEFAULT_ICON_SIZE: u16 = 64;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Names or executable base names that are never listed (Windows).
    pub excluded_apps: Vec<String>,
    /// Extra case-insensitive name substrings that are never listed (Windows).
    ///
    /// Added to the built-in `uninstall` and `settings` keywords.
    pub excluded_keywords: Vec<String>,
    /// Additional directories scanned recursively after the platform defaults.
    pub extra_dirs: Vec<PathBuf>,
    /// Icon theme used to resolve bare icon names on Linux.
    pub icon_theme: Option<String>,
    /// Preferred icon size for freedesktop lookups.
    pub icon_size: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            excluded_apps: vec![
                "unins000.exe".to_string(),
                "uninst.exe".to_string(),
                "uninstall.exe".to_string(),
            ],
            excluded_keywords: Vec::new(),
            extra_dirs: Vec::new(),
            icon_theme: None,
            icon_size: DEFAULT_ICON_SIZE,
        }
    }
}
