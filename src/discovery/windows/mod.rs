//! Windows discovery: shell links in the Start Menu and on the Desktop.

pub mod lnk;
mod shortcut;

pub use shortcut::resolve_shortcut;

use std::path::{Path, PathBuf};

use super::AppFinder;
use super::validate::{Exclusions, SeenExecs, is_valid_app};
use super::walk::files_with_extension;
use crate::models::Application;
use crate::paths::{AppDir, split_icon_location};
use crate::platform::Platform;

/// Finds applications from `.lnk` shortcuts.
#[derive(Debug, Clone)]
pub struct WindowsFinder {
    dirs: Vec<AppDir>,
    exclusions: Exclusions,
}

impl WindowsFinder {
    pub fn new(dirs: Vec<AppDir>, exclusions: Exclusions) -> Self {
        Self { dirs, exclusions }
    }
}

impl AppFinder for WindowsFinder {
    fn find(&self) -> Vec<Application> {
        let mut seen = SeenExecs::default();
        let mut apps = Vec::new();

        for dir in &self.dirs {
            tracing::debug!(dir = ?dir.path, recursive = dir.recursive, "Scanning directory");

            for path in files_with_extension(dir, "lnk") {
                if let Some(app) = process_shortcut(&path, &mut seen, &self.exclusions) {
                    tracing::debug!(name = %app.name, exec = %app.exec, "Found application");
                    apps.push(app);
                }
            }
        }

        apps
    }

    fn name(&self) -> &'static str {
        "windows"
    }
}

/// Resolve one shortcut and apply the validity, exclusion and duplicate
/// filters. On success the icon location is split into path and index.
pub fn process_shortcut(
    path: &Path,
    seen: &mut SeenExecs,
    exclusions: &Exclusions,
) -> Option<Application> {
    let mut app = resolve_shortcut(path);

    if !is_valid_app(&app, Platform::Windows) {
        tracing::debug!(?path, name = %app.name, exec = %app.exec, "Discarded (invalid)");
        return None;
    }
    if let Some(reason) = exclusions.reason(&app) {
        tracing::debug!(name = %app.name, %reason, "Discarded (excluded)");
        return None;
    }
    if !seen.insert(&app.exec) {
        tracing::debug!(name = %app.name, exec = %app.exec, "Discarded (duplicate)");
        return None;
    }

    let (icon_file, icon_index) = app
        .icon
        .as_deref()
        .map(split_icon_location)
        .unwrap_or_default();

    app.icon_path = Some(if icon_file.is_empty() {
        PathBuf::from(&app.exec)
    } else {
        let icon_file = PathBuf::from(icon_file);
        match path.parent() {
            Some(dir) if icon_file.is_relative() => dir.join(icon_file),
            _ => icon_file,
        }
    });
    app.icon_index = icon_index;

    Some(app)
}
