//! Path and format helpers shared by discovery and icon resolution.

pub mod app_dirs;
pub mod env;
mod icon_location;
mod sanitize;

pub use app_dirs::{AppDir, application_dirs, is_desktop_dir};
pub use env::{expand_env, expand_to_absolute};
pub use icon_location::{join_icon_location, split_icon_location};
pub use sanitize::sanitize_resource_name;

/// Whether `path` ends with one of `extensions` (lowercase, without dot),
/// ignoring case.
pub fn has_extension(path: &std::path::Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}
