//! Shortcut resolution: turns a `.lnk` file into an application record.

use std::fs;
use std::path::{Path, PathBuf};

use super::lnk::ShellLink;
use crate::models::Application;
use crate::paths::env::absolute;
use crate::paths::{expand_env, has_extension, join_icon_location, split_icon_location};

/// Icon sources that may still yield resources when a plain existence check
/// fails (long paths, file system virtualization).
const RESOURCE_EXTENSIONS: &[&str] = &["exe", "dll"];

/// Resolve a shortcut file.
///
/// Best effort: fields that cannot be resolved stay empty, which the
/// validator later rejects. The raw `icon` field is left as a `path,index`
/// location for the caller to split.
pub fn resolve_shortcut(path: &Path) -> Application {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut app = Application::new(name, "");

    let link = match ShellLink::open(path) {
        Ok(link) => link,
        Err(e) => {
            tracing::debug!(?path, %e, "Failed to decode shortcut");
            return app;
        }
    };

    let base_dir = path.parent().unwrap_or(Path::new(""));

    let target = link_target(&link).map(|raw| resolve_against(base_dir, &raw));
    if let Some(target) = &target {
        match fs::metadata(target) {
            Ok(_) => app.exec = target.to_string_lossy().into_owned(),
            Err(e) => tracing::debug!(?path, ?target, %e, "Shortcut target not accessible"),
        }
    }

    app.icon = resolve_icon_location(&link, base_dir, &app.exec);
    app
}

/// Raw target string, by precedence: link info, environment block, absolute
/// name string, relative path.
fn link_target(link: &ShellLink) -> Option<String> {
    link.link_info_target()
        .or_else(|| link.expandable_target().map(str::to_string))
        .or_else(|| link.name.clone().filter(|n| looks_absolute(n)))
        .or_else(|| link.relative_path.clone())
}

/// The icon as a `path,index` location, falling back to the executable.
fn resolve_icon_location(link: &ShellLink, base_dir: &Path, exec: &str) -> Option<String> {
    let raw = link
        .expandable_icon()
        .or(link.icon_location.as_deref())
        .filter(|s| !s.trim().is_empty());

    let Some(raw) = raw else {
        return (!exec.is_empty()).then(|| exec.to_string());
    };

    let (icon_file, mut index) = split_icon_location(raw);
    if index == 0 {
        index = link.icon_index;
    }

    let icon_path = resolve_against(base_dir, &icon_file);
    if icon_path.exists() || has_extension(&icon_path, RESOURCE_EXTENSIONS) {
        return Some(join_icon_location(&icon_path.to_string_lossy(), index));
    }

    tracing::debug!(?icon_path, "Icon file missing, using executable");
    (!exec.is_empty()).then(|| exec.to_string())
}

/// Expand variables and resolve a relative path against `base_dir`.
fn resolve_against(base_dir: &Path, raw: &str) -> PathBuf {
    let expanded = expand_env(raw.trim().trim_matches('"'));
    if looks_absolute(&expanded) {
        PathBuf::from(expanded)
    } else {
        absolute(&base_dir.join(expanded))
    }
}

/// Absolute on this host, or a Windows drive/UNC path on any host.
fn looks_absolute(path: &str) -> bool {
    if Path::new(path).is_absolute() || path.starts_with(r"\\") {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && matches!(bytes[2], b'\\' | b'/')
}
