//! Resolution of desktop-entry icon names to files.
//!
//! Desktop entries mostly carry a bare icon name (`firefox`) that has to be
//! looked up in the icon theme. Absolute paths are used as they are.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::config::AppConfig;
use crate::paths::{expand_env, has_extension};

static DESKTOP_ICON_THEME: OnceLock<Option<String>> = OnceLock::new();

/// Looks up icon names in the configured or desktop icon theme.
#[derive(Debug, Clone)]
pub struct IconThemeLookup {
    theme: Option<String>,
    size: u16,
}

impl IconThemeLookup {
    pub fn new(theme: Option<String>, size: u16) -> Self {
        Self {
            theme: theme.filter(|t| !t.trim().is_empty()),
            size,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.icon_theme.clone(), config.icon_size)
    }

    /// Resolve an icon specifier to an existing file.
    pub fn resolve(&self, icon: &str) -> Option<PathBuf> {
        let icon = expand_env(icon.trim());
        if icon.is_empty() {
            return None;
        }

        let path = Path::new(&icon);
        if path.is_absolute() {
            return path.is_file().then(|| path.to_path_buf());
        }

        // Relative paths are not icon names and have no base to resolve against.
        if icon.contains('/') {
            return None;
        }

        self.lookup_name(&icon)
    }

    /// Look `name` up along the theme chain, preferring raster hits.
    ///
    /// The themed lookups run in order and stop at the first raster file. A
    /// scalable hit is only returned when no theme has a raster one.
    fn lookup_name(&self, name: &str) -> Option<PathBuf> {
        let themes = self
            .theme
            .as_deref()
            .map(Some)
            .into_iter()
            .chain(desktop_icon_theme().map(Some))
            .chain([Some("hicolor"), None]);

        prefer_raster(themes.map(|theme| {
            let lookup = freedesktop_icons::lookup(name).with_size(self.size);
            match theme {
                Some(theme) => lookup.with_theme(theme).find(),
                None => lookup.find(),
            }
        }))
    }
}

/// First candidate that is not an SVG, else the first SVG.
fn prefer_raster(candidates: impl IntoIterator<Item = Option<PathBuf>>) -> Option<PathBuf> {
    let mut scalable = None;
    for path in candidates.into_iter().flatten() {
        if !has_extension(&path, &["svg", "svgz"]) {
            return Some(path);
        }
        scalable.get_or_insert(path);
    }
    scalable
}

/// Icon theme configured in the desktop environment (KDE, then GTK 3, then GTK 4).
fn desktop_icon_theme() -> Option<&'static str> {
    DESKTOP_ICON_THEME
        .get_or_init(|| {
            let config_dir = dirs::config_dir()?;
            read_kde_icon_theme(&config_dir)
                .or_else(|| read_gtk_icon_theme(&config_dir.join("gtk-3.0/settings.ini")))
                .or_else(|| read_gtk_icon_theme(&config_dir.join("gtk-4.0/settings.ini")))
        })
        .as_deref()
}

fn read_kde_icon_theme(config_dir: &Path) -> Option<String> {
    let content = fs::read_to_string(config_dir.join("kdeglobals")).ok()?;
    parse_kde_icon_theme(&content)
}

fn parse_kde_icon_theme(content: &str) -> Option<String> {
    let mut in_icons_section = false;
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            in_icons_section = line == "[Icons]";
            continue;
        }
        if in_icons_section && let Some(theme) = line.strip_prefix("Theme=") {
            return Some(theme.trim().to_string());
        }
    }
    None
}

fn read_gtk_icon_theme(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    parse_gtk_icon_theme(&content)
}

fn parse_gtk_icon_theme(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let (key, value) = line.trim().split_once('=')?;
        (key.trim() == "gtk-icon-theme-name").then(|| value.trim().trim_matches('"').to_string())
    })
}
