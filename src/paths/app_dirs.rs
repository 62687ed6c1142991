//! Well-known application directories per platform.

use std::path::{Path, PathBuf};

use super::env::absolute;
use crate::platform::Platform;

/// A directory to scan for application files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDir {
    pub path: PathBuf,
    /// The Desktop is scanned one level deep only.
    pub recursive: bool,
}

impl AppDir {
    pub fn recursive(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recursive: true,
        }
    }

    pub fn flat(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recursive: false,
        }
    }
}

/// Application directories for `platform`, read from the process environment.
pub fn application_dirs(platform: Platform) -> Vec<AppDir> {
    application_dirs_with(platform, |name| std::env::var(name).ok())
}

/// Application directories for `platform` using a custom environment lookup.
///
/// Directories whose base variable is unset are left out rather than
/// resolved relative to the working directory.
pub fn application_dirs_with<F>(platform: Platform, env: F) -> Vec<AppDir>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| env(name).filter(|v| !v.is_empty()).map(PathBuf::from);

    match platform {
        Platform::Windows => {
            let mut dirs = Vec::new();
            if let Some(appdata) = var("APPDATA") {
                dirs.push(AppDir::recursive(start_menu_programs(&appdata)));
            }
            if let Some(program_data) = var("ProgramData") {
                dirs.push(AppDir::recursive(start_menu_programs(&program_data)));
            }
            if let Some(desktop) = desktop_dir_with(&env) {
                dirs.push(AppDir::flat(desktop));
            }
            dirs
        }
        Platform::Linux => {
            let mut dirs = vec![AppDir::recursive("/usr/share/applications")];
            if let Some(home) = var("HOME") {
                dirs.push(AppDir::recursive(home.join(".local/share/applications")));
            }
            dirs
        }
        Platform::Unsupported => Vec::new(),
    }
}

fn start_menu_programs(base: &Path) -> PathBuf {
    base.join("Microsoft")
        .join("Windows")
        .join("Start Menu")
        .join("Programs")
}

/// The user's Desktop directory (`%USERPROFILE%\Desktop`).
pub fn desktop_dir_with<F>(env: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    env("USERPROFILE")
        .filter(|v| !v.is_empty())
        .map(|profile| PathBuf::from(profile).join("Desktop"))
}

/// Whether `dir` is the same location as the Desktop directory.
pub fn is_desktop_dir(dir: &Path, desktop: &Path) -> bool {
    absolute(dir) == absolute(desktop)
}
