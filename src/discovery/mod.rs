//! Application discovery.
//!
//! A [`Finder`] is selected once per platform and walks that platform's
//! application directories. [`Discovery`] wraps it and guarantees the
//! result holds only valid entries with distinct executables, in scan order.

pub mod linux;
mod unsupported;
pub mod validate;
mod walk;
pub mod windows;

pub use linux::{IconThemeLookup, LinuxFinder};
pub use unsupported::UnsupportedFinder;
pub use validate::Exclusions;
pub use windows::WindowsFinder;

use crate::config::AppConfig;
use crate::models::Application;
use crate::paths::app_dirs::desktop_dir_with;
use crate::paths::{AppDir, application_dirs, is_desktop_dir};
use crate::platform::Platform;

/// A platform discovery strategy.
pub trait AppFinder {
    /// Scan for applications. Never fails; unreadable items are skipped.
    fn find(&self) -> Vec<Application>;

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

/// The discovery strategies, one per supported platform.
#[derive(Debug, Clone)]
pub enum Finder {
    Windows(WindowsFinder),
    Linux(LinuxFinder),
    Unsupported(UnsupportedFinder),
}

impl Finder {
    /// Build the strategy for `platform` from its default directories plus
    /// any configured extra directories.
    pub fn for_platform(platform: Platform, config: &AppConfig) -> Self {
        let dirs = scan_dirs(platform, config);
        match platform {
            Platform::Windows => {
                Self::Windows(WindowsFinder::new(dirs, Exclusions::from_config(config)))
            }
            Platform::Linux => Self::Linux(LinuxFinder::new(
                dirs,
                IconThemeLookup::from_config(config),
            )),
            Platform::Unsupported => Self::Unsupported(UnsupportedFinder),
        }
    }
}

impl AppFinder for Finder {
    fn find(&self) -> Vec<Application> {
        match self {
            Self::Windows(f) => f.find(),
            Self::Linux(f) => f.find(),
            Self::Unsupported(f) => f.find(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Windows(f) => f.name(),
            Self::Linux(f) => f.name(),
            Self::Unsupported(f) => f.name(),
        }
    }
}

fn scan_dirs(platform: Platform, config: &AppConfig) -> Vec<AppDir> {
    let mut dirs = application_dirs(platform);
    if platform == Platform::Unsupported {
        return dirs;
    }

    let desktop = desktop_dir_with(|name| std::env::var(name).ok());
    for extra in &config.extra_dirs {
        let on_desktop = desktop
            .as_deref()
            .is_some_and(|desktop| is_desktop_dir(extra, desktop));
        dirs.push(if on_desktop {
            AppDir::flat(extra)
        } else {
            AppDir::recursive(extra)
        });
    }
    dirs
}

/// Runs a finder and normalizes its output.
pub struct Discovery<F: AppFinder = Finder> {
    platform: Platform,
    finder: F,
}

impl Discovery<Finder> {
    /// Discovery for `platform` configured from `config`.
    pub fn new(platform: Platform, config: &AppConfig) -> Self {
        Self {
            platform,
            finder: Finder::for_platform(platform, config),
        }
    }
}

impl<F: AppFinder> Discovery<F> {
    pub fn with_finder(platform: Platform, finder: F) -> Self {
        Self { platform, finder }
    }

    /// Discover applications.
    ///
    /// Entries without a name or executable and later entries for an
    /// already listed executable are dropped, whatever the strategy.
    pub fn discover(&self) -> Vec<Application> {
        let found = self.finder.find();
        let total = found.len();
        let apps = validate::retain_valid_unique(found, self.platform);

        tracing::info!(
            finder = self.finder.name(),
            found = total,
            listed = apps.len(),
            "Discovered applications"
        );
        apps
    }
}

/// Discover applications on the running platform with the process config.
pub fn discover() -> Vec<Application> {
    Discovery::new(Platform::current(), &crate::config::config()).discover()
}
