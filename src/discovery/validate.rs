//! Validity, exclusion and duplicate filtering shared by the discovery strategies.

use std::collections::HashSet;
use std::path::Path;

use crate::config::AppConfig;
use crate::models::Application;
use crate::paths::has_extension;
use crate::platform::Platform;

/// Whether an application has the fields required to be listed.
///
/// Every platform needs a name and an exec; on Windows the exec must also be
/// an `.exe`.
pub fn is_valid_app(app: &Application, platform: Platform) -> bool {
    if app.name.is_empty() || app.exec.is_empty() {
        return false;
    }
    match platform {
        Platform::Windows => has_extension(Path::new(&app.exec), &["exe"]),
        Platform::Linux | Platform::Unsupported => true,
    }
}

/// Name substrings that are always excluded, whatever the config says.
pub const BUILTIN_KEYWORDS: &[&str] = &["uninstall", "settings"];

/// Names and keywords that keep an application out of the listing.
///
/// The keyword list always starts with [`BUILTIN_KEYWORDS`]; configured
/// keywords are appended.
#[derive(Debug, Clone)]
pub struct Exclusions {
    names: HashSet<String>,
    keywords: Vec<String>,
}

impl Exclusions {
    pub fn new<N, K>(names: N, keywords: K) -> Self
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        let mut all: Vec<String> = BUILTIN_KEYWORDS.iter().map(|k| k.to_string()).collect();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !all.contains(&keyword) {
                all.push(keyword);
            }
        }

        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
            keywords: all,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.excluded_apps, &config.excluded_keywords)
    }

    /// Reason the application is excluded, if it is.
    pub fn reason(&self, app: &Application) -> Option<String> {
        let name = app.name.to_lowercase();
        if self.names.contains(&name) {
            return Some(format!("name '{}' is excluded", app.name));
        }

        let exec_base = Path::new(&app.exec)
            .file_name()
            .map(|f| f.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !exec_base.is_empty() && self.names.contains(&exec_base) {
            return Some(format!("executable '{}' is excluded", exec_base));
        }

        self.keywords
            .iter()
            .find(|k| name.contains(k.as_str()))
            .map(|k| format!("name contains '{}'", k))
    }

    pub fn is_excluded(&self, app: &Application) -> bool {
        self.reason(app).is_some()
    }
}

impl Default for Exclusions {
    fn default() -> Self {
        Self::new(Vec::<String>::new(), Vec::<String>::new())
    }
}

/// Keeps the first application seen for each exec.
#[derive(Debug, Default)]
pub struct SeenExecs(HashSet<String>);

impl SeenExecs {
    /// Record `exec`; returns false if it was already recorded.
    pub fn insert(&mut self, exec: &str) -> bool {
        self.0.insert(exec.to_string())
    }
}

/// Drop invalid applications and later duplicates, preserving order.
pub fn retain_valid_unique(apps: Vec<Application>, platform: Platform) -> Vec<Application> {
    let mut seen = SeenExecs::default();
    apps.into_iter()
        .filter(|app| {
            if !is_valid_app(app, platform) {
                tracing::debug!(name = %app.name, exec = %app.exec, "Discarded (invalid)");
                return false;
            }
            if !seen.insert(&app.exec) {
                tracing::debug!(name = %app.name, exec = %app.exec, "Discarded (duplicate)");
                return false;
            }
            true
        })
        .collect()
}
