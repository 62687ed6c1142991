use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

/// A discovered application.
///
/// Built once by discovery and never mutated after it has been handed out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Application {
    /// Process-unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Launch path (Windows) or invocation string (Linux).
    pub exec: String,
    /// Icon specifier exactly as found in the source file.
    pub icon: Option<String>,
    /// Expanded, absolute path used for icon resolution.
    pub icon_path: Option<PathBuf>,
    /// Resource index inside `icon_path`.
    pub icon_index: i32,
}

impl Application {
    pub fn new(name: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            exec: exec.into(),
            icon: None,
            icon_path: None,
            icon_index: 0,
        }
    }

    /// An application with no fields set yet.
    pub fn empty() -> Self {
        Self::new(String::new(), String::new())
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_icon_path(mut self, path: impl Into<PathBuf>, index: i32) -> Self {
        self.icon_path = Some(path.into());
        self.icon_index = index;
        self
    }
}
