//! Linux discovery: desktop entries under the XDG application directories.

mod icon_theme;
pub mod parser;

pub use icon_theme::IconThemeLookup;
pub use parser::parse_desktop_file;

use super::AppFinder;
use super::walk::files_with_extension;
use crate::models::Application;
use crate::paths::AppDir;

/// Finds applications from `.desktop` files.
#[derive(Debug, Clone)]
pub struct LinuxFinder {
    dirs: Vec<AppDir>,
    icons: IconThemeLookup,
}

impl LinuxFinder {
    pub fn new(dirs: Vec<AppDir>, icons: IconThemeLookup) -> Self {
        Self { dirs, icons }
    }
}

impl AppFinder for LinuxFinder {
    fn find(&self) -> Vec<Application> {
        let mut apps = Vec::new();

        for dir in &self.dirs {
            tracing::debug!(dir = ?dir.path, "Scanning directory");

            for path in files_with_extension(dir, "desktop") {
                let (mut app, valid) = parse_desktop_file(&path);
                if !valid {
                    tracing::debug!(?path, "Discarded (invalid desktop entry)");
                    continue;
                }

                app.icon_path = app.icon.as_deref().and_then(|icon| self.icons.resolve(icon));
                tracing::debug!(name = %app.name, exec = %app.exec, "Found application");
                apps.push(app);
            }
        }

        apps
    }

    fn name(&self) -> &'static str {
        "linux"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::write_desktop_file;
    use std::path::PathBuf;

    #[test]
    fn test_find_across_dirs() {
        let system = tempfile::tempdir().unwrap();
        let user = tempfile::tempdir().unwrap();
        let icon = user.path().join("editor.png");
        std::fs::write(&icon, b"not really a png").unwrap();

        write_desktop_file(
            system.path(),
            "b-viewer.desktop",
            "[Desktop Entry]\nName=Viewer\nExec=viewer %f\n",
        );
        write_desktop_file(
            system.path(),
            "a-broken.desktop",
            "[Desktop Entry]\nName=Broken\n",
        );
        write_desktop_file(
            user.path(),
            "nested/editor.desktop",
            &format!(
                "[Desktop Entry]\nName=Editor\nExec=editor\nIcon={}\n",
                icon.display()
            ),
        );

        let finder = LinuxFinder::new(
            vec![AppDir::recursive(system.path()), AppDir::recursive(user.path())],
            IconThemeLookup::new(None, 64),
        );
        let apps = finder.find();

        let names: Vec<_> = apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Viewer", "Editor"]);
        assert_eq!(apps[0].icon_path, None);
        assert_eq!(apps[1].icon_path, Some(PathBuf::from(&icon)));
    }
}
