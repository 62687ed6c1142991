//! Desktop entry (`.desktop`) parser.
//!
//! Only the `[Desktop Entry]` group is read and only the first `Name`, `Exec`
//! and `Icon` keys in it are kept. Localized keys such as `Name[de]` are
//! distinct keys and therefore ignored. Bytes that are not valid UTF-8 are
//! replaced rather than rejecting the file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::discovery::validate::is_valid_app;
use crate::models::Application;
use crate::platform::Platform;

const DESKTOP_ENTRY_GROUP: &str = "[Desktop Entry]";

/// Parse a desktop entry file.
///
/// Returns the record together with its validity. A file that cannot be
/// opened or read yields an empty, invalid record; invalid UTF-8 does not.
pub fn parse_desktop_file(path: &Path) -> (Application, bool) {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(?path, %e, "Failed to open desktop file");
            return (Application::empty(), false);
        }
    };

    let mut name: Option<String> = None;
    let mut exec: Option<String> = None;
    let mut icon: Option<String> = None;
    let mut in_entry = false;

    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(?path, %e, "Failed to read desktop file");
                return (Application::empty(), false);
            }
        }

        // Non-UTF-8 bytes become U+FFFD.
        let decoded = String::from_utf8_lossy(&buf);
        let line = decoded.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.len() > 2 && line.starts_with('[') && line.ends_with(']') {
            in_entry = line == DESKTOP_ENTRY_GROUP;
            continue;
        }

        if !in_entry {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            "Name" if name.is_none() => name = Some(value.to_string()),
            "Exec" if exec.is_none() => exec = Some(strip_exec_arguments(value).to_string()),
            "Icon" if icon.is_none() => icon = Some(value.to_string()),
            _ => {}
        }
    }

    let mut app = Application::new(name.unwrap_or_default(), exec.unwrap_or_default());
    app.icon = icon.filter(|i| !i.is_empty());

    let valid = is_valid_app(&app, Platform::Linux);
    (app, valid)
}

/// Keep only the program of an `Exec` value, dropping arguments and field
/// codes such as `%U`.
///
/// A program path wrapped in double quotes is kept whole.
fn strip_exec_arguments(exec: &str) -> &str {
    if let Some(quoted) = exec.strip_prefix('"')
        && let Some(end) = quoted.find('"')
    {
        return &quoted[..end];
    }
    exec.split_whitespace().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::write_desktop_file;

    #[test]
    fn test_basic_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_desktop_file(
            tmp.path(),
            "firefox.desktop",
            "[Desktop Entry]\nName=Firefox\nExec=/usr/bin/firefox %u\nIcon=firefox\n",
        );

        let (app, valid) = parse_desktop_file(&path);
        assert!(valid);
        assert_eq!(app.name, "Firefox");
        assert_eq!(app.exec, "/usr/bin/firefox");
        assert_eq!(app.icon.as_deref(), Some("firefox"));
        assert_eq!(app.icon_index, 0);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_desktop_file(
            tmp.path(),
            "dup.desktop",
            "[Desktop Entry]\nName=First\nName=Second\nExec=first --flag\nExec=second\n\
             Icon=one\nIcon=two\n",
        );

        let (app, valid) = parse_desktop_file(&path);
        assert!(valid);
        assert_eq!(app.name, "First");
        assert_eq!(app.exec, "first");
        assert_eq!(app.icon.as_deref(), Some("one"));
    }

    #[test]
    fn test_other_groups_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_desktop_file(
            tmp.path(),
            "actions.desktop",
            "Name=Before Any Group\n\
             [Desktop Action new-window]\nName=New Window\nExec=browser --new-window\n\
             [Desktop Entry]\nName=Browser\nExec=browser %U\n\
             [Desktop Action private]\nIcon=private\n",
        );

        let (app, valid) = parse_desktop_file(&path);
        assert!(valid);
        assert_eq!(app.name, "Browser");
        assert_eq!(app.exec, "browser");
        assert!(app.icon.is_none());
    }

    #[test]
    fn test_comments_blank_lines_and_localized_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_desktop_file(
            tmp.path(),
            "files.desktop",
            "# comment\n\n[Desktop Entry]\n# Name=Commented\nName[de]=Dateien\n  Name = Files  \n\
             Exec=nautilus --new-window %U\n",
        );

        let (app, valid) = parse_desktop_file(&path);
        assert!(valid);
        assert_eq!(app.name, "Files");
        assert_eq!(app.exec, "nautilus");
    }

    #[test]
    fn test_invalid_utf8_line_does_not_discard_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("editor.desktop");
        std::fs::write(
            &path,
            b"[Desktop Entry]\nName=Editor\nExec=/usr/bin/editor %F\n\
              Comment[fr]=\xe9diteur de texte\nIcon=editor\n",
        )
        .unwrap();

        let (app, valid) = parse_desktop_file(&path);
        assert!(valid);
        assert_eq!(app.name, "Editor");
        assert_eq!(app.exec, "/usr/bin/editor");
        assert_eq!(app.icon.as_deref(), Some("editor"));
    }

    #[test]
    fn test_invalid_utf8_in_name_is_replaced() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("latin1.desktop");
        std::fs::write(&path, b"[Desktop Entry]\nName=Caf\xe9\nExec=cafe\n").unwrap();

        let (app, valid) = parse_desktop_file(&path);
        assert!(valid);
        assert_eq!(app.name, "Caf\u{FFFD}");
        assert_eq!(app.exec, "cafe");
    }

    #[test]
    fn test_missing_exec_is_invalid() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_desktop_file(
            tmp.path(),
            "noexec.desktop",
            "[Desktop Entry]\nName=Broken\nIcon=broken\n",
        );

        let (app, valid) = parse_desktop_file(&path);
        assert!(!valid);
        assert_eq!(app.name, "Broken");
        assert!(app.exec.is_empty());
    }

    #[test]
    fn test_missing_file_is_invalid() {
        let (app, valid) = parse_desktop_file(Path::new("/nonexistent/app.desktop"));
        assert!(!valid);
        assert!(app.name.is_empty());
        assert!(app.exec.is_empty());
    }

    #[test]
    fn test_strip_exec_arguments() {
        assert_eq!(strip_exec_arguments("/usr/bin/firefox %u"), "/usr/bin/firefox");
        assert_eq!(strip_exec_arguments("gimp-2.10 %U"), "gimp-2.10");
        assert_eq!(strip_exec_arguments("\"/opt/My App/app\" %F"), "/opt/My App/app");
        assert_eq!(strip_exec_arguments(""), "");
    }
}
