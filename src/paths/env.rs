//! Environment variable expansion for paths found in shortcuts and desktop entries.
//!
//! Both `%VAR%` (Windows) and `$VAR` / `${VAR}` (POSIX) tokens are expanded.
//! Unknown variables are left untouched.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Expand environment variables using the process environment.
pub fn expand_env(input: &str) -> String {
    expand_env_with(input, |name| std::env::var(name).ok())
}

/// Expand environment variables using a custom lookup.
pub fn expand_env_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let percent = expand_percent_vars(input, &lookup);
    let expanded: Cow<str> = shellexpand::env_with_context_no_errors(&percent, |name| lookup(name));
    expanded.into_owned()
}

fn expand_percent_vars<'a, F>(input: &'a str, lookup: &F) -> Cow<'a, str>
where
    F: Fn(&str) -> Option<String>,
{
    if !input.contains('%') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('%') {
            Some(end) if is_var_name(&after[..end]) => {
                let name = &after[..end];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('%');
                        out.push_str(name);
                        out.push('%');
                    }
                }
                rest = &after[end + 1..];
            }
            _ => {
                out.push('%');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn is_var_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '(' | ')'))
}

/// Expand variables and make the path absolute against the current directory.
pub fn expand_to_absolute(input: &str) -> PathBuf {
    let expanded = expand_env(input.trim_matches('"'));
    absolute(Path::new(&expanded))
}

/// Make a path absolute without touching the filesystem.
pub fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
