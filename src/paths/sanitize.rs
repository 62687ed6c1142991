/// File extensions removed from the end of a resource name.
const KNOWN_EXTENSIONS: &[&str] = &[
    "exe", "lnk", "desktop", "dll", "png", "ico", "svg", "xpm", "jpg", "jpeg", "bmp", "gif",
];

/// Turn an arbitrary name into a safe resource identifier.
///
/// Drops any directory part and a trailing known file extension, then removes
/// control characters and characters that are reserved in file names. Other
/// dotted suffixes such as version numbers are kept.
pub fn sanitize_resource_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let stem = match base.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && KNOWN_EXTENSIONS.iter().any(|k| ext.eq_ignore_ascii_case(k)) =>
        {
            stem
        }
        _ => base,
    };

    let cleaned: String = stem
        .chars()
        .filter(|&c| {
            !(c < ' ' || matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        })
        .collect();

    if cleaned.is_empty() {
        "icon".to_string()
    } else {
        cleaned
    }
}
