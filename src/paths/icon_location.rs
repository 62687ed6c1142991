//! Parsing of `path,index` icon location strings.
//!
//! Shell links write `C:\dir\app.dll,3` while other sources quote the path so
//! it may contain commas: `"C:\dir, with comma\app.ico",2`. Both forms, and a
//! bare path without index, are accepted.

/// Split an icon location into `(path, index)`.
///
/// A trailing segment that is not an integer yields index 0 with the path
/// before the last comma.
pub fn split_icon_location(location: &str) -> (String, i32) {
    if location.is_empty() {
        return (String::new(), 0);
    }

    if let Some(rest) = location.strip_prefix('"')
        && let Some(end) = rest.find('"')
    {
        let path = &rest[..end];
        let remaining = rest[end + 1..].trim();
        let index = remaining
            .strip_prefix(',')
            .and_then(|idx| idx.trim().parse().ok())
            .unwrap_or(0);
        return (path.to_string(), index);
    }

    let Some(comma) = location.rfind(',') else {
        return (location.trim_matches('"').to_string(), 0);
    };

    let path = location[..comma].trim().trim_matches('"').to_string();
    let index = location[comma + 1..].trim().parse().unwrap_or(0);
    (path, index)
}

/// Format a path and index the way [`split_icon_location`] reads them back.
pub fn join_icon_location(path: &str, index: i32) -> String {
    if index == 0 {
        return path.to_string();
    }
    if path.contains(',') {
        format!("\"{}\",{}", path, index)
    } else {
        format!("{},{}", path, index)
    }
}
