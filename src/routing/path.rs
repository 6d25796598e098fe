//! URL normalization helpers shared by the tree builder and the matcher.

/// Split a URL into its path and the trailing query/fragment.
///
/// The split happens at the first `?` or `#`; the second half keeps the
/// delimiter so it can be appended back verbatim.
pub fn split_query_and_hash(url: &str) -> (&str, &str) {
    match url.find(['?', '#']) {
        Some(index) => url.split_at(index),
        None => (url, ""),
    }
}

/// Normalize a URL into a bare path suitable for segmenting on `/`.
///
/// Strips an `http://` or `https://` scheme, any query string or fragment,
/// then a single leading and a single trailing slash.
pub fn normalize_path(url: &str) -> &str {
    let mut result = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or(url);

    if let Some(index) = result.find('?') {
        result = &result[..index];
    }
    if let Some(index) = result.find('#') {
        result = &result[..index];
    }

    let result = result.strip_prefix('/').unwrap_or(result);
    result.strip_suffix('/').unwrap_or(result)
}

/// Collapse every run of consecutive slashes into a single one.
pub fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }
    out
}
