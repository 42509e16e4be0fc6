//! Path segment helpers.

/// Returns everything before the last `/` of `path`.
///
/// `"/a/b/c"` → `"/a/b"`, `"/a/b/"` → `"/a/b"`, `"/"` and `""` → `""`.
pub fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[..i],
        None => "",
    }
}
