//! Print-view URL rewriting.
//!
//! Input URLs name a resource page on the site. The same data is served as CSV
//! from a sibling path, `show_print_version.csv`, with an English locale query.

mod path;

pub use path::parent_path;

use url::Url;

/// Filename that replaces the last path segment.
pub const PRINT_FILENAME: &str = "show_print_version.csv";

/// Query string set on every print-view URL (any existing query is replaced).
pub const PRINT_QUERY: &str = "locale=en";

/// Rewrites `url` into its print-view variant.
///
/// Scheme, host and port are preserved. The last path segment is replaced by
/// [`PRINT_FILENAME`], the query becomes [`PRINT_QUERY`] and any fragment is
/// dropped. An empty or root path yields `/show_print_version.csv`.
///
/// # Examples
///
/// - `https://example.com/a/b/item` → `https://example.com/a/b/show_print_version.csv?locale=en`
/// - `https://example.com/` → `https://example.com/show_print_version.csv?locale=en`
pub fn print_version_url(url: &Url) -> Url {
    let mut out = url.clone();
    let new_path = format!("{}/{}", parent_path(url.path()), PRINT_FILENAME);
    out.set_path(&new_path);
    out.set_query(Some(PRINT_QUERY));
    out.set_fragment(None);
    out
}

/// Parses `url` and returns its print-view variant as a string.
pub fn print_version_url_str(url: &str) -> Result<String, url::ParseError> {
    let parsed = Url::parse(url.trim())?;
    Ok(print_version_url(&parsed).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(url: &str) -> String {
        print_version_url_str(url).unwrap()
    }

    #[test]
    fn replaces_last_segment_and_sets_query() {
        assert_eq!(
            rewrite("https://example.com/en/products/widget-123"),
            "https://example.com/en/products/show_print_version.csv?locale=en"
        );
        assert_eq!(
            rewrite("https://example.com/single"),
            "https://example.com/show_print_version.csv?locale=en"
        );
    }

    #[test]
    fn trailing_slash_keeps_directory() {
        assert_eq!(
            rewrite("https://example.com/a/b/"),
            "https://example.com/a/b/show_print_version.csv?locale=en"
        );
    }

    #[test]
    fn root_or_empty_path() {
        assert_eq!(
            rewrite("https://example.com/"),
            "https://example.com/show_print_version.csv?locale=en"
        );
        assert_eq!(
            rewrite("https://example.com"),
            "https://example.com/show_print_version.csv?locale=en"
        );
    }

    #[test]
    fn existing_query_and_fragment_replaced() {
        assert_eq!(
            rewrite("https://example.com/list/view?locale=de&page=2#top"),
            "https://example.com/list/show_print_version.csv?locale=en"
        );
    }

    #[test]
    fn scheme_host_and_port_preserved() {
        let input = Url::parse("http://127.0.0.1:8080/x/y/z").unwrap();
        let out = print_version_url(&input);
        assert_eq!(out.scheme(), "http");
        assert_eq!(out.host_str(), Some("127.0.0.1"));
        assert_eq!(out.port(), Some(8080));
        assert!(out.path().ends_with("/show_print_version.csv"));
        assert_eq!(out.query(), Some("locale=en"));
    }

    #[test]
    fn input_is_not_mutated() {
        let input = Url::parse("https://example.com/a/b?q=1").unwrap();
        let before = input.clone();
        let _ = print_version_url(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn invalid_url_is_an_error() {
        assert!(print_version_url_str("not a url").is_err());
    }
}
