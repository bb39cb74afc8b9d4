use crate::constants::{DEFAULT_SCHEME, SCHEME_SEPARATOR};

/// Prefix `http://` unless the URL already carries a scheme separator.
///
/// The input is not trimmed or validated; a malformed URL fails later at
/// fetch time.
pub fn normalize_url(url_str: &str) -> String {
    if url_str.contains(SCHEME_SEPARATOR) {
        return url_str.to_string();
    }
    format!("{}{}", DEFAULT_SCHEME, url_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url_with_scheme() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
        assert_eq!(normalize_url("ftp://example.com/a"), "ftp://example.com/a");
    }

    #[test]
    fn test_normalize_url_separator_anywhere() {
        assert_eq!(
            normalize_url("example.com/redirect?to=https://other.org"),
            "example.com/redirect?to=https://other.org"
        );
    }

    #[test]
    fn test_normalize_url_without_scheme() {
        assert_eq!(normalize_url("example.com"), "http://example.com");
        assert_eq!(normalize_url("example.com:443"), "http://example.com:443");
        assert_eq!(normalize_url("localhost:8080/a"), "http://localhost:8080/a");
    }

    #[test]
    fn test_normalize_url_is_not_trimmed() {
        assert_eq!(normalize_url(" example.com"), "http:// example.com");
        assert_eq!(normalize_url(""), "http://");
    }
}
