use url::{ParseError, Url};

/// Builds an absolute URI from an href found on (or redirected from) `base`
///
/// Hrefs that already carry an `http://` or `https://` prefix are parsed as
/// they are. Everything else is resolved relative to `base`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use broken_links::url::build_uri;
///
/// let base = Url::parse("http://www.example.com/docs/index.html").unwrap();
/// assert_eq!(
///     build_uri(&base, "intro.html").unwrap().as_str(),
///     "http://www.example.com/docs/intro.html"
/// );
/// assert_eq!(
///     build_uri(&base, "https://other.org/").unwrap().as_str(),
///     "https://other.org/"
/// );
/// ```
pub fn build_uri(base: &Url, href: &str) -> Result<Url, ParseError> {
    if is_absolute_http(href) {
        Url::parse(href)
    } else {
        base.join(href)
    }
}

fn is_absolute_http(href: &str) -> bool {
    let lower = href.get(..8).unwrap_or(href).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://www.example.com/section/page").unwrap()
    }

    #[test]
    fn test_root_relative() {
        assert_eq!(
            build_uri(&base(), "/link-1").unwrap().as_str(),
            "http://www.example.com/link-1"
        );
    }

    #[test]
    fn test_path_relative() {
        assert_eq!(
            build_uri(&base(), "other").unwrap().as_str(),
            "http://www.example.com/section/other"
        );
    }

    #[test]
    fn test_absolute_kept() {
        assert_eq!(
            build_uri(&base(), "http://elsewhere.com/x").unwrap().as_str(),
            "http://elsewhere.com/x"
        );
    }

    #[test]
    fn test_absolute_scheme_is_case_insensitive() {
        assert_eq!(
            build_uri(&base(), "HTTPS://elsewhere.com/x").unwrap().as_str(),
            "https://elsewhere.com/x"
        );
    }

    #[test]
    fn test_protocol_relative() {
        assert_eq!(
            build_uri(&base(), "//cdn.example.com/lib.js").unwrap().as_str(),
            "http://cdn.example.com/lib.js"
        );
    }

    #[test]
    fn test_query_only() {
        assert_eq!(
            build_uri(&base(), "?page=2").unwrap().as_str(),
            "http://www.example.com/section/page?page=2"
        );
    }

    #[test]
    fn test_invalid_absolute_is_error() {
        assert!(build_uri(&base(), "http://").is_err());
    }
}
