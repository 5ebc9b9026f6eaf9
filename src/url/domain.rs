use url::Url;

/// Extracts the host from a URL
///
/// The host is returned lowercase. URLs without a host (`mailto:`, `data:`)
/// return `None`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use broken_links::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true when both URLs name the same host
///
/// Ports and schemes are ignored. Two URLs without a host never match.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_host(a), extract_host(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_extract_simple_host() {
        assert_eq!(
            extract_host(&url("https://example.com/")),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_with_port() {
        assert_eq!(
            extract_host(&url("http://127.0.0.1:8080/")),
            Some("127.0.0.1".to_string())
        );
    }

    #[test]
    fn test_extract_without_host() {
        assert_eq!(extract_host(&url("mailto:someone@example.com")), None);
    }

    #[test]
    fn test_same_host_ignores_scheme_port_and_path() {
        assert!(same_host(
            &url("http://www.example.com/a"),
            &url("https://WWW.example.com:8443/b?c=d")
        ));
    }

    #[test]
    fn test_subdomain_is_a_different_host() {
        assert!(!same_host(
            &url("http://www.example.com/"),
            &url("http://blog.example.com/")
        ));
    }

    #[test]
    fn test_hostless_urls_never_match() {
        assert!(!same_host(
            &url("mailto:a@example.com"),
            &url("mailto:a@example.com")
        ));
    }
}
