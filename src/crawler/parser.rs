//! HTML parser for extracting navigable links
//!
//! # Link Extraction Rules
//!
//! Every `<a>` element is considered. An anchor is skipped when its `href`:
//! - is missing or empty
//! - starts with `mailto:`
//! - is fragment-only (`#`, `#section`)
//!
//! The remaining hrefs are trimmed, resolved against the base URL, and
//! deduplicated in first-seen order.

use crate::url::build_uri;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts the absolute, deduplicated links of an HTML document
///
/// # Arguments
///
/// * `base_url` - The URL the body was served from
/// * `html` - The HTML content to parse
///
/// # Example
///
/// ```
/// use broken_links::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/page">Link</a><a href="mailto:me@example.com">Mail</a>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let links = extract_links(&base_url, html);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://example.com/page");
/// ```
pub fn extract_links(base_url: &Url, html: &str) -> Vec<Url> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let href = href.trim();
        if is_skipped(href) {
            continue;
        }

        match build_uri(base_url, href) {
            Ok(url) => {
                if seen.insert(url.to_string()) {
                    links.push(url);
                }
            }
            Err(e) => {
                tracing::debug!("Skipping unresolvable href {:?} on {}: {}", href, base_url, e);
            }
        }
    }

    links
}

fn is_skipped(href: &str) -> bool {
    href.is_empty()
        || href.starts_with('#')
        || href
            .get(..7)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("mailto:"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("http://www.example.com/docs/page").unwrap()
    }

    fn extract(html: &str) -> Vec<String> {
        extract_links(&base_url(), html)
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_self_closing_anchors() {
        let html = r#"
            <a href="/link-1" />
            <a href="/link-2" />
            <a href="/link-3" />
            <a href="/link-4" />
        "#;
        assert_eq!(
            extract(html),
            vec![
                "http://www.example.com/link-1",
                "http://www.example.com/link-2",
                "http://www.example.com/link-3",
                "http://www.example.com/link-4",
            ]
        );
    }

    #[test]
    fn test_relative_and_absolute_links() {
        let html = r#"
            <a href="sibling">Sibling</a>
            <a href="https://other.com/page">Other</a>
        "#;
        assert_eq!(
            extract(html),
            vec![
                "http://www.example.com/docs/sibling",
                "https://other.com/page",
            ]
        );
    }

    #[test]
    fn test_skip_missing_and_empty_href() {
        let html = r#"<a name="top">Top</a><a href="">Empty</a><a href="   ">Blank</a>"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_skip_mailto_link() {
        let html = r#"<a href="mailto:test@example.com">Email</a><a href=" MAILTO:x@y.z">Email</a>"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_skip_fragment_only() {
        let html = r##"<a href="#">Top</a><a href="#section">Jump</a>"##;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_page_with_fragment_is_kept() {
        let html = r##"<a href="/other#section">Jump</a>"##;
        assert_eq!(extract(html), vec!["http://www.example.com/other#section"]);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let html = "<a href=\"\n   /spaced  \t\">Spaced</a>";
        assert_eq!(extract(html), vec!["http://www.example.com/spaced"]);
    }

    #[test]
    fn test_duplicates_collapse_in_first_seen_order() {
        let html = r#"
            <a href="/b">B</a>
            <a href="/a">A</a>
            <a href="/b">B again</a>
            <a href="http://www.example.com/a">A absolute</a>
        "#;
        assert_eq!(
            extract(html),
            vec!["http://www.example.com/b", "http://www.example.com/a"]
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = r#"<a href="/x">X</a><a href="y">Y</a><a href="/x">X</a>"#;
        assert_eq!(extract(html), extract(html));
    }

    #[test]
    fn test_non_anchor_elements_ignored() {
        let html = r#"
            <link rel="stylesheet" href="/style.css">
            <img src="/logo.png">
            <script src="/app.js"></script>
        "#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn test_empty_body() {
        assert!(extract("").is_empty());
    }
}
