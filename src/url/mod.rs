//! URL handling module for Broken-Links
//!
//! This module provides seed validation, href resolution, and the host
//! comparison that scopes the crawl to a single site.

mod domain;
mod resolve;

use crate::{UrlError, UrlResult};
use ::url::Url;

// Re-export main functions
pub use domain::{extract_host, same_host};
pub use resolve::build_uri;

/// Parses and validates the seed URL
///
/// The seed must be an absolute `http` or `https` URL with a host; anything
/// else is fatal before crawling begins.
///
/// # Examples
///
/// ```
/// use broken_links::url::parse_seed;
///
/// let seed = parse_seed("http://www.example.com").unwrap();
/// assert_eq!(seed.as_str(), "http://www.example.com/");
///
/// assert!(parse_seed("www.example.com").is_err());
/// assert!(parse_seed("ftp://example.com/").is_err());
/// ```
pub fn parse_seed(input: &str) -> UrlResult<Url> {
    let url = Url::parse(input.trim()).map_err(|source| UrlError::Parse {
        url: input.to_string(),
        source,
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if extract_host(&url).is_none() {
        return Err(UrlError::MissingHost(input.to_string()));
    }

    Ok(url)
}
