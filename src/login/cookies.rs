//! Cookie string assembly from `Set-Cookie` headers

use reqwest::header::{HeaderMap, SET_COOKIE};

/// Joins every `Set-Cookie` header into a single `Cookie` header value
///
/// Only the `name=value` part of each cookie is kept; attributes after the
/// first `;` are dropped. Headers that are not valid UTF-8 are skipped.
pub fn parse_cookies(headers: &HeaderMap) -> String {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}
