//! Redirect resolution and status classification
//!
//! Turns the outcome of a fetch into a terminal [`Status`], following `3xx`
//! responses hop by hop up to a fixed limit.

use crate::crawler::fetcher::{FetchError, FetchResponse, Fetcher};
use crate::state::{Status, MISSING_LOCATION, TOO_MANY_REDIRECTS, UNKNOWN_RESPONSE};
use crate::url::build_uri;
use url::Url;

/// Terminal outcome of fetching a page
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Classification of the final response
    pub status: Status,

    /// Last URL requested in the chain
    pub final_url: Url,

    /// Body of the final response, present only when alive
    pub body: Option<String>,

    /// Number of redirect hops followed
    pub hops: u32,
}

impl Resolution {
    fn failed(final_url: Url, hops: u32, reason: impl Into<String>) -> Self {
        Self {
            status: Status::error(reason),
            final_url,
            body: None,
            hops,
        }
    }
}

/// Fetches `uri` and resolves the response to a terminal status
pub async fn fetch_and_resolve<F: Fetcher>(fetcher: &F, uri: &Url, max_redirects: u32) -> Resolution {
    let outcome = fetcher.fetch(uri).await;
    resolve_redirects(fetcher, uri, outcome, max_redirects).await
}

/// Resolves an already-fetched outcome to a terminal status
///
/// # Classification
///
/// | Final response | Status |
/// |----------------|--------|
/// | 2xx, no hops | `Ok` |
/// | 2xx after >= 1 hop | `Redirected` to the last URL |
/// | 3xx | follow `Location`, resolved against the current URL |
/// | 3xx past `max_redirects` hops | `Error("Too many redirects")` |
/// | anything else | `Error("Unknown Response")` |
/// | transport failure | `Error(<failure>)` |
pub async fn resolve_redirects<F: Fetcher>(
    fetcher: &F,
    uri: &Url,
    outcome: Result<FetchResponse, FetchError>,
    max_redirects: u32,
) -> Resolution {
    let mut current = uri.clone();
    let mut outcome = outcome;
    let mut hops = 0u32;

    loop {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Fetch failed for {}: {}", current, e);
                return Resolution::failed(current, hops, e.to_string());
            }
        };

        if response.status.is_success() {
            let status = if hops == 0 {
                Status::Ok
            } else {
                Status::Redirected {
                    redirected_to: current.to_string(),
                }
            };
            return Resolution {
                status,
                final_url: current,
                body: Some(response.body),
                hops,
            };
        }

        if !response.status.is_redirection() {
            tracing::debug!("{} answered HTTP {}", current, response.status.as_u16());
            return Resolution::failed(current, hops, UNKNOWN_RESPONSE);
        }

        let Some(raw_location) = response.location else {
            return Resolution::failed(current, hops, MISSING_LOCATION);
        };
        let Ok(location) = raw_location.to_str() else {
            return Resolution::failed(
                current,
                hops,
                format!(
                    "Invalid redirect target '{}': not valid UTF-8",
                    String::from_utf8_lossy(raw_location.as_bytes())
                ),
            );
        };

        let target = match build_uri(&current, location.trim()) {
            Ok(target) => target,
            Err(e) => {
                return Resolution::failed(
                    current,
                    hops,
                    format!("Invalid redirect target '{}': {}", location, e),
                );
            }
        };

        if hops >= max_redirects {
            tracing::debug!("Giving up on {} after {} redirects", uri, hops);
            return Resolution::failed(current, hops, TOO_MANY_REDIRECTS);
        }

        hops += 1;
        tracing::debug!("Redirect {} -> {} (hop {})", current, target, hops);
        outcome = fetcher.fetch(&target).await;
        current = target;
    }
}
