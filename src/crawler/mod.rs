//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching without automatic redirects
//! - Redirect resolution and page classification
//! - HTML parsing and link extraction
//! - Frontier bookkeeping and concurrency limiting
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod redirect;
mod scheduler;

#[cfg(test)]
mod testing;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, FetchError, FetchResponse, Fetcher, HttpFetcher};
pub use parser::extract_links;
pub use redirect::{fetch_and_resolve, resolve_redirects, Resolution};
pub use scheduler::{Frontier, QueuedUrl, ScheduledVisit, Scheduler};

use crate::config::Config;
use crate::login::login;
use crate::CrawlError;
use tokio::sync::watch;
use url::Url;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Log in, if a login is configured
/// 3. Visit every page reachable from `seed` on the seed's host
///
/// A failed login is logged and the crawl continues without a session.
///
/// # Arguments
///
/// * `seed` - Where the crawl starts
/// * `config` - The validated configuration
/// * `shutdown` - Stops the crawl early once it reads true
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl finished or was interrupted
/// * `Err(CrawlError)` - Crawl could not run
pub async fn crawl(
    seed: Url,
    config: &Config,
    shutdown: Option<watch::Receiver<bool>>,
) -> Result<CrawlOutcome, CrawlError> {
    let client = build_http_client(&config.crawler, &config.user_agent)?;

    let cookie = match &config.login {
        Some(login_config) => match login(&client, login_config).await {
            Ok(cookie) if cookie.is_empty() => {
                tracing::warn!(
                    "Login at {} set no cookies, crawling without a session",
                    login_config.url
                );
                None
            }
            Ok(cookie) => {
                tracing::info!("Logged in at {}", login_config.url);
                Some(cookie)
            }
            Err(e) => {
                tracing::warn!("Login failed, crawling without a session: {}", e);
                None
            }
        },
        None => None,
    };

    let fetcher = HttpFetcher::new(client, cookie);
    let mut coordinator = Coordinator::new(seed, config.crawler.clone(), fetcher)?;
    if let Some(shutdown) = shutdown {
        coordinator = coordinator.with_shutdown(shutdown);
    }

    coordinator.run().await
}
