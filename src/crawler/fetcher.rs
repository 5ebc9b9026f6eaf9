//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests issued by the traversal engine:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Single GET requests, with redirects left to the caller
//! - Attaching the login cookie to every request
//! - Transport error classification

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::{header, header::HeaderValue, redirect::Policy, Client, StatusCode};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// A response the fetcher received, whatever its status
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: StatusCode,

    /// Raw `Location` header value, if present
    ///
    /// Kept as bytes; a value that is not valid UTF-8 is still a Location.
    pub location: Option<HeaderValue>,

    /// Page body; only read for 2xx responses
    pub body: String,
}

/// A request that never produced a response
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Failed to read body: {0}")]
    Body(String),

    #[error("Request failed: {0}")]
    Request(String),
}

/// Issues a single GET request for the traversal engine
///
/// Implementations must not follow redirects themselves; the redirect
/// resolver walks the chain so it can classify it.
pub trait Fetcher: Send + Sync + 'static {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchResponse, FetchError>> + Send;
}

impl<T: Fetcher> Fetcher for Arc<T> {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchResponse, FetchError>> + Send {
        (**self).fetch(url)
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `crawler` - Timeouts for each request
/// * `user_agent` - The User-Agent header value
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use broken_links::config::Config;
/// use broken_links::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.crawler, &config.user_agent).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.value.as_str())
        .timeout(crawler.request_timeout())
        .connect_timeout(crawler.connect_timeout())
        .redirect(Policy::none()) // Handle redirects manually
        .gzip(true)
        .brotli(true)
        .build()
}

/// Reqwest-backed fetcher used for real crawls
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    cookie: Option<String>,
}

impl HttpFetcher {
    /// Creates a fetcher that sends `cookie` (if any) as the Cookie header
    pub fn new(client: Client, cookie: Option<String>) -> Self {
        Self { client, cookie }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, FetchError> {
        let mut request = self.client.get(url.clone());
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await.map_err(classify_error)?;
        let status = response.status();
        let location = response.headers().get(header::LOCATION).cloned();

        // Only successful pages are scanned for links
        let body = if status.is_success() {
            response
                .text()
                .await
                .map_err(|e| FetchError::Body(e.to_string()))?
        } else {
            String::new()
        };

        Ok(FetchResponse {
            status,
            location,
            body,
        })
    }
}

/// Maps a transport error to the reason recorded on the page
fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Request(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header as header_is, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> Client {
        let config = crate::config::Config::default();
        build_http_client(&config.crawler, &config.user_agent).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let config = crate::config::Config::default();
        assert!(build_http_client(&config.crawler, &config.user_agent).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success_reads_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<a href=\"/x\">x</a>"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(client(), None);
        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();
        let response = fetcher.fetch(&url).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "<a href=\"/x\">x</a>");
        assert!(response.location.is_none());
    }

    #[tokio::test]
    async fn test_fetch_does_not_follow_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(client(), None);
        let url = Url::parse(&format!("{}/old", server.uri())).unwrap();
        let response = fetcher.fetch(&url).await.unwrap();

        assert_eq!(response.status, StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.location.as_ref().and_then(|v| v.to_str().ok()),
            Some("/new")
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/private"))
            .and(header_is("cookie", "session=abc"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(client(), Some("session=abc".to_string()));
        let url = Url::parse(&format!("{}/private", server.uri())).unwrap();
        let response = fetcher.fetch(&url).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop a listener so the port is known to be closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let fetcher = HttpFetcher::new(client(), None);
        let url = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();
        let error = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(error, FetchError::Connect(_)));
    }
}
