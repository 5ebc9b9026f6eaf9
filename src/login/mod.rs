//! Form login ahead of the crawl
//!
//! Logging in is a two-step exchange against the login URL: a GET to pick up
//! any pre-session cookies, then a form POST of the credentials carrying those
//! cookies. The cookies set by a successful POST become the session cookie
//! attached to every crawl request.

mod cookies;

pub use cookies::parse_cookies;

use crate::config::LoginConfig;
use reqwest::{header, Client, StatusCode};
use thiserror::Error;

/// Login-specific errors
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Invalid login URL '{0}'")]
    InvalidUrl(String),

    #[error("Login request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    #[error("Login rejected with HTTP {0}")]
    Rejected(StatusCode),
}

/// Logs in and returns the session cookie string
///
/// # Arguments
///
/// * `client` - The client the crawl will use
/// * `config` - Login URL and credentials
///
/// # Returns
///
/// * `Ok(String)` - The `Cookie` header value; empty if the server set none
/// * `Err(LoginError)` - The exchange failed or the POST was not a 2xx
pub async fn login(client: &Client, config: &LoginConfig) -> Result<String, LoginError> {
    let login_url = url::Url::parse(&config.url)
        .map_err(|_| LoginError::InvalidUrl(config.url.clone()))?;

    let http_error = |source| LoginError::Http {
        url: config.url.clone(),
        source,
    };

    let landing = client
        .get(login_url.clone())
        .send()
        .await
        .map_err(http_error)?;
    let pre_session = parse_cookies(landing.headers());
    tracing::debug!(
        "Login page {} answered HTTP {}",
        login_url,
        landing.status().as_u16()
    );

    let mut request = client
        .post(login_url.clone())
        .header(header::REFERER, login_url.as_str())
        .form(&[
            ("username", config.username.as_str()),
            ("password", config.password.as_str()),
        ]);
    if !pre_session.is_empty() {
        request = request.header(header::COOKIE, pre_session);
    }

    let response = request.send().await.map_err(http_error)?;
    if !response.status().is_success() {
        return Err(LoginError::Rejected(response.status()));
    }

    Ok(parse_cookies(response.headers()))
}
