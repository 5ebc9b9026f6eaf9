use serde::Deserialize;
use std::time::Duration;

/// Browser-like agent string sent when none is configured
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 8.0.0;) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/77.0.3865.73 Mobile Safari/537.36";

/// Main configuration structure for Broken-Links
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub login: Option<LoginConfig>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of visits running at once
    pub parallelism: u32,

    /// Maximum number of redirect hops followed for a single page
    #[serde(rename = "max-redirects")]
    pub max_redirects: u32,

    /// Connect timeout for each request (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Total timeout for each request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Optional deadline for the whole crawl (seconds)
    #[serde(rename = "max-duration-secs")]
    pub max_duration_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            parallelism: 4,
            max_redirects: 10,
            connect_timeout_secs: 10,
            request_timeout_secs: 20,
            max_duration_secs: None,
        }
    }
}

impl CrawlerConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn max_duration(&self) -> Option<Duration> {
        self.max_duration_secs.map(Duration::from_secs)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Value sent in the User-Agent header
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Credentials for the cookie-based login step
///
/// Missing fields parse as empty; incomplete settings are discarded before
/// the crawl rather than failing the run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    /// Login form URL, used for both the GET and the POST
    pub url: String,

    pub username: String,

    pub password: String,
}
