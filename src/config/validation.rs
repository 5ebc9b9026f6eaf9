use crate::config::types::{Config, CrawlerConfig, LoginConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the settings a crawl cannot run without
///
/// Login settings are not checked here; see [`discard_invalid_login`].
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Drops unusable login settings so the crawl runs without a session
///
/// Returns true if login settings were discarded.
pub fn discard_invalid_login(config: &mut Config) -> bool {
    let Some(login) = &config.login else {
        return false;
    };
    match validate_login_config(login) {
        Ok(()) => false,
        Err(e) => {
            tracing::warn!("Ignoring login settings, crawling without a session: {}", e);
            config.login = None;
            true
        }
    }
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.parallelism < 1 || config.parallelism > 100 {
        return Err(ConfigError::Validation(format!(
            "parallelism must be between 1 and 100, got {}",
            config.parallelism
        )));
    }

    if config.max_redirects < 1 || config.max_redirects > 50 {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be between 1 and 50, got {}",
            config.max_redirects
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.max_duration_secs == Some(0) {
        return Err(ConfigError::Validation(
            "max_duration_secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates login configuration
pub fn validate_login_config(config: &LoginConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid login url '{}': {}", config.url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Login url '{}' must use http or https",
            config.url
        )));
    }

    if config.username.is_empty() {
        return Err(ConfigError::Validation(
            "login username cannot be empty".to_string(),
        ));
    }

    Ok(())
}
