//! Client configuration

use std::time::Duration;

use url::Url;

use crate::error::{ApiError, ApiResult};

pub const DEV_API_URL: &str = "http://localhost:8000";
pub const PROD_API_URL: &str = "https://api.bubblehack.fr";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, always ending in `/`
    pub api_base_url: Url,
    pub request_timeout: Duration,
    /// Bearer token of an existing session
    pub access_token: Option<String>,
}

impl Config {
    /// Load configuration from `BUBBLE_CLEANER_*` environment variables
    pub fn from_env() -> ApiResult<Self> {
        let production = std::env::var("BUBBLE_CLEANER_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let api_url = std::env::var("BUBBLE_CLEANER_API_URL").unwrap_or_else(|_| {
            if production {
                PROD_API_URL.to_string()
            } else {
                DEV_API_URL.to_string()
            }
        });

        let timeout_secs = match std::env::var("BUBBLE_CLEANER_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ApiError::Config(format!("BUBBLE_CLEANER_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let access_token = std::env::var("BUBBLE_CLEANER_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        Ok(Self {
            api_base_url: parse_base_url(&api_url)?,
            request_timeout: Duration::from_secs(timeout_secs),
            access_token,
        })
    }

    /// Configuration pointing at `api_url` with defaults for everything else
    pub fn for_url(api_url: &str) -> ApiResult<Self> {
        Ok(Self {
            api_base_url: parse_base_url(api_url)?,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            access_token: None,
        })
    }

    pub fn with_api_url(mut self, api_url: &str) -> ApiResult<Self> {
        self.api_base_url = parse_base_url(api_url)?;
        Ok(self)
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        if token.is_some() {
            self.access_token = token;
        }
        self
    }
}

fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ApiError::Config(format!("invalid API URL '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::Config(format!(
            "API URL must use http or https: {}",
            raw
        )));
    }

    // Url::join drops the last path segment unless the base ends in '/'
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "BUBBLE_CLEANER_ENV",
            "BUBBLE_CLEANER_API_URL",
            "BUBBLE_CLEANER_TIMEOUT_SECS",
            "BUBBLE_CLEANER_TOKEN",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_to_local_backend() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.access_token.is_none());
    }

    #[test]
    #[serial]
    fn test_production_default() {
        clear_env();
        std::env::set_var("BUBBLE_CLEANER_ENV", "production");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base_url.as_str(), "https://api.bubblehack.fr/");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_explicit_values() {
        clear_env();
        std::env::set_var("BUBBLE_CLEANER_API_URL", "https://staging.example.com/api");
        std::env::set_var("BUBBLE_CLEANER_TIMEOUT_SECS", "5");
        std::env::set_var("BUBBLE_CLEANER_TOKEN", "abc123");
        let config = Config::from_env().unwrap();
        assert_eq!(
            config.api_base_url.join("subscriptions").unwrap().as_str(),
            "https://staging.example.com/api/subscriptions"
        );
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.access_token.as_deref(), Some("abc123"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_is_rejected() {
        clear_env();
        std::env::set_var("BUBBLE_CLEANER_TIMEOUT_SECS", "soon");
        assert!(matches!(Config::from_env(), Err(ApiError::Config(_))));
        clear_env();
    }

    #[test]
    fn test_base_url_validation() {
        assert!(Config::for_url("ftp://example.com").is_err());
        assert!(Config::for_url("not a url").is_err());
        let config = Config::for_url("http://127.0.0.1:9000").unwrap();
        assert_eq!(config.api_base_url.as_str(), "http://127.0.0.1:9000/");
    }
}
