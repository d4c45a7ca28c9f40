//! Outbound HTTP client module
//!
//! This module provides the browser-like header configuration and the pooled
//! `reqwest` client used to talk to upstream media sites. Upstream pages serve
//! different markup to clients that do not look like a desktop browser, so the
//! client sends the browser User-Agent on every request and page fetches add
//! the navigation headers from [`page_headers`].

use crate::error::{HttpError, HttpResult};
use reqwest::{
    Client,
    header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue},
};
use std::{env, time::Duration};
use tracing::info;

/// Desktop Chrome user agent sent to upstream sites
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Accept header of a desktop browser navigating to an HTML page
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

/// Accept-Language header sent to upstream sites
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// HTTP client configuration struct
#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    /// User-Agent header value
    pub user_agent: String,
    /// Accept header value used for page fetches
    pub accept: String,
    /// Accept-Language header value used for page fetches
    pub accept_language: String,
    /// Optional request timeout in seconds (no timeout when unset)
    pub timeout_seconds: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout_seconds: None,
        }
    }
}

impl HttpConfig {
    /// Create a new HttpConfig from environment variables
    ///
    /// # Environment Variables
    /// - `HTTP_USER_AGENT`: User-Agent header (default: desktop Chrome 121)
    /// - `HTTP_ACCEPT`: Accept header for page fetches (default: browser HTML accept)
    /// - `HTTP_ACCEPT_LANGUAGE`: Accept-Language header (default: "en-US,en;q=0.9")
    /// - `HTTP_TIMEOUT_SECONDS`: request timeout in seconds (default: none)
    pub fn from_env() -> HttpResult<Self> {
        let user_agent =
            env::var("HTTP_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let accept = env::var("HTTP_ACCEPT").unwrap_or_else(|_| DEFAULT_ACCEPT.to_string());
        let accept_language = env::var("HTTP_ACCEPT_LANGUAGE")
            .unwrap_or_else(|_| DEFAULT_ACCEPT_LANGUAGE.to_string());

        let timeout_seconds = env::var("HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|secs: &u64| *secs > 0);

        Ok(Self {
            user_agent,
            accept,
            accept_language,
            timeout_seconds,
        })
    }
}

/// Build the navigation headers sent with page fetches
///
/// # Arguments
///
/// * `config` - HTTP client configuration
///
/// # Returns
///
/// * `HttpResult<HeaderMap>` - Accept and Accept-Language headers
pub fn page_headers(config: &HttpConfig) -> HttpResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, header_value("Accept", &config.accept)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value("Accept-Language", &config.accept_language)?,
    );
    Ok(headers)
}

/// Initialize a pooled HTTP client sending the browser User-Agent
///
/// # Arguments
///
/// * `config` - HTTP client configuration
///
/// # Returns
///
/// * `HttpResult<Client>` - HTTP client or error
pub fn init_client(config: &HttpConfig) -> HttpResult<Client> {
    let mut builder = Client::builder().user_agent(header_value("User-Agent", &config.user_agent)?);

    if let Some(secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    let client = builder
        .build()
        .map_err(|e| HttpError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

    info!(
        "HTTP client initialized (timeout: {})",
        config
            .timeout_seconds
            .map(|s| format!("{}s", s))
            .unwrap_or_else(|| "none".to_string())
    );

    Ok(client)
}

fn header_value(name: &str, value: &str) -> HttpResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| HttpError::Configuration(format!("Invalid {} header: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_http_config_from_env_defaults() {
        unsafe {
            std::env::remove_var("HTTP_USER_AGENT");
            std::env::remove_var("HTTP_ACCEPT");
            std::env::remove_var("HTTP_ACCEPT_LANGUAGE");
            std::env::remove_var("HTTP_TIMEOUT_SECONDS");
        }

        let config = HttpConfig::from_env().expect("Failed to create http config");
        assert_eq!(config, HttpConfig::default());
        assert_eq!(config.timeout_seconds, None);
    }

    #[test]
    #[serial]
    fn test_http_config_from_env_with_custom_values() {
        unsafe {
            std::env::set_var("HTTP_USER_AGENT", "test-agent/1.0");
            std::env::set_var("HTTP_ACCEPT_LANGUAGE", "fr-FR");
            std::env::set_var("HTTP_TIMEOUT_SECONDS", "15");
        }

        let config = HttpConfig::from_env().unwrap();
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.accept, DEFAULT_ACCEPT);
        assert_eq!(config.accept_language, "fr-FR");
        assert_eq!(config.timeout_seconds, Some(15));

        unsafe {
            std::env::remove_var("HTTP_USER_AGENT");
            std::env::remove_var("HTTP_ACCEPT_LANGUAGE");
            std::env::remove_var("HTTP_TIMEOUT_SECONDS");
        }
    }

    #[test]
    #[serial]
    fn test_http_config_ignores_malformed_timeout() {
        unsafe {
            std::env::set_var("HTTP_TIMEOUT_SECONDS", "soon");
        }

        let config = HttpConfig::from_env().unwrap();
        assert_eq!(config.timeout_seconds, None);

        unsafe {
            std::env::remove_var("HTTP_TIMEOUT_SECONDS");
        }
    }

    #[test]
    fn test_page_headers() {
        let headers = page_headers(&HttpConfig::default()).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get(ACCEPT).unwrap(), DEFAULT_ACCEPT);
        assert_eq!(headers.get(ACCEPT_LANGUAGE).unwrap(), DEFAULT_ACCEPT_LANGUAGE);
    }

    #[test]
    fn test_invalid_header_value_is_configuration_error() {
        let config = HttpConfig {
            accept_language: "bad\nlanguage".to_string(),
            ..HttpConfig::default()
        };

        match page_headers(&config) {
            Err(HttpError::Configuration(msg)) => assert!(msg.contains("Accept-Language")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_user_agent_rejected_by_client() {
        let config = HttpConfig {
            user_agent: "bad\nagent".to_string(),
            ..HttpConfig::default()
        };

        assert!(matches!(
            init_client(&config),
            Err(HttpError::Configuration(_))
        ));
    }

    #[test]
    fn test_init_client() {
        let config = HttpConfig {
            timeout_seconds: Some(5),
            ..HttpConfig::default()
        };
        assert!(init_client(&config).is_ok());
    }
}
