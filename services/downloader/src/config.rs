//! Service configuration loaded from the environment

use anyhow::Result;
use common::http::HttpConfig;
use std::env;

/// Default listener address
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Referer sent with media probes
pub const DEFAULT_PROBE_REFERER: &str = "https://www.tiktok.com/";

/// Downloader service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Referer header attached to the media probe
    pub probe_referer: String,
    /// Outbound HTTP client configuration
    pub http: HttpConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            probe_referer: DEFAULT_PROBE_REFERER.to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Create a new ServiceConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDRESS`: listener address (default: "0.0.0.0:3000")
    /// - `PROBE_REFERER`: Referer for the media probe (default: "https://www.tiktok.com/")
    /// - plus the `HTTP_*` variables read by [`HttpConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
        let probe_referer =
            env::var("PROBE_REFERER").unwrap_or_else(|_| DEFAULT_PROBE_REFERER.to_string());
        let http = HttpConfig::from_env()?;

        Ok(Self {
            bind_address,
            probe_referer,
            http,
        })
    }
}
