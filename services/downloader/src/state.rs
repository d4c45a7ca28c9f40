//! Application state shared across handlers

use common::{
    error::HttpResult,
    http::{init_client, page_headers},
};
use reqwest::{Client, header::HeaderMap};

use crate::config::ServiceConfig;

/// Application state shared across handlers
///
/// Holds only configuration and the pooled client; nothing here changes
/// while requests are served.
#[derive(Clone)]
pub struct AppState {
    pub http_client: Client,
    pub page_headers: HeaderMap,
    pub probe_referer: String,
}

impl AppState {
    /// Build the state from the service configuration
    pub fn from_config(config: &ServiceConfig) -> HttpResult<Self> {
        Ok(Self {
            http_client: init_client(&config.http)?,
            page_headers: page_headers(&config.http)?,
            probe_referer: config.probe_referer.clone(),
        })
    }
}
