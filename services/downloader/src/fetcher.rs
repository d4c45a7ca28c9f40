//! Outbound fetches against the upstream page and media resource

use common::error::HttpResult;
use reqwest::{
    Client,
    header::{CONTENT_TYPE, HeaderMap, REFERER},
};
use tracing::info;

use crate::models::ProbeResult;

/// Fetch the video page and return its HTML
///
/// The client already sends the browser User-Agent; `headers` adds the
/// navigation headers. Non-2xx responses are errors.
pub async fn fetch_page(client: &Client, headers: &HeaderMap, url: &str) -> HttpResult<String> {
    info!("Fetching page: {}", url);

    let html = client
        .get(url)
        .headers(headers.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(html)
}

/// Fetch the direct media URL and report what came back
///
/// The media CDN rejects requests without a Referer pointing at the platform.
/// The payload is only measured, never kept.
pub async fn probe_resource(client: &Client, url: &str, referer: &str) -> HttpResult<ProbeResult> {
    info!("Probing media resource: {}", url);

    let response = client
        .get(url)
        .header(REFERER, referer)
        .send()
        .await?
        .error_for_status()?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let payload = response.bytes().await?;

    Ok(ProbeResult {
        content_type,
        byte_size: payload.len() as u64,
    })
}
