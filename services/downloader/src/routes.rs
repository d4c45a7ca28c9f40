//! Downloader service routes

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{any, get},
};
use serde_json::json;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extractor::extract_video_metadata,
    fetcher::{fetch_page, probe_resource},
    gate::{MethodCheck, check_method, validate_target_url},
    middleware::cors_middleware,
    models::{DownloadQuery, DownloadResponse, VideoDetails},
    state::AppState,
};

/// Create the router for the downloader service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/tiktok-download", any(tiktok_download))
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "downloader"
    }))
}

/// Look up a TikTok video and confirm its media is reachable
///
/// Fetches the page, extracts the video metadata, then fetches the play URL to
/// report its content type and size.
pub async fn tiktok_download(
    State(state): State<AppState>,
    method: Method,
    query: Option<Query<DownloadQuery>>,
) -> ApiResult<Response> {
    if check_method(&method)? == MethodCheck::Preflight {
        return Ok(StatusCode::OK.into_response());
    }

    let url = validate_target_url(query.as_ref().and_then(|Query(q)| q.url.as_deref()))?;
    info!("Looking up TikTok video: {}", url);

    let html = fetch_page(&state.http_client, &state.page_headers, url).await?;

    let metadata = extract_video_metadata(&html).ok_or_else(|| {
        info!("No video information found for {}", url);
        ApiError::NotFound
    })?;

    let probe =
        probe_resource(&state.http_client, &metadata.play_url, &state.probe_referer).await?;
    info!(
        "Video {} found ({}, {} bytes)",
        metadata.id, probe.content_type, probe.byte_size
    );

    let response = DownloadResponse::found(VideoDetails::new(metadata, probe));
    Ok((StatusCode::OK, Json(response)).into_response())
}
