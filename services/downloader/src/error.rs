//! Custom error types for the downloader service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the downloader service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request used a method other than GET or OPTIONS
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The `url` parameter is missing or not a TikTok URL
    #[error("Invalid or missing TikTok URL")]
    InvalidUrl,

    /// Neither extraction path produced video metadata
    #[error("Video information not found")]
    NotFound,

    /// Page fetch or media probe failed
    #[error(transparent)]
    Fetch(#[from] common::error::HttpError),

    /// Any other failure while handling the request
    ///
    /// Completes the 500 class next to `Fetch`. The current pipeline has no
    /// step outside the two fetches that can fail, so only `?` on an
    /// `anyhow::Error` produces it.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidUrl => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Fetch(_) | ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = if status.is_server_error() {
            let message = self.to_string();
            error!("Error fetching TikTok video: {}", message);
            json!({
                "error": "Failed to download video",
                "message": message,
            })
        } else {
            json!({ "error": self.to_string() })
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
