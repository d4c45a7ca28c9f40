//! Request validation for the download endpoint

use axum::http::Method;

use crate::error::ApiError;

/// Domain substring a target URL must contain
pub const PLATFORM_DOMAIN: &str = "tiktok.com";

/// Outcome of checking the request method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodCheck {
    /// CORS pre-flight, answered with an empty body
    Preflight,
    /// Retrieval request, continue with the pipeline
    Retrieve,
}

/// Check that the request uses a method the endpoint serves
pub fn check_method(method: &Method) -> Result<MethodCheck, ApiError> {
    if method == Method::OPTIONS {
        Ok(MethodCheck::Preflight)
    } else if method == Method::GET {
        Ok(MethodCheck::Retrieve)
    } else {
        Err(ApiError::MethodNotAllowed)
    }
}

/// Validate the target URL parameter
///
/// This is a substring check on the raw text, not URL parsing: any value
/// mentioning the platform domain is accepted.
pub fn validate_target_url(url: Option<&str>) -> Result<&str, ApiError> {
    match url {
        Some(url) if url.contains(PLATFORM_DOMAIN) => Ok(url),
        _ => Err(ApiError::InvalidUrl),
    }
}
