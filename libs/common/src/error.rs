//! Custom error types for the common library
//!
//! This module defines the errors raised while configuring or using the
//! outbound HTTP client shared by the services.

use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Custom error type for outbound HTTP operations
#[derive(Error, Debug)]
pub enum HttpError {
    /// Invalid client configuration (bad header value, builder failure)
    #[error("HTTP client configuration error: {0}")]
    Configuration(String),

    /// Transport or status failure reported by the HTTP client
    #[error(transparent)]
    Request(#[from] ReqwestError),
}

/// Type alias for Result with HttpError
pub type HttpResult<T> = Result<T, HttpError>;
