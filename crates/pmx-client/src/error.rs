//! Client error types.

use std::path::PathBuf;

use pmx_models::ContentClass;
use thiserror::Error;

/// Result type for client operations.
pub type PmxResult<T> = Result<T, PmxError>;

/// Errors that can occur while talking to the platform API.
///
/// Validation and local filesystem failures are detected before any remote
/// call is made; transport failures are surfaced to the caller verbatim.
#[derive(Debug, Error)]
pub enum PmxError {
    #[error("client configuration invalid: {0}")]
    Config(String),

    #[error("only iso and vztmpl content is allowed, got {0}")]
    InvalidContentClass(ContentClass),

    #[error("file is a directory: {}", .0.display())]
    FileIsDirectory(PathBuf),

    #[error("volid or path required for a delete")]
    MissingVolumeId,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("rate limited, retry after {0}ms")]
    RateLimited(u64),

    #[error("server error {0}: {1}")]
    ServerError(u16, String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PmxError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Map an HTTP error status to a typed error.
    pub fn from_http_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => Self::PermissionDenied(body),
            404 => Self::NotFound(body),
            429 => Self::RateLimited(1000),
            500..=599 => Self::ServerError(status, body),
            _ => Self::RequestFailed(format!("status {}: {}", status, body)),
        }
    }

    /// Check if a retry can be expected to help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PmxError::Network(_) | PmxError::RateLimited(_) | PmxError::ServerError(..)
        )
    }

    /// HTTP status behind this error, when one applies.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            PmxError::NotFound(_) => Some(404),
            PmxError::PermissionDenied(_) => Some(403),
            PmxError::RateLimited(_) => Some(429),
            PmxError::ServerError(status, _) => Some(*status),
            _ => None,
        }
    }

    /// Server-provided retry hint in milliseconds, for rate limits.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            PmxError::RateLimited(ms) => Some(*ms),
            _ => None,
        }
    }
}
