//! Gateway error type.
//!
//! Every non-2xx response and every transport failure becomes an [`ApiError`];
//! callers match on the variant (or [`ApiError::status`]) instead of
//! inspecting raw responses.

use thiserror::Error;

/// Convenience alias for gateway and access-layer results.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Status { status, message },
        }
    }

    /// HTTP status, for errors that came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::BadRequest(_) => Some(400),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::NotFound(_) => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(_) | ApiError::Encode(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m)
            | ApiError::Unauthorized(m)
            | ApiError::NotFound(m)
            | ApiError::Status { message: m, .. }
            | ApiError::Transport(m)
            | ApiError::Encode(m)
            | ApiError::Decode(m) => m,
        }
    }
}
