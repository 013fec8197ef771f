//! Request handlers.

pub mod auth;
pub mod domains;
pub mod emails;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;

/// Fallback for unmatched paths and methods.
pub async fn route_not_found() -> AppError {
    AppError::route_not_found()
}

/// Parse a JSON body, treating an empty or malformed body as all fields absent.
pub(crate) fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    if body.is_empty() {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!("ignoring malformed request body: {e}");
        T::default()
    })
}
