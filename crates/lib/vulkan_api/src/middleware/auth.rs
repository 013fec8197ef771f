//! Bearer token middleware.
//!
//! The simulated backend does not enforce authentication unless
//! `BackendConfig::enforce_auth` is set; the token is only logged.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::AppState;
use crate::error::AppError;

/// Axum middleware: extracts `Authorization: Bearer <token>` and, when
/// enforcement is on, rejects requests that do not carry the issued token.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    debug!(
        path = %request.uri().path(),
        has_bearer = bearer.is_some(),
        "domain route request"
    );

    if state.config.enforce_auth {
        let token = bearer
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;
        if token != state.config.access_token {
            return Err(AppError::Unauthorized("Invalid token".into()));
        }
    }

    Ok(next.run(request).await)
}
