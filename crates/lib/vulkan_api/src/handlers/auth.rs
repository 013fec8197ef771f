//! Authentication request handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use tracing::{info, warn};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::handlers::parse_body;
use crate::models::{LoginRequest, TokenResponse};

/// `POST /login`: authenticate against the fixed administrator pair.
pub async fn login_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<TokenResponse>> {
    let body: LoginRequest = parse_body(&body);
    let config = &state.config;
    if body.email != config.admin_email || body.password != config.admin_password {
        warn!(email = %body.email, "rejected login");
        return Err(AppError::Unauthorized(format!(
            "Invalid username or password. Try {} / {}",
            config.admin_email, config.admin_password
        )));
    }
    info!(email = %body.email, "login accepted");
    Ok(Json(TokenResponse {
        access_token: config.access_token.clone(),
    }))
}
