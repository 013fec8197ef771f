use vulkan_api::models::{LoginRequest, TokenResponse};
use vulkan_api::routes;
use vulkan_core::models::Credentials;

use crate::error::ApiResult;
use crate::gateway::Gateway;

/// `POST /login`, returning the issued token.
///
/// The token is not stored; the caller decides whether to log the session in.
pub async fn login(gateway: &Gateway, credentials: &Credentials) -> ApiResult<String> {
    let body = LoginRequest {
        email: credentials.email.clone(),
        password: credentials.password.clone(),
    };
    let response: TokenResponse = gateway.post(routes::POST_LOGIN, &body).await?;
    Ok(response.access_token)
}
