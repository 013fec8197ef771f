use serde_json::Value;
use vulkan_api::models::{
    ChangePasswordRequest, CreateAccountRequest, MessageResponse, UpdateStorageRequest,
};
use vulkan_api::routes;
use vulkan_core::models::{EmailAccount, NewAccount, PasswordChange};

use crate::error::{ApiError, ApiResult};
use crate::gateway::Gateway;

/// Ids become path segments, so malformed ones are refused before any request
/// is sent, with the same answer the backend gives for an unmatched route.
fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".into())
}

fn emails_path(domain_id: &str) -> ApiResult<String> {
    if routes::is_domain_id(domain_id) {
        Ok(routes::domain_emails(domain_id))
    } else {
        Err(not_found())
    }
}

fn email_path(domain_id: &str, account_id: &str) -> ApiResult<String> {
    if routes::is_domain_id(domain_id) && routes::is_account_id(account_id) {
        Ok(routes::domain_email(domain_id, account_id))
    } else {
        Err(not_found())
    }
}

fn password_path(domain_id: &str, account_id: &str) -> ApiResult<String> {
    if routes::is_domain_id(domain_id) && routes::is_account_id(account_id) {
        Ok(routes::domain_email_password(domain_id, account_id))
    } else {
        Err(not_found())
    }
}

/// `GET /domains/{id}/emails`
pub async fn list_accounts(gateway: &Gateway, domain_id: &str) -> ApiResult<Vec<EmailAccount>> {
    gateway.get(&emails_path(domain_id)?).await
}

/// `POST /domains/{id}/emails`
pub async fn create_account(
    gateway: &Gateway,
    domain_id: &str,
    account: &NewAccount,
) -> ApiResult<EmailAccount> {
    let body = CreateAccountRequest {
        email: Some(account.email.clone()),
        password: Some(account.password.clone()),
        storage: Some(Value::from(account.storage)),
    };
    gateway.post(&emails_path(domain_id)?, &body).await
}

/// `DELETE /domains/{id}/emails/{email_id}`
pub async fn delete_account(
    gateway: &Gateway,
    domain_id: &str,
    account_id: &str,
) -> ApiResult<MessageResponse> {
    gateway.delete(&email_path(domain_id, account_id)?).await
}

/// `PATCH /domains/{id}/emails/{email_id}` with no body.
pub async fn toggle_block(
    gateway: &Gateway,
    domain_id: &str,
    account_id: &str,
) -> ApiResult<EmailAccount> {
    gateway
        .patch::<EmailAccount, Value>(&email_path(domain_id, account_id)?, None)
        .await
}

/// `PUT /domains/{id}/emails/{email_id}`
pub async fn update_storage(
    gateway: &Gateway,
    domain_id: &str,
    account_id: &str,
    storage: u64,
) -> ApiResult<EmailAccount> {
    let body = UpdateStorageRequest {
        storage: Some(Value::from(storage)),
    };
    gateway.put(&email_path(domain_id, account_id)?, &body).await
}

/// `PATCH /domains/{id}/emails/{email_id}/password`
pub async fn update_password(
    gateway: &Gateway,
    domain_id: &str,
    account_id: &str,
    change: &PasswordChange,
) -> ApiResult<MessageResponse> {
    let body = ChangePasswordRequest {
        password: Some(change.password.clone()),
    };
    gateway
        .patch(&password_path(domain_id, account_id)?, Some(&body))
        .await
}
