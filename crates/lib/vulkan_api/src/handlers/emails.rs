//! Email account request handlers.
//!
//! Accounts are looked up by account id alone; the domain segment only has
//! to be well formed.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;
use vulkan_core::models::EmailAccount;
use vulkan_core::validation::MIN_PASSWORD_LEN;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::handlers::parse_body;
use crate::models::{
    ChangePasswordRequest, CreateAccountRequest, MessageResponse, UpdateStorageRequest,
    coerce_storage,
};
use crate::routes::{is_account_id, is_domain_id};

fn check_domain(domain_id: &str) -> AppResult<()> {
    if is_domain_id(domain_id) {
        Ok(())
    } else {
        Err(AppError::route_not_found())
    }
}

fn check_account_path(domain_id: &str, email_id: &str) -> AppResult<()> {
    check_domain(domain_id)?;
    if is_account_id(email_id) {
        Ok(())
    } else {
        Err(AppError::route_not_found())
    }
}

/// `GET /domains/{id}/emails`: accounts belonging to the domain.
pub async fn list_accounts_handler(
    State(state): State<AppState>,
    Path(domain_id): Path<String>,
) -> AppResult<Json<Vec<EmailAccount>>> {
    check_domain(&domain_id)?;
    Ok(Json(state.store.read().await.accounts_for(&domain_id)))
}

/// `POST /domains/{id}/emails`: create an account stamped with the domain id.
/// The domain must exist.
pub async fn create_account_handler(
    State(state): State<AppState>,
    Path(domain_id): Path<String>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<EmailAccount>)> {
    check_domain(&domain_id)?;
    let body: CreateAccountRequest = parse_body(&body);

    let email = body.email.filter(|e| !e.is_empty());
    let password = body.password.filter(|p| !p.is_empty());
    let storage = body.storage.as_ref().and_then(coerce_storage);
    let (Some(email), Some(_password), Some(storage)) = (email, password, storage) else {
        return Err(AppError::Validation("Incomplete data".into()));
    };

    let mut store = state.store.write().await;
    if !store.domains().iter().any(|d| d.id == domain_id) {
        return Err(AppError::domain_not_found());
    }
    let account = store.insert_account(&domain_id, &email, storage);
    info!(domain_id = %domain_id, account_id = %account.id, "account created");
    Ok((StatusCode::CREATED, Json(account)))
}

/// `DELETE /domains/{id}/emails/{email_id}`: remove the account.
pub async fn delete_account_handler(
    State(state): State<AppState>,
    Path((domain_id, email_id)): Path<(String, String)>,
) -> AppResult<Json<MessageResponse>> {
    check_account_path(&domain_id, &email_id)?;
    state
        .store
        .write()
        .await
        .remove_account(&email_id)
        .ok_or_else(AppError::account_not_found)?;
    info!(account_id = %email_id, "account deleted");
    Ok(Json(MessageResponse {
        message: "Account deleted successfully".into(),
    }))
}

/// `PATCH /domains/{id}/emails/{email_id}`: flip the blocked flag.
pub async fn toggle_block_handler(
    State(state): State<AppState>,
    Path((domain_id, email_id)): Path<(String, String)>,
) -> AppResult<Json<EmailAccount>> {
    check_account_path(&domain_id, &email_id)?;
    let account = state
        .store
        .write()
        .await
        .toggle_block(&email_id)
        .ok_or_else(AppError::account_not_found)?;
    info!(account_id = %email_id, blocked = account.is_blocked, "block status toggled");
    Ok(Json(account))
}

/// `PUT /domains/{id}/emails/{email_id}`: set the storage quota.
pub async fn update_storage_handler(
    State(state): State<AppState>,
    Path((domain_id, email_id)): Path<(String, String)>,
    body: Bytes,
) -> AppResult<Json<EmailAccount>> {
    check_account_path(&domain_id, &email_id)?;
    let body: UpdateStorageRequest = parse_body(&body);

    let mut store = state.store.write().await;
    if store.account(&email_id).is_none() {
        return Err(AppError::account_not_found());
    }
    let storage = body
        .storage
        .as_ref()
        .and_then(coerce_storage)
        .ok_or_else(|| AppError::Validation("Invalid storage".into()))?;
    let account = store
        .set_storage(&email_id, storage)
        .ok_or_else(AppError::account_not_found)?;
    info!(account_id = %email_id, storage, "storage updated");
    Ok(Json(account))
}

/// `PATCH /domains/{id}/emails/{email_id}/password`: accept a new password.
///
/// Passwords are never stored by the simulated backend.
pub async fn change_password_handler(
    State(state): State<AppState>,
    Path((domain_id, email_id)): Path<(String, String)>,
    body: Bytes,
) -> AppResult<Json<MessageResponse>> {
    check_account_path(&domain_id, &email_id)?;
    let body: ChangePasswordRequest = parse_body(&body);

    if state.store.read().await.account(&email_id).is_none() {
        return Err(AppError::account_not_found());
    }
    let long_enough = body
        .password
        .as_deref()
        .is_some_and(|p| p.chars().count() >= MIN_PASSWORD_LEN);
    if !long_enough {
        return Err(AppError::Validation("Invalid password".into()));
    }
    info!(account_id = %email_id, "password changed");
    Ok(Json(MessageResponse {
        message: "Password changed successfully".into(),
    }))
}
