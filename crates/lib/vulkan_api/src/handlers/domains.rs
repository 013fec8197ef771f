//! Domain request handlers.

use axum::Json;
use axum::extract::State;
use vulkan_core::models::Domain;

use crate::AppState;

/// `GET /domains`: every domain in the store.
pub async fn list_domains_handler(State(state): State<AppState>) -> Json<Vec<Domain>> {
    Json(state.store.read().await.domains().to_vec())
}
