//! # vulkan_api
//!
//! Simulated HTTP backend for the Vulkan console. Answers the login, domain
//! and email-account routes from an in-memory [`store::FixtureStore`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch, post};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::BackendConfig;
use crate::handlers::{auth, domains, emails, route_not_found};
use crate::store::FixtureStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Domain and account lists owned by this backend instance.
    pub store: Arc<RwLock<FixtureStore>>,
    /// Backend configuration.
    pub config: BackendConfig,
}

impl AppState {
    /// State over a freshly seeded fixture store.
    pub fn new(config: BackendConfig) -> Self {
        Self::with_store(FixtureStore::seeded(), config)
    }

    pub fn with_store(store: FixtureStore, config: BackendConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(BackendConfig::default())
    }
}

/// Builds the Axum router with all routes and shared state.
///
/// Unmatched paths and unmatched methods on known paths both answer 404.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new().route(
        routes::POST_LOGIN,
        post(auth::login_handler).fallback(route_not_found),
    );

    // Domain routes (bearer checked only when enforcement is on)
    let protected = Router::new()
        .route(
            routes::GET_DOMAINS,
            get(domains::list_domains_handler).fallback(route_not_found),
        )
        .route(
            routes::DOMAIN_EMAILS,
            get(emails::list_accounts_handler)
                .post(emails::create_account_handler)
                .fallback(route_not_found),
        )
        .route(
            routes::DOMAIN_EMAIL,
            axum::routing::delete(emails::delete_account_handler)
                .patch(emails::toggle_block_handler)
                .put(emails::update_storage_handler)
                .fallback(route_not_found),
        )
        .route(
            routes::DOMAIN_EMAIL_PASSWORD,
            patch(emails::change_password_handler).fallback(route_not_found),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .fallback(route_not_found)
        .layer(cors)
        .with_state(state)
}

/// Serve the backend over TCP on `state.config.bind_addr` until the process
/// is stopped.
pub async fn serve(state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&state.config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "simulated backend listening");
    axum::serve(listener, router(state)).await
}
