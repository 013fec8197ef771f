//! In-process transport: answers requests from the simulated backend router
//! without touching the network, after an artificial delay.

use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tower::ServiceExt;
use tracing::trace;
use vulkan_api::AppState;

use super::{ApiRequest, RawResponse, Transport};
use crate::error::{ApiError, ApiResult};

/// Drives a `vulkan_api` router with `oneshot`.
#[derive(Clone)]
pub struct SimulatedTransport {
    router: Router,
    latency: Duration,
}

impl SimulatedTransport {
    /// Transport over the backend built from `state`.
    pub fn new(state: AppState, latency: Duration) -> Self {
        Self {
            router: vulkan_api::router(state),
            latency,
        }
    }

    /// Transport over a freshly seeded backend with default configuration.
    pub fn seeded(latency: Duration) -> Self {
        Self::new(AppState::default(), latency)
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        if !self.latency.is_zero() {
            trace!(latency_ms = self.latency.as_millis() as u64, "simulating latency");
            tokio::time::sleep(self.latency).await;
        }

        let mut builder = http::Request::builder()
            .method(request.method)
            .uri(&request.path)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match &request.body {
            Some(value) => {
                Body::from(serde_json::to_vec(value).map_err(|e| ApiError::Encode(e.to_string()))?)
            }
            None => Body::empty(),
        };
        let req = builder
            .body(body)
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let resp = self
            .router
            .clone()
            .oneshot(req)
            .await
            .unwrap_or_else(|never| match never {});
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(RawResponse {
            status,
            body: bytes.to_vec(),
        })
    }

    fn describe(&self) -> String {
        format!("simulated backend ({} ms latency)", self.latency.as_millis())
    }
}
