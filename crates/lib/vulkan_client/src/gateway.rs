//! Backend gateway: attaches the session token, encodes JSON bodies, and
//! turns responses into typed values or [`ApiError`]s.
//!
//! The gateway never recovers from errors; it only classifies them.

use std::sync::Arc;

use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use vulkan_api::models::ErrorResponse;
use vulkan_core::session::Session;

use crate::error::{ApiError, ApiResult};
use crate::transport::{ApiRequest, RawResponse, Transport};

/// Request/response client bound to one session.
#[derive(Clone)]
pub struct Gateway {
    transport: Arc<dyn Transport>,
    session: Session,
}

impl Gateway {
    pub fn new(transport: Arc<dyn Transport>, session: Session) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn describe(&self) -> String {
        self.transport.describe()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send(Method::POST, path, Some(encode(body)?)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.send(Method::PUT, path, Some(encode(body)?)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let body = body.map(encode).transpose()?;
        self.send(Method::PATCH, path, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::DELETE, path, None).await
    }

    /// Send one request and decode a 2xx body into `T`.
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<T> {
        let request = ApiRequest {
            method: method.clone(),
            path: path.to_string(),
            bearer: self.session.token(),
            body,
        };
        let response = self.transport.send(request).await.inspect_err(|e| {
            warn!(%method, path, error = %e, "request not delivered");
        })?;
        debug!(%method, path, status = response.status.as_u16(), "backend response");

        if !response.status.is_success() {
            return Err(error_from_response(&response));
        }
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn encode<B: Serialize>(body: &B) -> ApiResult<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Build an error from a non-2xx response, preferring the body's `message`.
fn error_from_response(response: &RawResponse) -> ApiError {
    let message = serde_json::from_slice::<ErrorResponse>(&response.body)
        .ok()
        .map(|body| body.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            response
                .status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
    ApiError::from_status(response.status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use http::StatusCode;
    use serde_json::{Value, json};
    use vulkan_api::AppState;
    use vulkan_api::config::BackendConfig;
    use vulkan_core::models::Domain;

    use super::*;
    use crate::transport::SimulatedTransport;

    /// Records requests and answers with a canned response.
    struct CannedTransport {
        status: StatusCode,
        body: Vec<u8>,
        seen: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
            self.seen.lock().unwrap().push(request);
            Ok(RawResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }

        fn describe(&self) -> String {
            "canned".into()
        }
    }

    fn canned(status: StatusCode, body: &[u8]) -> Arc<CannedTransport> {
        Arc::new(CannedTransport {
            status,
            body: body.to_vec(),
            seen: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn attaches_bearer_only_when_logged_in() {
        let transport = canned(StatusCode::OK, b"[]");
        let session = Session::in_memory();
        let gateway = Gateway::new(transport.clone(), session.clone());

        let _: Vec<Domain> = gateway.get("/domains").await.unwrap();
        session.login("fake-jtw-token").unwrap();
        let _: Vec<Domain> = gateway.get("/domains").await.unwrap();

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen[0].bearer, None);
        assert_eq!(seen[1].bearer.as_deref(), Some("fake-jtw-token"));
        assert_eq!(seen[1].method, Method::GET);
        assert_eq!(seen[1].path, "/domains");
    }

    #[tokio::test]
    async fn error_message_comes_from_body() {
        let transport = canned(
            StatusCode::NOT_FOUND,
            br#"{"error":"not_found","message":"Account not found"}"#,
        );
        let gateway = Gateway::new(transport, Session::in_memory());
        let err = gateway.delete::<Value>("/domains/1/emails/x").await.unwrap_err();
        assert_eq!(err, ApiError::NotFound("Account not found".into()));
    }

    #[tokio::test]
    async fn error_message_falls_back_to_reason_phrase() {
        let transport = canned(StatusCode::SERVICE_UNAVAILABLE, b"");
        let gateway = Gateway::new(transport, Session::in_memory());
        let err = gateway.get::<Value>("/domains").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 503,
                message: "Service Unavailable".into()
            }
        );
    }

    #[tokio::test]
    async fn undecodable_success_body_is_decode_error() {
        let transport = canned(StatusCode::OK, b"not json");
        let gateway = Gateway::new(transport, Session::in_memory());
        let err = gateway.get::<Vec<Domain>>("/domains").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn patch_without_body_sends_none() {
        let transport = canned(StatusCode::OK, b"{}");
        let gateway = Gateway::new(transport.clone(), Session::in_memory());
        let _: Value = gateway
            .patch::<Value, Value>("/domains/1/emails/2", None)
            .await
            .unwrap();
        let _: Value = gateway
            .patch("/domains/1/emails/2/password", Some(&json!({"password": "abcdef"})))
            .await
            .unwrap();
        let seen = transport.seen.lock().unwrap();
        assert!(seen[0].body.is_none());
        assert_eq!(seen[1].body, Some(json!({"password": "abcdef"})));
    }

    #[tokio::test]
    async fn simulated_backend_sees_the_session_token() {
        let state = AppState::new(BackendConfig {
            enforce_auth: true,
            ..BackendConfig::default()
        });
        let transport = Arc::new(SimulatedTransport::new(state, Duration::ZERO));
        let session = Session::in_memory();
        let gateway = Gateway::new(transport, session.clone());

        let err = gateway.get::<Vec<Domain>>("/domains").await.unwrap_err();
        assert_eq!(err.status(), Some(401));

        session.login("fake-jtw-token").unwrap();
        let domains: Vec<Domain> = gateway.get("/domains").await.unwrap();
        assert_eq!(domains.len(), 2);
    }

    #[tokio::test]
    async fn simulated_latency_delays_the_answer() {
        let transport = Arc::new(SimulatedTransport::seeded(Duration::from_millis(30)));
        let gateway = Gateway::new(transport, Session::in_memory());
        let started = std::time::Instant::now();
        let _: Vec<Domain> = gateway.get("/domains").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
