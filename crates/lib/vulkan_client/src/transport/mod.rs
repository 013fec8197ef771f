//! Transports carry one gateway request to a backend and return the raw
//! status and body.

pub mod remote;
pub mod simulated;

use async_trait::async_trait;
use http::{Method, StatusCode};

use crate::error::ApiResult;

pub use self::remote::HttpTransport;
pub use self::simulated::SimulatedTransport;

/// A request as the gateway hands it to a transport.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path and query, always starting with `/`.
    pub path: String,
    /// Session token to send as `Authorization: Bearer`.
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Status and body of a backend response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Delivers requests to a backend.
///
/// Implementations report only delivery failures as errors; non-2xx
/// statuses are returned as ordinary responses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse>;

    /// Short description for logs.
    fn describe(&self) -> String;
}
