//! HTTP transport: sends requests to a served backend with reqwest.

use async_trait::async_trait;
use url::Url;

use super::{ApiRequest, RawResponse, Transport};
use crate::error::{ApiError, ApiResult};

/// Talks to a backend at `base_url` (e.g. `http://127.0.0.1:3000`).
#[derive(Clone, Debug)]
pub struct HttpTransport {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url_for(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Transport(format!("invalid request path {path}: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        let url = self.url_for(&request.path)?;
        let mut builder = self.client.request(request.method, url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }

    fn describe(&self) -> String {
        format!("HTTP backend at {}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_absolute_paths_onto_base() {
        let transport = HttpTransport::new(Url::parse("http://127.0.0.1:3000").unwrap());
        assert_eq!(
            transport.url_for("/domains/1/emails").unwrap().as_str(),
            "http://127.0.0.1:3000/domains/1/emails"
        );
    }
}
