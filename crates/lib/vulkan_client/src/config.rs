//! Client configuration.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::transport::{HttpTransport, SimulatedTransport, Transport};

/// Artificial delay applied by the simulated backend.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

/// Automatic retries for a failed read.
pub const DEFAULT_READ_RETRIES: u32 = 1;

/// Configuration for the gateway and query cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Served backend to talk to; `None` uses the in-process simulated backend.
    pub backend_url: Option<Url>,
    /// Delay before the simulated backend answers.
    pub latency: Duration,
    pub read_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            latency: DEFAULT_LATENCY,
            read_retries: DEFAULT_READ_RETRIES,
        }
    }
}

impl ClientConfig {
    /// Build the transport this configuration selects.
    pub fn transport(&self) -> Arc<dyn Transport> {
        match &self.backend_url {
            Some(url) => Arc::new(HttpTransport::new(url.clone())),
            None => Arc::new(SimulatedTransport::seeded(self.latency)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_simulated_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.latency, Duration::from_millis(800));
        assert_eq!(config.read_retries, 1);
        assert!(config.transport().describe().starts_with("simulated backend"));
    }

    #[test]
    fn backend_url_selects_http_transport() {
        let config = ClientConfig {
            backend_url: Some(Url::parse("http://127.0.0.1:3000").unwrap()),
            ..Default::default()
        };
        assert!(config.transport().describe().starts_with("HTTP backend"));
    }
}
