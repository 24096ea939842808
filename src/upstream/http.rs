//! HTTP implementation of [`Upstream`] backed by `reqwest`

use async_trait::async_trait;
use tracing::debug;

use super::Upstream;
use crate::config::UpstreamConfig;
use crate::error::{GatewayError, TransportError};

/// Upstream client for the content API origin
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: reqwest::Client,
    origin: String,
}

impl HttpUpstream {
    /// Build a client for the configured origin
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be constructed (TLS backend
    /// initialization failure).
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            origin: config.origin.trim_end_matches('/').to_string(),
        })
    }

    /// Origin every path is resolved against
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, GatewayError> {
        let url = format!("{}{}", self.origin, path);
        tracing::trace!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::transport(path, TransportError::Request(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::transport(
                path,
                TransportError::Status(status.as_u16()),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::transport(path, TransportError::Request(e)))?;

        debug!("Fetched {} ({} bytes)", path, body.len());
        Ok(body.to_vec())
    }
}
