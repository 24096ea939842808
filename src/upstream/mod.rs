//! Upstream content API client
//!
//! [`Upstream`] is the seam between the resolution pipeline and the network:
//! one call, one outbound request, raw bytes back. Production uses
//! [`HttpUpstream`]; tests inject [`MockUpstream`] to count and script fetches.

mod endpoints;
mod http;
mod mock;

pub use endpoints::Endpoint;
pub use http::HttpUpstream;
pub use mock::MockUpstream;

use async_trait::async_trait;

use crate::error::GatewayError;

/// Fixed-origin content API
#[async_trait]
pub trait Upstream: Send + Sync + std::fmt::Debug {
    /// Fetch `path` (path plus pre-escaped query) relative to the origin
    ///
    /// Exactly one attempt. Connection failures and non-2xx statuses are
    /// both reported as [`GatewayError::Transport`].
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, GatewayError>;
}
