//! Configuration validation
//!
//! This module provides validation logic for the configuration to ensure
//! all settings are valid before the gateway starts.

use anyhow::{Result, bail};
use url::Url;

use super::types::Config;

impl Config {
    /// Validate configuration for correctness
    ///
    /// Ports and paths are already enforced by their types. This checks the
    /// remaining semantic constraints:
    /// - Upstream origin is an absolute http(s) URL
    /// - Converter depth limit is non-zero
    pub fn validate(&self) -> Result<()> {
        let origin = Url::parse(&self.upstream.origin).map_err(|e| {
            anyhow::anyhow!("Invalid upstream origin '{}': {}", self.upstream.origin, e)
        })?;

        if !matches!(origin.scheme(), "http" | "https") {
            bail!(
                "Upstream origin '{}' must use http or https",
                self.upstream.origin
            );
        }

        if origin.query().is_some() {
            bail!(
                "Upstream origin '{}' must not carry a query string",
                self.upstream.origin
            );
        }

        if self.converter.max_depth == 0 {
            bail!("converter.max_depth must be greater than 0");
        }

        if self.server.request_timeout.is_zero() {
            tracing::warn!("server.request_timeout is 0; every request will time out");
        }

        Ok(())
    }
}
