//! Error types for resource resolution
//!
//! Every resolution (single entity, listing page, search) fails with one
//! [`GatewayError`]. The protocol layer turns it into a single human-readable
//! line via [`GatewayError::user_message`]; the full error chain only goes to
//! the log.

use thiserror::Error;

use crate::markup::ConversionError;

/// Failure talking to the upstream content API
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// Connection, TLS or timeout failure reported by the HTTP client
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Upstream could not be reached (used by non-HTTP upstreams)
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
}

/// Errors that abort a resolution
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// Upstream unreachable or returned a non-success status
    #[error("upstream request for {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: TransportError,
    },

    /// Upstream body did not match the expected JSON shape
    #[error("failed to decode {entity}: {source}")]
    Decode {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// HTML body could not be converted to gemtext
    #[error("markup conversion failed: {0}")]
    Conversion(#[from] ConversionError),
}

impl GatewayError {
    pub(crate) fn transport(path: &str, source: TransportError) -> Self {
        Self::Transport {
            path: path.to_string(),
            source,
        }
    }

    pub(crate) fn decode(entity: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { entity, source }
    }

    /// Message shown to Gemini clients
    ///
    /// Deliberately free of paths, status codes and parser positions.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "The content service is unavailable right now",
            Self::Decode { .. } => "The content service returned something unexpected",
            Self::Conversion(_) => "This content could not be converted to gemtext",
        }
    }

    /// Check if this is an upstream connectivity/status error
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Get the appropriate log level for this error
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        match self {
            // Upstream hiccups are transient and outside our control
            Self::Transport { .. } => tracing::Level::WARN,
            // Shape mismatches and conversion failures point at a real defect
            Self::Decode { .. } | Self::Conversion(_) => tracing::Level::ERROR,
        }
    }
}
