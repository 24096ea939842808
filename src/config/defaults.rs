//! Default values for configuration fields
//!
//! This module centralizes all default value functions used in serde deserialization.

use crate::types::{FilePath, Port};
use std::time::Duration;

/// Default bind address
#[inline]
pub fn host() -> String {
    "0.0.0.0".to_string()
}

/// Default listen port (standard Gemini port)
#[inline]
pub fn port() -> Port {
    Port::GEMINI
}

/// Default PEM certificate file
#[inline]
pub fn cert_path() -> FilePath {
    FilePath::from_static("host.cert")
}

/// Default PEM private key file
#[inline]
pub fn key_path() -> FilePath {
    FilePath::from_static("host.key")
}

/// Default time allowed for a client to send its request line
#[inline]
pub fn request_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Default upstream API origin
#[inline]
pub fn origin() -> String {
    "https://offprint.net/api".to_string()
}

/// Default User-Agent sent to upstream
#[inline]
pub fn user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}
