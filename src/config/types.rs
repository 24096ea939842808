//! Configuration type definitions
//!
//! This module contains all the configuration structures used by the gateway.

use crate::markup::ConverterOptions;
use crate::types::{FilePath, Port, duration_serde};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::defaults;

/// Main gateway configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Gemini listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream content API settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// HTML → gemtext conversion settings
    #[serde(default)]
    pub converter: ConverterOptions,
}

/// Gemini listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to
    #[serde(default = "defaults::host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "defaults::port")]
    pub port: Port,
    /// PEM certificate chain presented to clients
    #[serde(default = "defaults::cert_path")]
    pub cert_path: FilePath,
    /// PEM private key matching `cert_path`
    #[serde(default = "defaults::key_path")]
    pub key_path: FilePath,
    /// Time allowed for a client to send its request line
    #[serde(
        with = "duration_serde",
        default = "defaults::request_timeout"
    )]
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            cert_path: defaults::cert_path(),
            key_path: defaults::key_path(),
            request_timeout: defaults::request_timeout(),
        }
    }
}

/// Upstream content API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "defaults::origin")]
    pub origin: String,
    /// User-Agent header sent with each request
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: defaults::origin(),
            user_agent: defaults::user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.port, Port::GEMINI);
        assert_eq!(config.upstream.origin, "https://offprint.net/api");
        assert_eq!(config.server.request_timeout, Duration::from_secs(10));
        assert_eq!(config.converter.max_depth, ConverterOptions::DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 1966
            cert_path = "/etc/gemini/cert.pem"

            [converter]
            max_depth = 64
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port.get(), 1966);
        assert_eq!(config.server.cert_path.as_str(), "/etc/gemini/cert.pem");
        assert_eq!(config.server.key_path.as_str(), "host.key");
        assert_eq!(config.converter.max_depth, 64);
        assert!(config.converter.citations);
    }

    #[test]
    fn test_zero_port_rejected() {
        let result: Result<Config, _> = toml::from_str("[server]\nport = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
