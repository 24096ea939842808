//! Configuration loading from files and environment variables
//!
//! This module handles loading configuration from TOML files and environment variables,
//! with environment variables taking precedence for Docker/container deployments.

use anyhow::{Context, Result};
use std::path::Path;

use super::types::Config;
use crate::types::FilePath;

/// Overrides `upstream.origin`
pub const ENV_ORIGIN: &str = "GEMINI_GATEWAY_ORIGIN";
/// Overrides `server.cert_path`
pub const ENV_CERT: &str = "GEMINI_GATEWAY_CERT";
/// Overrides `server.key_path`
pub const ENV_KEY: &str = "GEMINI_GATEWAY_KEY";

/// Where the effective configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from an existing file
    File,
    /// File was missing; defaults were written to it
    DefaultCreated,
}

impl ConfigSource {
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::File => "configuration file",
            Self::DefaultCreated => "newly created default configuration",
        }
    }
}

/// Apply environment variable overrides to a loaded configuration
///
/// Supported variables:
/// - `GEMINI_GATEWAY_ORIGIN` - upstream API origin
/// - `GEMINI_GATEWAY_CERT` - PEM certificate path
/// - `GEMINI_GATEWAY_KEY` - PEM private key path
///
/// This allows Docker/container deployments to point the gateway elsewhere
/// without modifying the config file.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Ok(origin) = std::env::var(ENV_ORIGIN) {
        tracing::info!("Using upstream origin {} from {}", origin, ENV_ORIGIN);
        config.upstream.origin = origin;
    }

    if let Ok(cert) = std::env::var(ENV_CERT) {
        config.server.cert_path =
            FilePath::new(cert).with_context(|| format!("Invalid {}", ENV_CERT))?;
    }

    if let Ok(key) = std::env::var(ENV_KEY) {
        config.server.key_path =
            FilePath::new(key).with_context(|| format!("Invalid {}", ENV_KEY))?;
    }

    Ok(())
}

/// Load configuration from a TOML file, with environment variable overrides
pub fn load_config(config_path: impl AsRef<Path>) -> Result<Config> {
    let config_path = config_path.as_ref();
    let config_content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file '{}'", config_path.display()))?;

    let mut config: Config = toml::from_str(&config_content)
        .with_context(|| format!("Failed to parse config file '{}'", config_path.display()))?;

    apply_env_overrides(&mut config)?;

    // Validate the loaded configuration
    config.validate()?;

    Ok(config)
}

/// Load configuration, writing a default file first if none exists
pub fn load_config_with_fallback(config_path: impl AsRef<Path>) -> Result<(Config, ConfigSource)> {
    let config_path = config_path.as_ref();

    if config_path.exists() {
        return Ok((load_config(config_path)?, ConfigSource::File));
    }

    tracing::warn!(
        "Config file '{}' not found, creating default config",
        config_path.display()
    );

    let default_config = create_default_config();
    let config_toml =
        toml::to_string_pretty(&default_config).context("Failed to serialize default config")?;
    std::fs::write(config_path, &config_toml).with_context(|| {
        format!(
            "Failed to write default config to '{}'",
            config_path.display()
        )
    })?;

    Ok((load_config(config_path)?, ConfigSource::DefaultCreated))
}

/// Create a default configuration for examples/testing
#[must_use]
pub fn create_default_config() -> Config {
    Config::default()
}
