//! Configuration module
//!
//! This module handles all configuration types and loading
//! for the Gemini gateway.

mod defaults;
mod loading;
mod types;
mod validation;

pub use loading::{
    ConfigSource, ENV_CERT, ENV_KEY, ENV_ORIGIN, apply_env_overrides, create_default_config,
    load_config, load_config_with_fallback,
};
pub use types::{Config, ServerConfig, UpstreamConfig};

// Re-export default functions for use in tests and other modules
pub use defaults::{
    cert_path, host, key_path, origin, port, request_timeout, user_agent,
};
