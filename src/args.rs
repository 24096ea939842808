//! Command-line argument parsing for the gateway binary

use crate::config::Config;
use crate::types::{FilePath, Port, ThreadCount};
use clap::Parser;
use std::path::PathBuf;

/// Gemini gateway for the Offprint content API
#[derive(Parser, Debug, Clone)]
#[command(name = "gemini-gateway", version, about)]
pub struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "GEMINI_GATEWAY_PORT")]
    pub port: Option<Port>,

    /// Host to bind to (overrides config file)
    #[arg(long, env = "GEMINI_GATEWAY_HOST")]
    pub host: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", env = "GEMINI_GATEWAY_CONFIG")]
    pub config: FilePath,

    /// Number of worker threads (default: 1, use 0 for CPU cores)
    #[arg(short, long, env = "GEMINI_GATEWAY_THREADS")]
    pub threads: Option<ThreadCount>,

    /// Also write logs to this file
    #[arg(long, env = "GEMINI_GATEWAY_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Get effective port (from args or config)
    #[must_use]
    pub fn effective_port(&self, config: &Config) -> Port {
        self.port.unwrap_or(config.server.port)
    }

    /// Get effective host (from args or config)
    #[must_use]
    pub fn effective_host<'a>(&'a self, config: &'a Config) -> &'a str {
        self.host.as_deref().unwrap_or(&config.server.host)
    }

    /// Get formatted listen address
    ///
    /// IPv6 literals are bracketed so the port stays separable.
    ///
    /// # Returns
    /// Formatted listen address (e.g., "0.0.0.0:1965" or "[::1]:1965")
    #[must_use]
    pub fn listen_addr(&self, config: &Config) -> String {
        let host = self.effective_host(config);
        let port = self.effective_port(config);
        if host.contains(':') && !host.starts_with('[') {
            format!("[{}]:{}", host, port)
        } else {
            format!("{}:{}", host, port)
        }
    }

    /// Worker threads, defaulting to a single-threaded runtime
    #[must_use]
    pub fn thread_count(&self) -> ThreadCount {
        self.threads.unwrap_or_default()
    }
}
