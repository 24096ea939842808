//! Tokio runtime configuration and common utilities for the binary
//!
//! This module provides:
//! - Testable runtime configuration and builder logic
//! - Startup helpers (config loading, listener binding)
//! - Shutdown signal handling

use crate::args::Args;
use crate::cache::ResourceCache;
use crate::config::{Config, ConfigSource, load_config_with_fallback};
use crate::types::ThreadCount;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Number of worker threads
    worker_threads: usize,
}

impl RuntimeConfig {
    /// Runtime with a fixed number of worker threads
    ///
    /// Single-threaded runtime is used if threads == 1.
    #[must_use]
    pub const fn new(threads: ThreadCount) -> Self {
        Self {
            worker_threads: threads.get(),
        }
    }

    /// Create runtime config from the command line
    ///
    /// Without `--threads` the runtime is single-threaded.
    #[must_use]
    pub fn from_args(args: &Args) -> Self {
        Self::new(args.thread_count())
    }

    /// Get number of worker threads
    #[must_use]
    pub const fn worker_threads(&self) -> usize {
        self.worker_threads
    }

    /// Check if single-threaded
    #[must_use]
    pub const fn is_single_threaded(&self) -> bool {
        self.worker_threads == 1
    }

    /// Build the tokio runtime
    ///
    /// Creates either a current-thread or multi-threaded runtime based on
    /// the configured worker thread count.
    ///
    /// # Errors
    /// Returns error if runtime creation fails
    pub fn build_runtime(self) -> Result<tokio::runtime::Runtime> {
        let rt = if self.is_single_threaded() {
            info!("Starting Gemini gateway with single-threaded runtime");
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?
        } else {
            let num_cpus = std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1);
            info!(
                "Starting Gemini gateway with {} worker threads (detected {} CPUs)",
                self.worker_threads, num_cpus
            );
            tokio::runtime::Builder::new_multi_thread()
                .worker_threads(self.worker_threads)
                .enable_all()
                .build()?
        };

        Ok(rt)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new(ThreadCount::default())
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM on Unix)
///
/// If a handler cannot be installed the error is logged and that signal
/// source never fires.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Load configuration and log where it came from
///
/// # Errors
/// Returns error if configuration loading fails
pub fn load_and_log_config(config_path: impl AsRef<Path>) -> Result<(Config, ConfigSource)> {
    let (config, source) = load_config_with_fallback(config_path)?;

    info!("Loaded configuration from {}", source.description());
    info!("Upstream origin: {}", config.upstream.origin);

    Ok((config, source))
}

/// Bind TCP listener and log startup information
///
/// # Errors
/// Returns error if binding fails
pub async fn bind_listener(listen_addr: &str) -> Result<tokio::net::TcpListener> {
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!("Gemini gateway listening on {}", listen_addr);
    Ok(listener)
}

/// Spawn background task to periodically log cache statistics
///
/// Only spawns if debug logging is enabled. Logs every 60 seconds.
pub fn spawn_cache_stats_logger(cache: &Arc<ResourceCache>) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let cache = Arc::clone(cache);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(60));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            let stats = cache.stats();
            debug!(
                "Cache stats: works={} ({:.1}% hit), gemlog={} ({:.1}% hit), sections={} ({:.1}% hit), authors={} ({:.1}% hit)",
                stats.works.entries,
                stats.works.hit_rate(),
                stats.gemlog.entries,
                stats.gemlog.hit_rate(),
                stats.sections.entries,
                stats.sections.hit_rate(),
                stats.authors.entries,
                stats.authors.hit_rate(),
            );
        }
    });
}
