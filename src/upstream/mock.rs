//! Scripted in-memory upstream for tests
//!
//! Responses are keyed by exact path. Every fetch is recorded, so tests can
//! assert how many network round trips a resolution cost.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Upstream;
use crate::error::{GatewayError, TransportError};

/// Mock upstream returning scripted bodies
#[derive(Debug, Default)]
pub struct MockUpstream {
    responses: Mutex<HashMap<String, Vec<u8>>>,
    calls: Mutex<Vec<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockUpstream {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`set_response`](Self::set_response)
    #[must_use]
    pub fn with_response(self, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.set_response(path, body);
        self
    }

    /// Script (or replace) the body returned for `path`
    pub fn set_response(&self, path: impl Into<String>, body: impl Into<Vec<u8>>) {
        lock(&self.responses).insert(path.into(), body.into());
    }

    /// Total number of fetches issued
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Number of fetches issued for one path
    #[must_use]
    pub fn fetches_of(&self, path: &str) -> usize {
        lock(&self.calls).iter().filter(|p| *p == path).count()
    }

    /// Every fetched path, in order
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl Upstream for MockUpstream {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, GatewayError> {
        lock(&self.calls).push(path.to_string());

        lock(&self.responses).get(path).cloned().ok_or_else(|| {
            GatewayError::transport(
                path,
                TransportError::Unavailable("no scripted response".to_string()),
            )
        })
    }
}
