//! Validated configuration and identifier types
//!
//! Invariants live in the types so the rest of the gateway never re-checks
//! them (ports are non-zero, thread counts are non-zero, paths are non-empty).

pub mod config;
pub mod validated;

pub use config::{Port, ThreadCount, duration_serde};
pub use validated::{ContentId, FilePath, ValidationError};
