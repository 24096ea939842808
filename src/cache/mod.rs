//! Resource caching
//!
//! This module provides:
//! - [`Store`]: one unbounded concurrent map from upstream id to a fully
//!   converted entity, with hit/miss accounting
//! - [`ResourceCache`]: the four stores (works, gemlog, sections, authors)
//!   plus the get-or-fetch resolution that populates them

mod resource;
mod store;

pub use resource::{CacheStats, ResourceCache};
pub use store::{Store, StoreStats};
