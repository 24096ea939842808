//! Gemini gateway for the Offprint content API
//!
//! Serves Offprint works, gemlogs, author profiles, listings and search
//! results over the Gemini protocol. Every resource is fetched from the
//! JSON/HTTP content API, normalized, converted from HTML to gemtext and, for
//! single entities, cached for the lifetime of the process.
//!
//! The resolution pipeline is usable without the server: build a
//! [`ResourceCache`] around any [`Upstream`] and resolve through it, a
//! [`ListingAssembler`], or [`search`].

pub mod args;
pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod listing;
pub mod logging;
pub mod markup;
pub mod model;
pub mod normalize;
pub mod protocol;
pub mod runtime;
pub mod search;
pub mod server;
pub mod teaser;
pub mod tls;
pub mod types;
pub mod upstream;
pub mod views;

pub use cache::{CacheStats, ResourceCache, Store, StoreStats};
pub use config::{Config, create_default_config, load_config, load_config_with_fallback};
pub use error::{GatewayError, TransportError};
pub use gateway::{Gateway, Route};
pub use listing::{ListingAssembler, ListingScope};
pub use markup::{ConversionError, ConverterOptions, GemtextConverter};
pub use model::{
    Author, Collection, Document, ItemStatus, Listing, ListingItem, SearchResults, Section,
};
pub use search::search;
pub use server::GeminiServer;
pub use teaser::teaser;
pub use upstream::{HttpUpstream, MockUpstream, Upstream};
