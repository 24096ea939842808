//! Per-kind get-or-fetch resolution
//!
//! [`ResourceCache`] owns one [`Store`] per entity kind and the upstream it
//! populates them from. A miss runs the whole pipeline: fetch, decode,
//! convert, store. Anything that fails along the way leaves the store
//! untouched.

use std::sync::Arc;
use tracing::debug;

use super::store::{Store, StoreStats};
use crate::error::GatewayError;
use crate::markup::GemtextConverter;
use crate::model::{Author, Collection, Document, Section};
use crate::normalize;
use crate::upstream::{Endpoint, Upstream};

/// Counters of every store, for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub works: StoreStats,
    pub gemlog: StoreStats,
    pub sections: StoreStats,
    pub authors: StoreStats,
}

impl CacheStats {
    /// Total number of cached entities
    #[must_use]
    pub const fn entries(&self) -> u64 {
        self.works.entries + self.gemlog.entries + self.sections.entries + self.authors.entries
    }
}

/// The four entity stores plus the upstream that fills them
#[derive(Debug)]
pub struct ResourceCache {
    upstream: Arc<dyn Upstream>,
    converter: GemtextConverter,
    works: Store<Document>,
    gemlog: Store<Document>,
    sections: Store<Section>,
    authors: Store<Author>,
}

impl ResourceCache {
    #[must_use]
    pub fn new(upstream: Arc<dyn Upstream>, converter: GemtextConverter) -> Self {
        Self {
            upstream,
            converter,
            works: Store::new("works"),
            gemlog: Store::new("gemlog"),
            sections: Store::new("sections"),
            authors: Store::new("authors"),
        }
    }

    #[must_use]
    pub fn upstream(&self) -> &Arc<dyn Upstream> {
        &self.upstream
    }

    #[must_use]
    pub const fn converter(&self) -> &GemtextConverter {
        &self.converter
    }

    /// Document store backing a collection
    #[must_use]
    pub const fn documents(&self, collection: Collection) -> &Store<Document> {
        match collection {
            Collection::Works => &self.works,
            Collection::Gemlog => &self.gemlog,
        }
    }

    #[must_use]
    pub const fn sections(&self) -> &Store<Section> {
        &self.sections
    }

    #[must_use]
    pub const fn authors(&self) -> &Store<Author> {
        &self.authors
    }

    /// Resolve a single document of `collection`
    ///
    /// The body and every section body are converted before the document is
    /// stored. Descriptions are stored as upstream sent them; teasers are
    /// only derived during listing assembly.
    pub async fn document(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Arc<Document>, GatewayError> {
        self.documents(collection)
            .get_or_populate(id, || async {
                let endpoint = Endpoint::Document {
                    kind: collection.fetch_kind(),
                    id,
                };
                let bytes = self.fetch(&endpoint).await?;
                let raw = normalize::decode_document(&bytes)?;
                let document = raw.convert(&self.converter)?;
                debug!(
                    collection = collection.as_str(),
                    id,
                    sections = document.sections.len(),
                    "Converted document"
                );
                Ok::<_, GatewayError>(document)
            })
            .await
    }

    /// Resolve a single section
    pub async fn section(&self, id: &str) -> Result<Arc<Section>, GatewayError> {
        self.sections
            .get_or_populate(id, || async {
                let bytes = self.fetch(&Endpoint::Section { id }).await?;
                let raw = normalize::decode_section(&bytes)?;
                Ok::<_, GatewayError>(raw.convert(&self.converter)?)
            })
            .await
    }

    /// Resolve a full author profile
    ///
    /// Profile fields are sentinel-repaired during decoding, so a cached
    /// author never carries the literal `"null"`.
    pub async fn author(&self, id: &str) -> Result<Arc<Author>, GatewayError> {
        self.authors
            .get_or_populate(id, || async {
                let bytes = self.fetch(&Endpoint::Profile { id }).await?;
                normalize::decode_author(&bytes)
            })
            .await
    }

    /// Store a converted document unless one with the same id is cached
    ///
    /// Returns whichever document ends up stored.
    pub async fn store_document(&self, collection: Collection, document: Document) -> Arc<Document> {
        let id = document.id.clone();
        self.documents(collection)
            .insert_if_absent(&id, document)
            .await
    }

    /// Run one upstream request
    pub async fn fetch(&self, endpoint: &Endpoint<'_>) -> Result<Vec<u8>, GatewayError> {
        let path = endpoint.path();
        debug!(path = %path, "Fetching from upstream");
        self.upstream.fetch(&path).await
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            works: self.works.stats(),
            gemlog: self.gemlog.stats(),
            sections: self.sections.stats(),
            authors: self.authors.stats(),
        }
    }
}
