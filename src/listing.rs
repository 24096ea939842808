//! Listing assembly
//!
//! A listing page is fetched and decoded in one go, then every document on it
//! is processed on its own: converted, given a teaser when it has no
//! description, and stored in its collection's document store if that store
//! does not hold it yet. A document that fails conversion degrades to an
//! empty body instead of failing the whole page. Only page-level transport
//! and decode errors abort assembly.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::ResourceCache;
use crate::error::GatewayError;
use crate::model::{
    Collection, Document, ItemStatus, Listing, ListingItem, ListingLabels, RawDocument,
};
use crate::normalize;
use crate::teaser::teaser;
use crate::upstream::Endpoint;

/// Which documents a listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingScope<'a> {
    /// A user's prose and poetry
    Works { user_id: &'a str },
    /// A user's blog posts
    Gemlog { user_id: &'a str },
    /// Newest prose and poetry across the site
    Browse,
}

impl ListingScope<'_> {
    /// Document store the listed documents are warmed into
    #[must_use]
    pub const fn collection(&self) -> Collection {
        match self {
            Self::Works { .. } | Self::Browse => Collection::Works,
            Self::Gemlog { .. } => Collection::Gemlog,
        }
    }

    #[must_use]
    pub const fn labels(&self) -> ListingLabels {
        match self {
            Self::Works { .. } => ListingLabels {
                name: "works",
                url_name: "story",
                emoji: "📕",
            },
            Self::Gemlog { .. } => ListingLabels {
                name: "gemlog",
                url_name: "gemlog",
                emoji: "📰",
            },
            Self::Browse => ListingLabels {
                name: "browse",
                url_name: "story",
                emoji: "📚",
            },
        }
    }

    fn endpoint(&self, page: u32) -> Endpoint<'_> {
        match *self {
            Self::Works { user_id } => Endpoint::UserDocuments {
                collection: Collection::Works,
                user_id,
                page,
            },
            Self::Gemlog { user_id } => Endpoint::UserDocuments {
                collection: Collection::Gemlog,
                user_id,
                page,
            },
            Self::Browse => Endpoint::AllNew { page },
        }
    }

    /// Gemini path of another page of this listing
    #[must_use]
    pub fn page_url(&self, page: u32) -> String {
        match self {
            Self::Works { user_id } | Self::Gemlog { user_id } => {
                format!("/user/{}/{}/{}", user_id, self.labels().name, page)
            }
            Self::Browse => format!("/browse/{page}"),
        }
    }
}

/// Builds listings on top of a [`ResourceCache`]
#[derive(Debug, Clone)]
pub struct ListingAssembler {
    cache: Arc<ResourceCache>,
}

impl ListingAssembler {
    #[must_use]
    pub const fn new(cache: Arc<ResourceCache>) -> Self {
        Self { cache }
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<ResourceCache> {
        &self.cache
    }

    /// Fetch and assemble one page of `scope`
    ///
    /// Navigation links are computed from the page number upstream reports,
    /// not the one requested.
    pub async fn assemble(
        &self,
        scope: ListingScope<'_>,
        page: u32,
    ) -> Result<Listing, GatewayError> {
        let bytes = self.cache.fetch(&scope.endpoint(page)).await?;
        let raw = normalize::decode_page(&bytes)?;

        let author_username = raw.docs.first().map(|doc| doc.author.username.clone());
        let items = self.process_all(scope.collection(), raw.docs).await;

        debug!(
            scope = scope.labels().name,
            page = raw.page,
            items = items.len(),
            "Assembled listing"
        );

        Ok(Listing {
            items,
            page: raw.page,
            total_pages: raw.total_pages,
            has_prev_page: raw.has_prev_page,
            has_next_page: raw.has_next_page,
            labels: scope.labels(),
            author_username,
            next_page_url: scope.page_url(raw.page.saturating_add(1)),
            prev_page_url: scope.page_url(raw.page.saturating_sub(1)),
        })
    }

    /// Newest documents across the site, warming the works store
    pub async fn latest(&self) -> Result<Vec<ListingItem>, GatewayError> {
        let bytes = self.cache.fetch(&Endpoint::FirstNew).await?;
        let docs = normalize::decode_document_list(&bytes)?;
        Ok(self.process_all(Collection::Works, docs).await)
    }

    async fn process_all(&self, collection: Collection, docs: Vec<RawDocument>) -> Vec<ListingItem> {
        let mut items = Vec::with_capacity(docs.len());
        for raw in docs {
            items.push(self.process(collection, raw).await);
        }
        items
    }

    async fn process(&self, collection: Collection, raw: RawDocument) -> ListingItem {
        let store = self.cache.documents(collection);

        // A cached body is final; it is served rather than converted again
        if let Some(cached) = store.get(&raw.id).await {
            return ListingItem {
                document: with_teaser(cached),
                status: ItemStatus::Converted,
            };
        }

        match raw.convert(self.cache.converter()) {
            Ok(mut document) => {
                if document.short_desc.is_empty() && !document.body.is_empty() {
                    document.short_desc = teaser(&document.body);
                }
                let stored = self.cache.store_document(collection, document).await;
                ListingItem {
                    document: with_teaser(stored),
                    status: ItemStatus::Converted,
                }
            }
            Err(e) => {
                warn!(
                    collection = collection.as_str(),
                    id = %raw.id,
                    error = %e,
                    "Listing item could not be converted, showing it without a body"
                );
                ListingItem {
                    document: Arc::new(raw.degraded()),
                    status: ItemStatus::Degraded {
                        reason: e.to_string(),
                        html_body: raw.html_body,
                    },
                }
            }
        }
    }
}

/// Display copy with a teaser when the stored document has no description
///
/// Documents cached by a single lookup keep their upstream description; the
/// stored value is never modified.
fn with_teaser(document: Arc<Document>) -> Arc<Document> {
    if document.short_desc.is_empty() && !document.body.is_empty() {
        Arc::new(Document {
            short_desc: teaser(&document.body),
            ..Document::clone(&document)
        })
    } else {
        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_urls() {
        let works = ListingScope::Works { user_id: "u1" };
        assert_eq!(works.page_url(3), "/user/u1/works/3");

        let gemlog = ListingScope::Gemlog { user_id: "u1" };
        assert_eq!(gemlog.page_url(0), "/user/u1/gemlog/0");

        assert_eq!(ListingScope::Browse.page_url(2), "/browse/2");
    }

    #[test]
    fn test_labels() {
        let labels = ListingScope::Works { user_id: "u" }.labels();
        assert_eq!((labels.name, labels.url_name, labels.emoji), ("works", "story", "📕"));

        let labels = ListingScope::Gemlog { user_id: "u" }.labels();
        assert_eq!((labels.name, labels.url_name, labels.emoji), ("gemlog", "gemlog", "📰"));

        let labels = ListingScope::Browse.labels();
        assert_eq!((labels.name, labels.url_name, labels.emoji), ("browse", "story", "📚"));
    }

    #[test]
    fn test_scope_collections() {
        assert_eq!(ListingScope::Browse.collection(), Collection::Works);
        assert_eq!(
            ListingScope::Gemlog { user_id: "u" }.collection(),
            Collection::Gemlog
        );
    }

    #[test]
    fn test_with_teaser_leaves_described_documents_alone() {
        let described = Arc::new(Document {
            short_desc: "desc".into(),
            body: "Body\nmore".into(),
            ..Default::default()
        });
        assert!(Arc::ptr_eq(&with_teaser(Arc::clone(&described)), &described));

        let bare = Arc::new(Document {
            body: "Body!\nmore".into(),
            ..Default::default()
        });
        assert_eq!(with_teaser(bare).short_desc, "Body…");
    }
}
