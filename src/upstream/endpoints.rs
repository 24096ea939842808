//! Upstream endpoint paths
//!
//! All parameters are query-escaped here, so callers can pass untrusted
//! route parameters and search queries straight through.

use std::borrow::Cow;

use crate::model::{Collection, ContentKind};

/// One upstream API endpoint with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// Single published document of a kind
    Document { kind: ContentKind, id: &'a str },
    /// Single published section
    Section { id: &'a str },
    /// Full author profile
    Profile { id: &'a str },
    /// One page of a user's published documents
    UserDocuments {
        collection: Collection,
        user_id: &'a str,
        page: u32,
    },
    /// Newest documents across the site (unpaginated)
    FirstNew,
    /// One page of newest works across the site
    AllNew { page: u32 },
    /// Initial search results
    Search { query: &'a str },
}

fn escape(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

fn kinds_query(kinds: &[ContentKind]) -> String {
    kinds
        .iter()
        .map(|k| format!("kind={}", k.as_str()))
        .collect::<Vec<_>>()
        .join("&")
}

impl Endpoint<'_> {
    /// Path and query relative to the upstream origin
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Document { kind, id } => format!(
                "/content/fetch-one-published?kind={}&contentId={}",
                kind.as_str(),
                escape(id)
            ),
            Self::Section { id } => format!(
                "/sections/fetch-one-by-id?published=true&sectionId={}",
                escape(id)
            ),
            Self::Profile { id } => format!("/user/get-profile?pseudId={}", escape(id)),
            Self::UserDocuments {
                collection,
                user_id,
                page,
            } => format!(
                "/content/fetch-all-published?filter=Default&pageNum={}&userId={}&{}",
                page,
                escape(user_id),
                kinds_query(collection.listing_kinds())
            ),
            Self::FirstNew => "/browse/fetch-first-new?filter=Default".to_string(),
            Self::AllNew { page } => format!(
                "/browse/fetch-all-new?filter=Default&pageNum={}&{}",
                page,
                kinds_query(&[ContentKind::Poetry, ContentKind::Prose])
            ),
            Self::Search { query } => {
                format!("/search/get-initial-results?query={}", escape(query))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path() {
        let path = Endpoint::Document {
            kind: ContentKind::Blog,
            id: "abc123",
        }
        .path();
        assert_eq!(
            path,
            "/content/fetch-one-published?kind=BlogContent&contentId=abc123"
        );
    }

    #[test]
    fn test_parameters_are_escaped() {
        let path = Endpoint::Profile { id: "a&b=c" }.path();
        assert_eq!(path, "/user/get-profile?pseudId=a%26b%3Dc");

        let path = Endpoint::Search {
            query: "dragons & knights",
        }
        .path();
        assert_eq!(
            path,
            "/search/get-initial-results?query=dragons%20%26%20knights"
        );
    }

    #[test]
    fn test_user_documents_path() {
        let path = Endpoint::UserDocuments {
            collection: Collection::Works,
            user_id: "u1",
            page: 2,
        }
        .path();
        assert_eq!(
            path,
            "/content/fetch-all-published?filter=Default&pageNum=2&userId=u1&kind=ProseContent&kind=PoetryContent"
        );

        let path = Endpoint::UserDocuments {
            collection: Collection::Gemlog,
            user_id: "u1",
            page: 1,
        }
        .path();
        assert!(path.ends_with("&userId=u1&kind=BlogContent"));
    }

    #[test]
    fn test_browse_paths() {
        assert_eq!(
            Endpoint::AllNew { page: 3 }.path(),
            "/browse/fetch-all-new?filter=Default&pageNum=3&kind=PoetryContent&kind=ProseContent"
        );
        assert_eq!(
            Endpoint::FirstNew.path(),
            "/browse/fetch-first-new?filter=Default"
        );
        assert_eq!(
            Endpoint::Section { id: "s1" }.path(),
            "/sections/fetch-one-by-id?published=true&sectionId=s1"
        );
    }
}
