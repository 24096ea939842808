//! Entity normalization: upstream JSON → internal shapes
//!
//! Upstream wraps single documents in a `{"content": ...}` envelope while
//! sections, profiles, pages and search results come unwrapped. It also
//! serializes some missing profile fields as the string `"null"`; that defect
//! is repaired in exactly one place, [`repair_author`].

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::model::{Author, RawDocument, RawSection, SearchResults, nullable};

/// Placeholder upstream sends instead of an absent string
const NULL_SENTINEL: &str = "null";

#[derive(Deserialize)]
struct ContentEnvelope {
    content: RawDocument,
}

/// One page of a paginated document listing, as sent by upstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawPage {
    #[serde(default, deserialize_with = "nullable")]
    pub docs: Vec<RawDocument>,
    #[serde(default, deserialize_with = "nullable")]
    pub page: u32,
    #[serde(rename = "totalPages", default, deserialize_with = "nullable")]
    pub total_pages: u32,
    #[serde(rename = "hasPrevPage", default, deserialize_with = "nullable")]
    pub has_prev_page: bool,
    #[serde(rename = "hasNextPage", default, deserialize_with = "nullable")]
    pub has_next_page: bool,
}

fn parse<T: DeserializeOwned>(entity: &'static str, bytes: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(bytes).map_err(|e| GatewayError::decode(entity, e))
}

/// Replace the `"null"` sentinel with an empty string
///
/// Returns true if the value was repaired.
pub fn repair_sentinel(value: &mut String) -> bool {
    if value == NULL_SENTINEL {
        value.clear();
        true
    } else {
        false
    }
}

/// Apply sentinel repair to every profile field of an author
pub fn repair_author(author: &mut Author) {
    let profile = &mut author.profile;
    for field in [&mut profile.bio, &mut profile.tagline, &mut profile.avatar] {
        if repair_sentinel(field) {
            tracing::trace!(author = %author.id, "Repaired \"null\" sentinel in author profile");
        }
    }
}

/// Decode a single document from its content envelope
pub fn decode_document(bytes: &[u8]) -> Result<RawDocument, GatewayError> {
    let envelope: ContentEnvelope = parse("document", bytes)?;
    Ok(envelope.content)
}

/// Decode an unwrapped section
pub fn decode_section(bytes: &[u8]) -> Result<RawSection, GatewayError> {
    parse("section", bytes)
}

/// Decode a full author profile, repairing sentinel strings
pub fn decode_author(bytes: &[u8]) -> Result<Author, GatewayError> {
    let mut author: Author = parse("author", bytes)?;
    repair_author(&mut author);
    Ok(author)
}

/// Decode one page of a paginated listing
pub fn decode_page(bytes: &[u8]) -> Result<RawPage, GatewayError> {
    parse("listing page", bytes)
}

/// Decode a bare array of documents (newest-first feed)
pub fn decode_document_list(bytes: &[u8]) -> Result<Vec<RawDocument>, GatewayError> {
    parse("document list", bytes)
}

/// Decode search results, repairing sentinel strings on matched authors
pub fn decode_search(bytes: &[u8]) -> Result<SearchResults, GatewayError> {
    let mut results: SearchResults = parse("search results", bytes)?;
    results.users.iter_mut().for_each(repair_author);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_sentinel() {
        let mut value = "null".to_string();
        assert!(repair_sentinel(&mut value));
        assert_eq!(value, "");

        for untouched in ["", "Null", "nullable", " null", "hello"] {
            let mut value = untouched.to_string();
            assert!(!repair_sentinel(&mut value));
            assert_eq!(value, untouched);
        }
    }

    #[test]
    fn test_decode_author_repairs_every_profile_field() {
        let json = br#"{"_id":"a1","screenName":"ann","profile":{"bio":"null","tagline":"null","avatar":"null"}}"#;
        let author = decode_author(json).unwrap();
        assert_eq!(author.profile.bio, "");
        assert_eq!(author.profile.tagline, "");
        assert_eq!(author.profile.avatar, "");
        assert_eq!(author.username, "ann");
    }

    #[test]
    fn test_decode_author_keeps_real_values() {
        let json = br#"{"_id":"a1","screenName":"null","profile":{"bio":"Writes things","tagline":"null","avatar":"https://img/a.png"}}"#;
        let author = decode_author(json).unwrap();
        assert_eq!(author.profile.bio, "Writes things");
        assert_eq!(author.profile.tagline, "");
        assert_eq!(author.profile.avatar, "https://img/a.png");
        // Only profile fields are repaired
        assert_eq!(author.username, "null");
    }

    #[test]
    fn test_decode_document_requires_envelope() {
        let wrapped = br#"{"content":{"_id":"d1","title":"T","body":"<p>x</p>"}}"#;
        let doc = decode_document(wrapped).unwrap();
        assert_eq!(doc.id, "d1");
        assert_eq!(doc.html_body, "<p>x</p>");

        let bare = br#"{"_id":"d1","title":"T"}"#;
        let err = decode_document(bare).unwrap_err();
        assert!(matches!(err, GatewayError::Decode { entity: "document", .. }));
    }

    #[test]
    fn test_decode_section() {
        let json = br#"{"_id":"s1","title":"Chapter 1","stats":{"words":1200},"body":"<p>Once</p>"}"#;
        let section = decode_section(json).unwrap();
        assert_eq!(section.id, "s1");
        assert_eq!(section.stats.words, 1200);
    }

    #[test]
    fn test_decode_page_metadata() {
        let json = br#"{"docs":[{"_id":"d1"},{"_id":"d2"}],"page":2,"totalPages":5,"hasPrevPage":true,"hasNextPage":true}"#;
        let page = decode_page(json).unwrap();
        assert_eq!(page.docs.len(), 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 5);
        assert!(page.has_prev_page && page.has_next_page);
    }

    #[test]
    fn test_decode_search_repairs_authors() {
        let json = br#"{"users":[{"_id":"a1","screenName":"ann","profile":{"bio":"null"}}],"blogs":[{"_id":"b1","title":"B"}],"works":[]}"#;
        let results = decode_search(json).unwrap();
        assert_eq!(results.users[0].profile.bio, "");
        assert_eq!(results.blogs[0].title, "B");
        assert!(results.works.is_empty());
        assert_eq!(results.query, "");
    }

    #[test]
    fn test_null_profile_decodes_as_empty() {
        let json = br#"{"_id":"a1","screenName":"ann","profile":null}"#;
        let author = decode_author(json).unwrap();
        assert_eq!(author.profile, crate::model::AuthorProfile::default());
        assert_eq!(author.username, "ann");
    }

    #[test]
    fn test_null_stats_and_nested_fields() {
        let section = decode_section(br#"{"_id":"s1","title":"One","stats":null,"body":"<p>x</p>"}"#).unwrap();
        assert_eq!(section.stats.words, 0);

        let section = decode_section(br#"{"_id":"s2","stats":{"words":null}}"#).unwrap();
        assert_eq!(section.stats.words, 0);

        let doc = decode_document(
            br#"{"content":{"_id":"d1","author":null,"sections":[{"_id":"s1","stats":null}]}}"#,
        )
        .unwrap();
        assert_eq!(doc.author, Author::default());
        assert_eq!(doc.sections[0].stats.words, 0);
    }

    #[test]
    fn test_null_page_fields() {
        let json = br#"{"docs":null,"page":null,"totalPages":null,"hasPrevPage":null,"hasNextPage":false}"#;
        let page = decode_page(json).unwrap();
        assert!(page.docs.is_empty());
        assert_eq!(page.page, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_prev_page);

        let results = decode_search(br#"{"users":null,"blogs":null,"works":null}"#).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        assert!(matches!(
            decode_page(b"<html>502 Bad Gateway</html>"),
            Err(GatewayError::Decode { .. })
        ));
        assert!(decode_document_list(b"{}").is_err());
    }
}
