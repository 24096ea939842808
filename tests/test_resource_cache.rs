//! Integration tests for single-entity resolution through the resource cache

mod common;

use common::{cache_with, document_path};
use gemini_gateway::{Collection, GatewayError, MockUpstream};
use std::sync::Arc;

/// Two consecutive lookups of an unseen id cost one fetch and return the same entity
#[tokio::test]
async fn test_idempotent_caching() {
    let path = document_path("ProseContent", "d1");
    let mock = Arc::new(MockUpstream::new().with_response(
        path.clone(),
        r#"{"content":{"_id":"d1","title":"T","body":"<p>Hi</p>"}}"#,
    ));
    let cache = cache_with(&mock);

    let first = cache.document(Collection::Works, "d1").await.unwrap();
    let second = cache.document(Collection::Works, "d1").await.unwrap();

    assert_eq!(mock.fetches_of(&path), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

/// Uncached document: converted body with one fetch; second request does not fetch
#[tokio::test]
async fn test_end_to_end_document() {
    let path = document_path("BlogContent", "p1");
    let mock = Arc::new(MockUpstream::new().with_response(
        path.clone(),
        r#"{"content":{"_id":"p1","title":"Post","desc":null,"body":"<h2>Hello</h2><p>A <a href=\"https://x.org\">link</a>.</p>","author":{"_id":"u1","screenName":"ann"}}}"#,
    ));
    let cache = cache_with(&mock);

    let doc = cache.document(Collection::Gemlog, "p1").await.unwrap();
    assert_eq!(doc.body, "## Hello\n\nA link[1].\n\n=> https://x.org [1] link");
    assert_eq!(doc.author.username, "ann");
    assert_eq!(doc.short_desc, "");
    assert_eq!(mock.fetch_count(), 1);

    let again = cache.document(Collection::Gemlog, "p1").await.unwrap();
    assert_eq!(again.body, doc.body);
    assert_eq!(mock.fetch_count(), 1);
}

/// Section bodies inside a document are converted independently
#[tokio::test]
async fn test_document_sections_converted() {
    let mock = Arc::new(MockUpstream::new().with_response(
        document_path("ProseContent", "d1"),
        r#"{"content":{"_id":"d1","title":"Novel","body":"","sections":[
            {"_id":"s1","title":"One","stats":{"words":10},"body":"<p>First</p>"},
            {"_id":"s2","title":"Two","stats":{"words":20},"body":"<ul><li>a</li></ul>"}
        ]}}"#,
    ));
    let cache = cache_with(&mock);

    let doc = cache.document(Collection::Works, "d1").await.unwrap();
    assert_eq!(doc.body, "");
    assert_eq!(doc.sections[0].body, "First");
    assert_eq!(doc.sections[1].body, "* a");
    assert_eq!(doc.word_count(), 30);
}

/// Transport errors are surfaced and nothing is cached
#[tokio::test]
async fn test_transport_error_not_cached() {
    let mock = Arc::new(MockUpstream::new());
    let cache = cache_with(&mock);

    let err = cache.section("missing").await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport { .. }));
    assert!(cache.sections().get("missing").await.is_none());

    mock.set_response(
        "/sections/fetch-one-by-id?published=true&sectionId=missing",
        r#"{"_id":"missing","title":"Found","body":"<p>now</p>"}"#,
    );
    let section = cache.section("missing").await.unwrap();
    assert_eq!(section.body, "now");
    assert_eq!(mock.fetch_count(), 2);
}

/// Author profile sentinels are repaired before caching
#[tokio::test]
async fn test_author_sentinel_repair() {
    let mock = Arc::new(MockUpstream::new().with_response(
        "/user/get-profile?pseudId=u1",
        r#"{"_id":"u1","screenName":"ann","profile":{"bio":"null","tagline":"Poet","avatar":"null"}}"#,
    ));
    let cache = cache_with(&mock);

    let author = cache.author("u1").await.unwrap();
    assert_eq!(author.profile.bio, "");
    assert_eq!(author.profile.tagline, "Poet");
    assert_eq!(author.profile.avatar, "");

    let cached = cache.authors().get("u1").await.unwrap();
    assert_eq!(cached.profile.bio, "");
}

/// Concurrent lookups of the same id all resolve to the same content
#[tokio::test]
async fn test_concurrent_lookups_agree() {
    let mock = Arc::new(MockUpstream::new().with_response(
        document_path("ProseContent", "d1"),
        r#"{"content":{"_id":"d1","body":"<p>same</p>"}}"#,
    ));
    let cache = cache_with(&mock);

    let lookups = (0..8).map(|_| {
        let cache = Arc::clone(&cache);
        tokio::spawn(async move { cache.document(Collection::Works, "d1").await })
    });

    for handle in lookups.collect::<Vec<_>>() {
        let doc = handle.await.unwrap().unwrap();
        assert_eq!(doc.body, "same");
    }
    assert!(mock.fetch_count() >= 1);
}
