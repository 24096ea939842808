//! Shared fixtures for integration tests
#![allow(dead_code)]

use gemini_gateway::{GemtextConverter, MockUpstream, ResourceCache, Upstream};
use std::sync::Arc;

/// Cache wired to a shared mock so tests can inspect fetches
pub fn cache_with(mock: &Arc<MockUpstream>) -> Arc<ResourceCache> {
    let upstream: Arc<dyn Upstream> = Arc::clone(mock) as Arc<dyn Upstream>;
    Arc::new(ResourceCache::new(upstream, GemtextConverter::default()))
}

/// JSON for one upstream document
pub fn doc_json(id: &str, title: &str, desc: &str, body: &str) -> String {
    serde_json::json!({
        "_id": id,
        "title": title,
        "desc": desc,
        "body": body,
        "author": { "_id": "u1", "screenName": "ann" },
        "sections": [],
    })
    .to_string()
}

/// JSON for one listing page
pub fn page_json(docs: &[String], page: u32, total: u32) -> String {
    format!(
        r#"{{"docs":[{}],"page":{},"totalPages":{},"hasPrevPage":{},"hasNextPage":{}}}"#,
        docs.join(","),
        page,
        total,
        page > 1,
        page < total
    )
}

pub const WORKS_PAGE_1: &str =
    "/content/fetch-all-published?filter=Default&pageNum=1&userId=u1&kind=ProseContent&kind=PoetryContent";

pub const GEMLOG_PAGE_1: &str =
    "/content/fetch-all-published?filter=Default&pageNum=1&userId=u1&kind=BlogContent";

pub const BROWSE_PAGE_2: &str =
    "/browse/fetch-all-new?filter=Default&pageNum=2&kind=PoetryContent&kind=ProseContent";

pub const FIRST_NEW: &str = "/browse/fetch-first-new?filter=Default";

pub fn document_path(kind: &str, id: &str) -> String {
    format!("/content/fetch-one-published?kind={}&contentId={}", kind, id)
}
