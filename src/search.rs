//! Search passthrough
//!
//! Search results are never cached and carry no bodies, so nothing is
//! converted. Matched authors still go through sentinel repair.

use tracing::debug;

use crate::error::GatewayError;
use crate::model::SearchResults;
use crate::normalize;
use crate::upstream::{Endpoint, Upstream};

/// Run one search against upstream
pub async fn search(upstream: &dyn Upstream, query: &str) -> Result<SearchResults, GatewayError> {
    let path = Endpoint::Search { query }.path();
    debug!(path = %path, "Searching upstream");

    let bytes = upstream.fetch(&path).await?;
    let mut results = normalize::decode_search(&bytes)?;
    results.query = query.to_string();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::MockUpstream;

    #[tokio::test]
    async fn test_search_escapes_query_and_keeps_original() {
        let mock = MockUpstream::new().with_response(
            "/search/get-initial-results?query=dark%20%26%20stormy",
            r#"{"users":[],"blogs":[],"works":[{"_id":"w1","title":"Night"}]}"#,
        );

        let results = search(&mock, "dark & stormy").await.unwrap();
        assert_eq!(results.query, "dark & stormy");
        assert_eq!(results.works[0].title, "Night");
        assert!(!results.is_empty());
    }

    #[tokio::test]
    async fn test_search_is_not_cached() {
        let path = "/search/get-initial-results?query=x";
        let mock = MockUpstream::new().with_response(path, r#"{"users":[],"blogs":[],"works":[]}"#);

        search(&mock, "x").await.unwrap();
        search(&mock, "x").await.unwrap();
        assert_eq!(mock.fetches_of(path), 2);
    }

    #[tokio::test]
    async fn test_search_transport_error() {
        let mock = MockUpstream::new();
        let err = search(&mock, "x").await.unwrap_err();
        assert!(err.is_transport());
    }
}
