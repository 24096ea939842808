//! Benchmarks for entity stores and cached resolution
//!
//! Measures the hot path of single-entity requests:
//! - Store get (hit vs miss)
//! - Store insert_if_absent on an existing key
//! - ResourceCache document lookup once warmed
//!
//! Run with: cargo bench --bench cache_lookup

use divan::{Bencher, black_box};
use gemini_gateway::{
    Collection, Document, GemtextConverter, MockUpstream, ResourceCache, Store, Upstream,
};
use std::sync::Arc;

fn main() {
    divan::main();
}

fn document(id: &str) -> Document {
    Document {
        id: id.to_string(),
        title: "Benchmark".to_string(),
        body: "Some converted gemtext\n\n=> /elsewhere [1] link".to_string(),
        ..Default::default()
    }
}

// =============================================================================
// Store operations
// =============================================================================

mod store {
    use super::*;

    #[divan::bench(sample_count = 100, sample_size = 100)]
    fn get_miss(bencher: Bencher) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let store: Store<Document> = Store::new("bench");
        bencher.bench(|| rt.block_on(async { black_box(store.get("missing").await) }));
    }

    #[divan::bench(sample_count = 100, sample_size = 100)]
    fn get_hit(bencher: Bencher) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let store: Store<Document> = Store::new("bench");
        rt.block_on(store.insert_if_absent("d1", document("d1")));

        bencher.bench(|| rt.block_on(async { black_box(store.get("d1").await) }));
    }

    #[divan::bench(sample_count = 100, sample_size = 100)]
    fn insert_if_absent_existing(bencher: Bencher) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let store: Store<Document> = Store::new("bench");
        rt.block_on(store.insert_if_absent("d1", document("d1")));

        bencher
            .with_inputs(|| document("d1"))
            .bench_values(|doc| rt.block_on(async { black_box(store.insert_if_absent("d1", doc).await) }));
    }

    #[divan::bench(args = [10, 1000, 10_000], sample_count = 50)]
    fn get_hit_populated(bencher: Bencher, entries: usize) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let store: Store<Document> = Store::new("bench");
        rt.block_on(async {
            for i in 0..entries {
                let id = format!("d{i}");
                store.insert_if_absent(&id, document(&id)).await;
            }
        });

        bencher.bench(|| rt.block_on(async { black_box(store.get("d0").await) }));
    }
}

// =============================================================================
// ResourceCache resolution
// =============================================================================

mod resource_cache {
    use super::*;

    #[divan::bench(sample_count = 100, sample_size = 100)]
    fn warmed_document(bencher: Bencher) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let upstream: Arc<dyn Upstream> = Arc::new(MockUpstream::new().with_response(
            "/content/fetch-one-published?kind=ProseContent&contentId=d1",
            r#"{"content":{"_id":"d1","title":"T","body":"<p>Hello <b>world</b></p>"}}"#,
        ));
        let cache = ResourceCache::new(upstream, GemtextConverter::default());
        rt.block_on(cache.document(Collection::Works, "d1")).unwrap();

        bencher.bench(|| {
            rt.block_on(async { black_box(cache.document(Collection::Works, "d1").await) })
        });
    }
}
