use std::sync::Arc;

use super::{EmbeddingResolver, ResolveError};
use crate::cache::{MockStore, VectorCache};
use crate::hashing::text_hash;
use crate::vectorizer::MockVectorizer;

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

async fn resolver_with(
    store: MockStore,
    vectorizer: MockVectorizer,
) -> EmbeddingResolver<MockStore, MockVectorizer> {
    let cache = Arc::new(VectorCache::open("cache_vectors.json", store).await);
    EmbeddingResolver::new(cache, vectorizer)
}

#[tokio::test]
async fn test_resolve_order_and_length() {
    let vectorizer = MockVectorizer::new();
    vectorizer.set_vector("a", vec![1.0, 0.0]);
    vectorizer.set_vector("b", vec![0.0, 1.0]);
    let resolver = resolver_with(MockStore::new(), vectorizer).await;

    let vectors = resolver.resolve(&texts(&["a", "b", "a"])).await.unwrap();

    assert_eq!(vectors.len(), 3);
    assert_eq!(vectors[0], vec![1.0, 0.0]);
    assert_eq!(vectors[1], vec![0.0, 1.0]);
    assert_eq!(vectors[2], vec![1.0, 0.0]);
}

#[tokio::test]
async fn test_cache_idempotence_single_fetch() {
    let vectorizer = MockVectorizer::new();
    let resolver = resolver_with(MockStore::new(), vectorizer.clone()).await;

    resolver.resolve(&texts(&["I feel anxious"])).await.unwrap();
    resolver.resolve(&texts(&["I feel anxious"])).await.unwrap();

    // Second resolve is fully served from cache.
    assert_eq!(vectorizer.call_count(), 1);
}

#[tokio::test]
async fn test_partial_hit_fetches_only_uncached() {
    let vectorizer = MockVectorizer::new();
    let resolver = resolver_with(MockStore::new(), vectorizer.clone()).await;

    resolver.resolve(&texts(&["a", "b"])).await.unwrap();
    resolver.resolve(&texts(&["b", "c", "a"])).await.unwrap();

    assert_eq!(vectorizer.call_count(), 2);
    assert_eq!(vectorizer.batches()[1], texts(&["c"]));
}

#[tokio::test]
async fn test_fully_cached_batch_issues_no_fetch() {
    let vectorizer = MockVectorizer::new();
    let resolver = resolver_with(MockStore::new(), vectorizer.clone()).await;

    resolver.resolve(&texts(&["a", "b"])).await.unwrap();
    let first = resolver.cache().entries();

    resolver.resolve(&texts(&["b", "a"])).await.unwrap();

    assert_eq!(vectorizer.call_count(), 1);
    assert_eq!(resolver.cache().entries(), first);
}

#[tokio::test]
async fn test_upstream_failure_no_partial_insert() {
    let vectorizer = MockVectorizer::new();
    let store = MockStore::new();
    let resolver = resolver_with(store.clone(), vectorizer.clone()).await;

    vectorizer.fail(true);
    let err = resolver.resolve(&texts(&["a", "b"])).await.unwrap_err();

    assert!(matches!(err, ResolveError::UpstreamUnavailable { .. }));
    assert!(resolver.cache().is_empty());
    assert_eq!(store.save_calls(), 0);
}

#[tokio::test]
async fn test_flush_once_per_resolve() {
    let store = MockStore::new();
    let resolver = resolver_with(store.clone(), MockVectorizer::new()).await;

    resolver.resolve(&texts(&["a", "b", "c"])).await.unwrap();
    assert_eq!(store.save_calls(), 1);

    // All cached: no fetch, no flush.
    resolver.resolve(&texts(&["a", "c"])).await.unwrap();
    assert_eq!(store.save_calls(), 1);
}

#[tokio::test]
async fn test_flush_failure_does_not_fail_resolve() {
    let store = MockStore::new();
    store.fail_saves(true);
    let resolver = resolver_with(store.clone(), MockVectorizer::new()).await;

    let vectors = resolver.resolve(&texts(&["a"])).await.unwrap();

    assert_eq!(vectors.len(), 1);
    assert_eq!(resolver.cache().lookup(&text_hash("a")), Some(vectors[0].clone()));
}

#[tokio::test]
async fn test_vectors_keyed_by_content_hash() {
    let vectorizer = MockVectorizer::new();
    vectorizer.set_vector("a", vec![0.5]);
    let resolver = resolver_with(MockStore::new(), vectorizer).await;

    resolver.resolve(&texts(&["a"])).await.unwrap();

    assert_eq!(resolver.cache().lookup(&text_hash("a")), Some(vec![0.5]));
}
