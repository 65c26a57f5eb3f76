//! Durable-cache behavior across process restarts (simulated by reopening
//! the cache from the same on-disk blob).

use std::sync::Arc;

use concord::{
    FileStore, Instrument, MatchOrchestrator, MatchRequest, MockNegator, MockVectorizer, Question,
    VectorCache,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn request(texts: &[&str]) -> MatchRequest {
    MatchRequest::new(vec![Instrument::new(
        "Test instrument",
        texts.iter().map(|t| Question::new(*t)).collect(),
    )])
}

#[tokio::test]
async fn test_warm_cache_survives_reopen() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    // First "process": resolves and flushes to disk.
    {
        let store = FileStore::new(dir.path().to_path_buf());
        let cache = Arc::new(VectorCache::open("cache_vectors.json", store).await);
        let orchestrator =
            MatchOrchestrator::new(cache, MockVectorizer::new(), MockNegator::new(), None);

        orchestrator
            .match_instruments(request(&["I feel anxious", "I feel calm"]))
            .await
            .unwrap();
    }

    // Second "process": same blob, fresh vectorizer. Nothing to fetch.
    let store = FileStore::new(dir.path().to_path_buf());
    let cache = Arc::new(VectorCache::open("cache_vectors.json", store).await);
    assert_eq!(cache.len(), 4);

    let vectorizer = MockVectorizer::new();
    let orchestrator =
        MatchOrchestrator::new(cache, vectorizer.clone(), MockNegator::new(), None);

    orchestrator
        .match_instruments(request(&["I feel anxious", "I feel calm"]))
        .await
        .unwrap();

    assert_eq!(vectorizer.call_count(), 0);
}

#[tokio::test]
async fn test_flush_overwrites_wholesale() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().to_path_buf());

    let cache = VectorCache::open("cache_vectors.json", store.clone()).await;
    cache.insert("k1".to_string(), vec![1.0]);
    cache.insert("k2".to_string(), vec![2.0]);
    cache.flush().await.unwrap();

    // A second cache opened from the same blob, with fewer entries, wins on
    // flush: the blob is replaced, not merged.
    let late = VectorCache::open("cache_vectors.json", store.clone()).await;
    assert_eq!(late.len(), 2);

    let fresh = VectorCache::open("missing.json", store.clone()).await;
    fresh.insert("k3".to_string(), vec![3.0]);
    fresh.flush().await.unwrap();

    let reloaded = VectorCache::open("missing.json", store).await;
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.lookup("k3"), Some(vec![3.0]));
    assert_eq!(reloaded.lookup("k1"), None);
}
