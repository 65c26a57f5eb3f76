use std::sync::Arc;

use super::error::MatchError;
use super::orchestrator::MatchOrchestrator;
use super::types::MatchRequest;
use crate::cache::{MockStore, VectorCache};
use crate::model::{Instrument, Question};
use crate::negation::MockNegator;
use crate::reference::{ReferenceCorpus, ReferenceMetadata};
use crate::vectorizer::MockVectorizer;

async fn orchestrator(
    vectorizer: MockVectorizer,
    corpus: Option<ReferenceCorpus>,
) -> MatchOrchestrator<MockStore, MockVectorizer, MockNegator> {
    let cache = Arc::new(VectorCache::open("cache_vectors.json", MockStore::new()).await);
    MatchOrchestrator::new(cache, vectorizer, MockNegator::new(), corpus)
}

/// Vectorizer pinned so that "I feel anxious" and "I feel calm" are semantic
/// opposites and "I feel worried" is a near-synonym of "I feel anxious",
/// with negated forms mirroring accordingly.
fn semantic_vectorizer() -> MockVectorizer {
    let vectorizer = MockVectorizer::new();
    vectorizer.set_vector("I feel anxious", vec![1.0, 0.0]);
    vectorizer.set_vector("NOT: I feel anxious", vec![-1.0, 0.0]);
    vectorizer.set_vector("I feel calm", vec![-1.0, 0.05]);
    vectorizer.set_vector("NOT: I feel calm", vec![1.0, 0.05]);
    vectorizer.set_vector("I feel worried", vec![0.95, 0.05]);
    vectorizer.set_vector("NOT: I feel worried", vec![-0.95, -0.05]);
    vectorizer
}

fn instrument(texts: &[&str]) -> Instrument {
    Instrument::new(
        "Test instrument",
        texts.iter().map(|t| Question::new(*t)).collect(),
    )
}

#[tokio::test]
async fn test_empty_request_is_invalid() {
    let orchestrator = orchestrator(MockVectorizer::new(), None).await;

    let err = orchestrator
        .match_instruments(MatchRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, MatchError::InvalidRequest { .. }));
}

#[tokio::test]
async fn test_instruments_without_questions_are_invalid() {
    let orchestrator = orchestrator(MockVectorizer::new(), None).await;
    let request = MatchRequest::new(vec![instrument(&[])]);

    let err = orchestrator.match_instruments(request).await.unwrap_err();
    assert!(matches!(err, MatchError::InvalidRequest { .. }));
}

#[tokio::test]
async fn test_missing_ids_are_assigned() {
    let orchestrator = orchestrator(MockVectorizer::new(), None).await;
    let request = MatchRequest::new(vec![instrument(&["q1", "q2"])]);

    let response = orchestrator.match_instruments(request).await.unwrap();

    let first_id = response.questions[0].instrument_id.clone().unwrap();
    assert!(!first_id.is_empty());
    assert_eq!(response.questions[1].instrument_id.as_deref(), Some(first_id.as_str()));
}

#[tokio::test]
async fn test_caller_supplied_ids_are_kept() {
    let orchestrator = orchestrator(MockVectorizer::new(), None).await;
    let mut inst = instrument(&["q1"]);
    inst.instrument_id = Some("given-id".to_string());

    let response = orchestrator
        .match_instruments(MatchRequest::new(vec![inst]))
        .await
        .unwrap();

    assert_eq!(response.questions[0].instrument_id.as_deref(), Some("given-id"));
}

#[tokio::test]
async fn test_question_order_spans_instruments() {
    let orchestrator = orchestrator(MockVectorizer::new(), None).await;
    let request = MatchRequest::new(vec![instrument(&["a", "b"]), instrument(&["c"])]);

    let response = orchestrator.match_instruments(request).await.unwrap();

    let order: Vec<&str> = response
        .questions
        .iter()
        .map(|q| q.question_text.as_str())
        .collect();
    assert_eq!(order, vec!["a", "b", "c"]);
    assert_eq!(response.matches.len(), 3);
    assert_eq!(response.matches[0].len(), 3);
}

#[tokio::test]
async fn test_polarity_separates_opposites_from_synonyms() {
    let orchestrator = orchestrator(semantic_vectorizer(), None).await;
    let request = MatchRequest::new(vec![instrument(&[
        "I feel anxious",
        "I feel calm",
        "I feel worried",
    ])]);

    let response = orchestrator.match_instruments(request).await.unwrap();
    let matches = &response.matches;

    // Self-similarity with agreeing polarity.
    assert!((matches[0][0] - 1.0).abs() < 1e-4);

    // Opposites score negative, near-synonyms strongly positive.
    assert!(matches[0][1] < -0.9, "anxious/calm: {}", matches[0][1]);
    assert!(matches[0][2] > 0.9, "anxious/worried: {}", matches[0][2]);
}

#[tokio::test]
async fn test_query_similarity_column() {
    let vectorizer = semantic_vectorizer();
    vectorizer.set_vector("anxiety", vec![1.0, 0.0]);
    let orchestrator = orchestrator(vectorizer, None).await;

    let request = MatchRequest::new(vec![instrument(&["I feel anxious", "I feel calm"])])
        .with_query("anxiety");

    let response = orchestrator.match_instruments(request).await.unwrap();

    let query_similarity = response.query_similarity.unwrap();
    assert_eq!(query_similarity.len(), 2);
    assert!(query_similarity[0] > 0.99);
    assert!(query_similarity[1] < 0.0);
}

#[tokio::test]
async fn test_no_query_no_column() {
    let orchestrator = orchestrator(MockVectorizer::new(), None).await;
    let request = MatchRequest::new(vec![instrument(&["q1"])]);

    let response = orchestrator.match_instruments(request).await.unwrap();
    assert!(response.query_similarity.is_none());
}

#[tokio::test]
async fn test_empty_query_treated_as_absent() {
    let orchestrator = orchestrator(MockVectorizer::new(), None).await;
    let request = MatchRequest::new(vec![instrument(&["q1"])]).with_query("");

    let response = orchestrator.match_instruments(request).await.unwrap();
    assert!(response.query_similarity.is_none());
}

#[tokio::test]
async fn test_upstream_failure_aborts_request() {
    let vectorizer = MockVectorizer::new();
    vectorizer.fail(true);
    let orchestrator = orchestrator(vectorizer, None).await;

    let err = orchestrator
        .match_instruments(MatchRequest::new(vec![instrument(&["q1"])]))
        .await
        .unwrap_err();

    assert!(matches!(err, MatchError::UpstreamUnavailable(_)));
    assert!(orchestrator.resolver().cache().is_empty());
}

#[tokio::test]
async fn test_without_corpus_enrichment_fields_absent() {
    let orchestrator = orchestrator(MockVectorizer::new(), None).await;
    let request = MatchRequest::new(vec![instrument(&["q1"])]);

    let response = orchestrator.match_instruments(request).await.unwrap();

    assert!(response.questions[0].topics_auto.is_none());
    assert!(response.questions[0].nearest_match_from_mhc_auto.is_none());
}

#[tokio::test]
async fn test_with_corpus_topics_assigned() {
    let vectorizer = semantic_vectorizer();
    let corpus = ReferenceCorpus::new(
        vec![Question::new("Feeling nervous, anxious, or on edge")],
        vec![ReferenceMetadata {
            topics: vec!["anxiety".to_string()],
        }],
        vec![vec![1.0, 0.0]],
    )
    .unwrap();
    let orchestrator = orchestrator(vectorizer, Some(corpus)).await;

    let request = MatchRequest::new(vec![instrument(&["I feel anxious"])]);
    let response = orchestrator.match_instruments(request).await.unwrap();

    assert_eq!(
        response.questions[0].topics_auto,
        Some(vec!["anxiety".to_string()])
    );
    assert_eq!(
        response.questions[0]
            .nearest_match_from_mhc_auto
            .as_ref()
            .unwrap()
            .question_text,
        "Feeling nervous, anxious, or on edge"
    );
}

#[tokio::test]
async fn test_negated_forms_share_the_resolve_batch() {
    let vectorizer = MockVectorizer::new();
    let orchestrator = orchestrator(vectorizer.clone(), None).await;

    let request = MatchRequest::new(vec![instrument(&["q1", "q2"])]).with_query("query");
    orchestrator.match_instruments(request).await.unwrap();

    // One fetch for the whole working set: 2 originals + 2 negated + query.
    assert_eq!(vectorizer.call_count(), 1);
    assert_eq!(vectorizer.texts_vectorized(), 5);
}
