use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::cache::{CacheStore, VectorCache};
use crate::embedding::EmbeddingResolver;
use crate::model::Question;
use crate::negation::Negator;
use crate::reference::{ReferenceCorpus, ReferenceMatcher};
use crate::scoring::SimilarityEngine;
use crate::vectorizer::Vectorizer;

use super::error::{MatchError, MatchResult};
use super::types::{MatchRequest, MatchResponse};

/// Composes cache, resolver, scorer and reference matcher into one
/// request/response cycle.
///
/// The corpus is loaded once at construction and shared for the process
/// lifetime; requests are otherwise self-contained.
pub struct MatchOrchestrator<S: CacheStore, V: Vectorizer, N: Negator> {
    resolver: EmbeddingResolver<S, V>,
    negator: N,
    engine: SimilarityEngine,
    matcher: ReferenceMatcher,
    corpus: Option<ReferenceCorpus>,
}

impl<S: CacheStore, V: Vectorizer, N: Negator> std::fmt::Debug for MatchOrchestrator<S, V, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchOrchestrator")
            .field("resolver", &self.resolver)
            .field("corpus_items", &self.corpus.as_ref().map(|c| c.len()))
            .finish_non_exhaustive()
    }
}

impl<S: CacheStore, V: Vectorizer, N: Negator> MatchOrchestrator<S, V, N> {
    /// Creates an orchestrator over the shared cache and collaborators.
    /// `corpus` is `None` when the reference corpus is unavailable; matching
    /// then runs without topic inference.
    pub fn new(
        cache: Arc<VectorCache<S>>,
        vectorizer: V,
        negator: N,
        corpus: Option<ReferenceCorpus>,
    ) -> Self {
        Self {
            resolver: EmbeddingResolver::new(cache, vectorizer),
            negator,
            engine: SimilarityEngine::new(),
            matcher: ReferenceMatcher::new(),
            corpus,
        }
    }

    /// Returns the embedding resolver (and through it, the cache).
    pub fn resolver(&self) -> &EmbeddingResolver<S, V> {
        &self.resolver
    }

    /// Returns the reference corpus, if one was loaded.
    pub fn corpus(&self) -> Option<&ReferenceCorpus> {
        self.corpus.as_ref()
    }

    /// Runs one full match cycle.
    #[instrument(skip(self, request), fields(instruments = request.instruments.len()))]
    pub async fn match_instruments(&self, request: MatchRequest) -> MatchResult<MatchResponse> {
        let MatchRequest {
            mut instruments,
            query,
        } = request;

        if instruments.is_empty() {
            return Err(MatchError::InvalidRequest {
                reason: "no instruments in request".to_string(),
            });
        }

        let mut questions: Vec<Question> = Vec::new();
        let mut texts: Vec<String> = Vec::new();
        let mut negated_texts: Vec<String> = Vec::new();

        for instrument in &mut instruments {
            instrument.assign_missing_ids();
            let language = instrument.language.clone();

            for question in &instrument.questions {
                let mut question = question.clone();
                question.instrument_id = instrument.instrument_id.clone();

                texts.push(question.question_text.clone());
                negated_texts.push(
                    self.negator
                        .negate(&question.question_text, language.as_deref()),
                );
                questions.push(question);
            }
        }

        if questions.is_empty() {
            return Err(MatchError::InvalidRequest {
                reason: "no questions in request".to_string(),
            });
        }

        let query = query.filter(|q| !q.is_empty());

        // Working text list: originals, then negated forms, then the query.
        // The split back into slices is positional, using these lengths.
        let n = texts.len();
        let mut working = texts;
        working.append(&mut negated_texts);
        if let Some(ref query_text) = query {
            working.push(query_text.clone());
        }

        debug!(
            questions = n,
            with_query = query.is_some(),
            "Resolving working text set"
        );

        let vectors = self.resolver.resolve(&working).await?;

        let v_pos = &vectors[..n];
        let v_neg = &vectors[n..n * 2];
        let v_query = query.as_ref().map(|_| vectors[n * 2].as_slice());

        let similarity = self.engine.score(v_pos, v_neg, v_query)?;

        if let Some(corpus) = &self.corpus {
            self.matcher.assign(corpus, v_pos, &mut questions);
        }

        info!(
            questions = n,
            with_query = query.is_some(),
            with_corpus = self.corpus.is_some(),
            "Match cycle complete"
        );

        Ok(MatchResponse {
            questions,
            matches: similarity.matches,
            query_similarity: similarity.query_similarity,
        })
    }
}
