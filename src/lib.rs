//! Concord matching pipeline (used by the API gateway and integration tests).
//!
//! Matches free-text questionnaire items against each other and against a
//! fixed reference corpus by semantic similarity, using externally supplied
//! embedding vectors. One request flows through:
//!
//! 1. [`MatchOrchestrator`] builds the working text set (originals, negated
//!    forms, optional query) and drives the cycle.
//! 2. [`EmbeddingResolver`] resolves one vector per text, serving repeats
//!    from the process-wide [`VectorCache`] and batching the remainder into
//!    a single [`Vectorizer`] fetch.
//! 3. [`SimilarityEngine`] computes the polarity-adjusted pairwise
//!    similarity matrix and the optional query column.
//! 4. [`ReferenceMatcher`] finds each question's nearest reference item and
//!    aggregates per-instrument topic votes into dominant-topic labels.
//!
//! Document parsing, negation generation, and HTTP transport are external
//! collaborator concerns; the crate exposes trait seams ([`Vectorizer`],
//! [`Negator`], [`CacheStore`], [`CorpusProvider`]) for them instead.
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod hashing;
pub mod matching;
pub mod model;
pub mod negation;
pub mod reference;
pub mod scoring;
pub mod vectorizer;

#[cfg(any(test, feature = "mock"))]
pub use cache::MockStore;
pub use cache::{CacheError, CacheResult, CacheStore, FileStore, VectorCache, VectorMap};

pub use config::{Config, ConfigError, DEFAULT_VECTORIZER_URL};
pub use constants::{DEFAULT_CACHE_BLOB, POLARITY_EPSILON};
pub use embedding::{EmbeddingResolver, ResolveError, ResolveResult};
pub use hashing::text_hash;
pub use matching::{MatchError, MatchOrchestrator, MatchRequest, MatchResponse, MatchResult};
pub use model::{Instrument, Question, generate_id};
#[cfg(any(test, feature = "mock"))]
pub use negation::MockNegator;
pub use negation::Negator;
pub use reference::{
    CorpusError, CorpusProvider, CorpusResult, FileCorpusProvider, ReferenceCorpus,
    ReferenceMatcher, ReferenceMetadata, load_corpus,
};
pub use scoring::{
    ScoringError, ScoringResult, SimilarityData, SimilarityEngine, cosine_matrix,
    cosine_similarity,
};
#[cfg(any(test, feature = "mock"))]
pub use vectorizer::MockVectorizer;
pub use vectorizer::{RemoteVectorizer, Vectorizer, VectorizerError, VectorizerResult};
