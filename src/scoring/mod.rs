//! Polarity-aware pairwise similarity.

pub mod engine;
pub mod error;
pub mod types;


pub use engine::{SimilarityEngine, cosine_matrix, cosine_similarity};
pub use error::{ScoringError, ScoringResult};
pub use types::SimilarityData;
