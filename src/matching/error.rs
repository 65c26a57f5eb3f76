use thiserror::Error;

use crate::embedding::ResolveError;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
/// Errors terminating a match request.
///
/// Reference-corpus unavailability and cache persistence failures are not
/// represented here: both degrade inside the pipeline (omitted enrichment
/// fields, stale durable blob) without failing the request.
pub enum MatchError {
    /// Malformed or empty input; reported before any processing.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request.
        reason: String,
    },

    /// The vectorization fetch failed; the whole request is aborted with the
    /// cache left as it was.
    #[error(transparent)]
    UpstreamUnavailable(#[from] ResolveError),

    /// Similarity scoring rejected the resolved vectors. Indicates an
    /// internal slicing bug rather than bad caller input.
    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}

/// Convenience result type for match operations.
pub type MatchResult<T> = Result<T, MatchError>;
