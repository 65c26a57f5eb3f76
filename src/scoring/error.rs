use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by similarity scoring.
pub enum ScoringError {
    /// Input vector sets had incompatible shapes.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Error message.
        reason: String,
    },
}

/// Convenience result type for scoring operations.
pub type ScoringResult<T> = Result<T, ScoringError>;
