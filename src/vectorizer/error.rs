use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the vectorization service client.
pub enum VectorizerError {
    /// The service answered with a non-success status.
    #[error("vectorization service returned status {status}")]
    UpstreamStatus {
        /// HTTP status code.
        status: u16,
    },

    /// The request never completed (connect failure, timeout).
    #[error("vectorization request failed: {reason}")]
    Transport {
        /// Error message.
        reason: String,
    },

    /// The response body was not a vector-per-text JSON array.
    #[error("failed to decode vectorization response: {reason}")]
    Decode {
        /// Error message.
        reason: String,
    },

    /// The response did not return one vector per input text.
    #[error("vectorization response shape mismatch: sent {sent} texts, received {received} vectors")]
    LengthMismatch {
        /// Texts sent.
        sent: usize,
        /// Vectors received.
        received: usize,
    },
}

impl VectorizerError {
    /// Whether another attempt could succeed. Shape and decode problems are
    /// deterministic and are not retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VectorizerError::UpstreamStatus { .. } | VectorizerError::Transport { .. }
        )
    }
}

/// Convenience result type for vectorizer operations.
pub type VectorizerResult<T> = Result<T, VectorizerError>;
