use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by cache persistence.
pub enum CacheError {
    /// The blob could not be serialized.
    #[error("failed to serialize cache blob '{name}': {reason}")]
    Serialization {
        /// Blob name.
        name: String,
        /// Error message.
        reason: String,
    },

    /// The blob could not be written to the durable store.
    #[error("failed to persist cache blob '{name}': {reason}")]
    PersistenceFailed {
        /// Blob name.
        name: String,
        /// Error message.
        reason: String,
    },
}

/// Convenience result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
