use thiserror::Error;

use crate::vectorizer::VectorizerError;

#[derive(Debug, Error)]
/// Errors returned by embedding resolution.
pub enum ResolveError {
    /// The batched vectorization fetch failed after retries. The whole batch
    /// is abandoned; nothing was inserted into the cache.
    #[error("vectorization upstream unavailable: {source}")]
    UpstreamUnavailable {
        /// The underlying client failure.
        #[source]
        source: VectorizerError,
    },
}

/// Convenience result type for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
