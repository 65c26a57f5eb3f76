//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.

use std::time::Duration;

/// Similarity differences with absolute value below this threshold are
/// treated as agreeing polarity (+1), never negative, never zero.
pub const POLARITY_EPSILON: f32 = 0.001;

/// Default blob name for the persisted vector cache.
pub const DEFAULT_CACHE_BLOB: &str = "cache_vectors.json";

/// Path appended to the vectorization service base URL.
pub const VECTORS_ENDPOINT: &str = "/text/vectors";

/// Attempts per vectorization fetch before reporting the upstream as down.
pub const FETCH_RETRIES: usize = 3;

/// Sleep between vectorization fetch attempts.
pub const FETCH_RETRY_BACKOFF: Duration = Duration::from_millis(750);

/// Per-request timeout for the vectorization service.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
