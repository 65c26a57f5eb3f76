//! Batched embedding resolution over the vector cache.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::{ResolveError, ResolveResult};

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::cache::{CacheStore, VectorCache};
use crate::hashing::text_hash;
use crate::vectorizer::Vectorizer;

/// Resolves texts to embedding vectors, one per text, in input order.
///
/// Cached vectors are served from the process-wide [`VectorCache`]; the
/// uncached remainder goes to the vectorization service in a single batched
/// fetch. A fetch failure abandons the whole batch with no partial cache
/// writes. After a successful fetch the cache is flushed exactly once; a
/// failed flush is logged and swallowed, since in-memory state is already
/// correct and durable staleness only costs a later re-fetch.
pub struct EmbeddingResolver<S: CacheStore, V: Vectorizer> {
    cache: Arc<VectorCache<S>>,
    vectorizer: V,
}

impl<S: CacheStore, V: Vectorizer> std::fmt::Debug for EmbeddingResolver<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingResolver")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<S: CacheStore, V: Vectorizer> EmbeddingResolver<S, V> {
    /// Creates a resolver over `cache` and `vectorizer`.
    pub fn new(cache: Arc<VectorCache<S>>, vectorizer: V) -> Self {
        Self { cache, vectorizer }
    }

    /// Returns the backing cache.
    pub fn cache(&self) -> &VectorCache<S> {
        &self.cache
    }

    /// Resolves one vector per text, output order matching input order.
    #[instrument(skip(self, texts), fields(texts = texts.len()))]
    pub async fn resolve(&self, texts: &[String]) -> ResolveResult<Vec<Vec<f32>>> {
        let hashes: Vec<String> = texts.iter().map(|t| text_hash(t)).collect();

        let mut resolved: Vec<Option<Vec<f32>>> =
            hashes.iter().map(|h| self.cache.lookup(h)).collect();

        let uncached: Vec<usize> = resolved
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.is_none().then_some(i))
            .collect();

        if uncached.is_empty() {
            debug!("All texts served from cache, no fetch issued");
            return Ok(collect_filled(resolved));
        }

        let fetch_texts: Vec<String> = uncached.iter().map(|&i| texts[i].clone()).collect();

        let vectors = self
            .vectorizer
            .vectorize(&fetch_texts)
            .await
            .map_err(|source| {
                error!(
                    uncached = fetch_texts.len(),
                    error = %source,
                    "Vectorization fetch failed, abandoning batch"
                );
                ResolveError::UpstreamUnavailable { source }
            })?;

        for (&i, vector) in uncached.iter().zip(vectors) {
            self.cache.insert(hashes[i].clone(), vector.clone());
            resolved[i] = Some(vector);
        }

        // One flush per resolve, not per vector; the request proceeds on
        // in-memory state even if persistence is lost.
        if let Err(err) = self.cache.flush().await {
            warn!(error = %err, "Cache flush failed, continuing with in-memory state");
        }

        info!(
            cached = texts.len() - uncached.len(),
            fetched = uncached.len(),
            "Embedding batch resolved"
        );

        Ok(collect_filled(resolved))
    }
}

fn collect_filled(resolved: Vec<Option<Vec<f32>>>) -> Vec<Vec<f32>> {
    resolved
        .into_iter()
        // SAFETY: every slot is filled either from the cache lookup or from
        // the merged fetch results before this point
        .map(|slot| slot.expect("resolved slot filled"))
        .collect()
}
