//! Process-wide cache of previously computed embedding vectors.
//!
//! Keyed by the content hash of the exact text (see [`crate::hashing`]), so
//! identical items across requests and instruments resolve without touching
//! the vectorization service. The cache is loaded from its durable blob once
//! at startup and flushed wholesale after any batch that added entries; a
//! failed flush leaves the in-memory state intact and only costs durable
//! freshness.

pub mod error;
pub mod store;


pub use error::{CacheError, CacheResult};
#[cfg(any(test, feature = "mock"))]
pub use store::MockStore;
pub use store::{CacheStore, FileStore, VectorMap};

use parking_lot::RwLock;
use tracing::{debug, info};

/// Hash-keyed store of embedding vectors with a durable backing blob.
///
/// Concurrent `lookup`/`insert` on the in-memory map are guarded by the
/// lock; concurrent `flush` calls are not coordinated across writers and
/// resolve last-writer-wins at the store (an accepted, documented property
/// of the wholesale-overwrite persistence contract).
pub struct VectorCache<S: CacheStore> {
    name: String,
    store: S,
    entries: RwLock<VectorMap>,
}

impl<S: CacheStore> std::fmt::Debug for VectorCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorCache")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<S: CacheStore> VectorCache<S> {
    /// Opens the cache, loading the named blob from `store` once.
    pub async fn open(name: impl Into<String>, store: S) -> Self {
        let name = name.into();
        let entries = store.load(&name).await;

        info!(blob = %name, entries = entries.len(), "Vector cache loaded");

        Self {
            name,
            store,
            entries: RwLock::new(entries),
        }
    }

    /// Returns the blob name this cache persists under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cached vector for `hash`, if present.
    pub fn lookup(&self, hash: &str) -> Option<Vec<f32>> {
        self.entries.read().get(hash).cloned()
    }

    /// Inserts (or replaces) the vector for `hash`.
    pub fn insert(&self, hash: String, vector: Vec<f32>) {
        self.entries.write().insert(hash, vector);
    }

    /// Number of cached vectors.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if no vectors are cached.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of the full mapping (for introspection surfaces).
    pub fn entries(&self) -> VectorMap {
        self.entries.read().clone()
    }

    /// Persists the full mapping to the durable store.
    ///
    /// The snapshot is taken before any I/O so the lock is never held across
    /// the store call. One bounded save attempt; the caller decides whether
    /// a failure is logged and swallowed or surfaced.
    pub async fn flush(&self) -> CacheResult<()> {
        let snapshot = self.entries.read().clone();
        let count = snapshot.len();

        self.store.save(&self.name, snapshot).await?;

        debug!(blob = %self.name, entries = count, "Vector cache flushed");
        Ok(())
    }
}
