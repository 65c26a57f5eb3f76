use std::collections::HashMap;
use std::path::PathBuf;

use tracing::warn;

use super::error::{CacheError, CacheResult};

/// Mapping persisted by a [`CacheStore`]: content hash to embedding vector.
pub type VectorMap = HashMap<String, Vec<f32>>;

/// Durable store for the vector cache blob.
///
/// `load` never fails from the caller's perspective: any backend problem is
/// logged and reported as an empty mapping, so a cold or unreachable store
/// only costs re-vectorization. `save` overwrites the blob wholesale; there
/// is no append log and no cross-process guard, so two writers racing a save
/// resolve last-writer-wins.
pub trait CacheStore: Send + Sync {
    /// Loads the named blob, or an empty mapping on any failure.
    fn load(&self, name: &str) -> impl std::future::Future<Output = VectorMap> + Send;

    /// Overwrites the named blob with `entries`.
    fn save(
        &self,
        name: &str,
        entries: VectorMap,
    ) -> impl std::future::Future<Output = CacheResult<()>> + Send;
}

/// Filesystem-backed [`CacheStore`]: one JSON blob per cache under a root
/// directory, written via temp file + rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl CacheStore for FileStore {
    async fn load(&self, name: &str) -> VectorMap {
        let path = self.blob_path(name);

        let result = tokio::task::spawn_blocking(move || -> Result<VectorMap, String> {
            let bytes = std::fs::read(&path).map_err(|e| e.to_string())?;
            serde_json::from_slice(&bytes).map_err(|e| e.to_string())
        })
        .await;

        match result {
            Ok(Ok(entries)) => entries,
            Ok(Err(reason)) => {
                warn!(blob = name, reason = %reason, "Could not load cache blob, starting empty");
                VectorMap::new()
            }
            Err(e) => {
                warn!(blob = name, reason = %e, "Cache blob load task failed, starting empty");
                VectorMap::new()
            }
        }
    }

    async fn save(&self, name: &str, entries: VectorMap) -> CacheResult<()> {
        let path = self.blob_path(name);
        let temp_path = path.with_extension("json.tmp");
        let name_owned = name.to_string();

        tokio::task::spawn_blocking(move || -> CacheResult<()> {
            let bytes = serde_json::to_vec(&entries).map_err(|e| CacheError::Serialization {
                name: name_owned.clone(),
                reason: e.to_string(),
            })?;

            let persist = |e: std::io::Error| CacheError::PersistenceFailed {
                name: name_owned.clone(),
                reason: e.to_string(),
            };

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(&persist)?;
            }

            std::fs::write(&temp_path, &bytes).map_err(&persist)?;
            std::fs::rename(&temp_path, &path).map_err(&persist)?;

            Ok(())
        })
        .await
        .map_err(|e| CacheError::PersistenceFailed {
            name: name.to_string(),
            reason: e.to_string(),
        })?
    }
}

#[cfg(any(test, feature = "mock"))]
#[derive(Default, Clone)]
pub struct MockStore {
    blobs: std::sync::Arc<parking_lot::RwLock<HashMap<String, VectorMap>>>,
    save_calls: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    fail_saves: std::sync::Arc<std::sync::atomic::AtomicBool>,
}

#[cfg(any(test, feature = "mock"))]
impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a blob so `load` returns it.
    pub fn seed(&self, name: &str, entries: VectorMap) {
        self.blobs.write().insert(name.to_string(), entries);
    }

    /// Number of `save` calls observed (including failed ones).
    pub fn save_calls(&self) -> usize {
        self.save_calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Makes every subsequent `save` fail.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Returns the persisted blob, if any.
    pub fn persisted(&self, name: &str) -> Option<VectorMap> {
        self.blobs.read().get(name).cloned()
    }
}

#[cfg(any(test, feature = "mock"))]
impl CacheStore for MockStore {
    async fn load(&self, name: &str) -> VectorMap {
        self.blobs.read().get(name).cloned().unwrap_or_default()
    }

    async fn save(&self, name: &str, entries: VectorMap) -> CacheResult<()> {
        self.save_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        if self.fail_saves.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(CacheError::PersistenceFailed {
                name: name.to_string(),
                reason: "mock store save disabled".to_string(),
            });
        }

        self.blobs.write().insert(name.to_string(), entries);
        Ok(())
    }
}
