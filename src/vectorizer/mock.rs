use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::error::{VectorizerError, VectorizerResult};
use super::Vectorizer;

const MOCK_DIM: usize = 8;

/// Deterministic in-process [`Vectorizer`].
///
/// Texts with a preset vector (see [`set_vector`](MockVectorizer::set_vector))
/// return it; everything else gets a stable pseudo-vector derived from the
/// text hash. Records every batch so tests can assert fetch counts and
/// batching behavior.
#[derive(Default, Clone)]
pub struct MockVectorizer {
    preset: Arc<RwLock<HashMap<String, Vec<f32>>>>,
    batches: Arc<RwLock<Vec<Vec<String>>>>,
    calls: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl MockVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the vector returned for `text`.
    pub fn set_vector(&self, text: &str, vector: Vec<f32>) {
        self.preset.write().insert(text.to_string(), vector);
    }

    /// Makes every subsequent call fail with an upstream status.
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of `vectorize` calls observed.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Total texts vectorized across all calls.
    pub fn texts_vectorized(&self) -> usize {
        self.batches.read().iter().map(|b| b.len()).sum()
    }

    /// The batches received, in call order.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.read().clone()
    }

    fn pseudo_vector(text: &str) -> Vec<f32> {
        let digest = blake3::hash(text.as_bytes());
        digest.as_bytes()[..MOCK_DIM]
            .iter()
            .map(|&b| (b as f32 - 127.5) / 127.5)
            .collect()
    }
}

impl Vectorizer for MockVectorizer {
    async fn vectorize(&self, texts: &[String]) -> VectorizerResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batches.write().push(texts.to_vec());

        if self.fail.load(Ordering::SeqCst) {
            return Err(VectorizerError::UpstreamStatus { status: 500 });
        }

        let preset = self.preset.read();
        Ok(texts
            .iter()
            .map(|t| {
                preset
                    .get(t)
                    .cloned()
                    .unwrap_or_else(|| Self::pseudo_vector(t))
            })
            .collect())
    }
}
