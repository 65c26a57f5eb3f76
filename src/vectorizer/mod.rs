//! Client for the external vectorization service.
//!
//! The service is the only producer of embeddings in the pipeline: one
//! `POST {base_url}/text/vectors` with a JSON array of strings, answered by
//! one vector per string in the same order. The remote client wraps the call
//! in a bounded retry with backoff; exhaustion surfaces as an upstream
//! failure and aborts the whole batch upstream of any cache write.

pub mod error;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::{VectorizerError, VectorizerResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockVectorizer;

use std::time::Duration;

use tracing::{debug, warn};

use crate::constants::{FETCH_RETRIES, FETCH_RETRY_BACKOFF, FETCH_TIMEOUT, VECTORS_ENDPOINT};

/// Capability to turn a batch of texts into one embedding vector per text.
///
/// Output length and order must match the input exactly.
pub trait Vectorizer: Send + Sync {
    /// Vectorizes `texts` in one batched call.
    fn vectorize(
        &self,
        texts: &[String],
    ) -> impl std::future::Future<Output = VectorizerResult<Vec<Vec<f32>>>> + Send;
}

/// HTTP client for a remote vectorization service.
#[derive(Debug, Clone)]
pub struct RemoteVectorizer {
    base_url: String,
    http: reqwest::Client,
    retries: usize,
    backoff: Duration,
}

impl RemoteVectorizer {
    /// Creates a client for the service at `base_url` with default retry
    /// policy and request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.into(),
            http,
            retries: FETCH_RETRIES,
            backoff: FETCH_RETRY_BACKOFF,
        }
    }

    /// Overrides the retry policy (attempt count and inter-attempt sleep).
    pub fn with_retry_policy(mut self, retries: usize, backoff: Duration) -> Self {
        self.retries = retries.max(1);
        self.backoff = backoff;
        self
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), VECTORS_ENDPOINT)
    }

    async fn fetch_once(&self, texts: &[String]) -> VectorizerResult<Vec<Vec<f32>>> {
        let response = self
            .http
            .post(self.endpoint())
            .json(texts)
            .send()
            .await
            .map_err(|e| VectorizerError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(VectorizerError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let vectors: Vec<Vec<f32>> =
            response
                .json()
                .await
                .map_err(|e| VectorizerError::Decode {
                    reason: e.to_string(),
                })?;

        if vectors.len() != texts.len() {
            return Err(VectorizerError::LengthMismatch {
                sent: texts.len(),
                received: vectors.len(),
            });
        }

        Ok(vectors)
    }
}

impl Vectorizer for RemoteVectorizer {
    async fn vectorize(&self, texts: &[String]) -> VectorizerResult<Vec<Vec<f32>>> {
        let mut attempt = 0usize;
        loop {
            attempt += 1;

            match self.fetch_once(texts).await {
                Ok(vectors) => {
                    debug!(
                        texts = texts.len(),
                        attempt = attempt,
                        "Vectorization fetch succeeded"
                    );
                    return Ok(vectors);
                }
                Err(err) if err.is_retryable() && attempt < self.retries => {
                    warn!(
                        attempt = attempt,
                        retries = self.retries,
                        error = %err,
                        "Vectorization fetch failed, retrying"
                    );
                    tokio::time::sleep(self.backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
