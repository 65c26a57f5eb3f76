use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::Question;

use super::error::{CorpusError, CorpusResult};

/// Topic labels attached to one reference item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMetadata {
    /// Topic labels; a reference item may carry several.
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Fixed catalog of reference questions with known topic labels, used as
/// classification ground truth via nearest-neighbor lookup.
///
/// Three parallel sequences aligned by index: index `i` in each refers to
/// the same reference item. Alignment is enforced at construction.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCorpus {
    questions: Vec<Question>,
    metadata: Vec<ReferenceMetadata>,
    embeddings: Vec<Vec<f32>>,
}

impl ReferenceCorpus {
    /// Builds a corpus, validating that the three sequences are aligned.
    pub fn new(
        questions: Vec<Question>,
        metadata: Vec<ReferenceMetadata>,
        embeddings: Vec<Vec<f32>>,
    ) -> CorpusResult<Self> {
        if questions.len() != metadata.len() || questions.len() != embeddings.len() {
            return Err(CorpusError::Misaligned {
                questions: questions.len(),
                metadata: metadata.len(),
                embeddings: embeddings.len(),
            });
        }

        Ok(Self {
            questions,
            metadata,
            embeddings,
        })
    }

    /// Number of reference items.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns `true` if the corpus holds no items.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Reference questions, index-aligned with metadata and embeddings.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Per-item topic metadata.
    pub fn metadata(&self) -> &[ReferenceMetadata] {
        &self.metadata
    }

    /// Per-item embedding vectors.
    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }
}

/// Source of the reference corpus, loaded once per process lifetime.
pub trait CorpusProvider: Send + Sync {
    /// Loads the full corpus.
    fn load(&self) -> impl std::future::Future<Output = CorpusResult<ReferenceCorpus>> + Send;
}

/// Filesystem-backed [`CorpusProvider`].
///
/// Questions and metadata are JSON-lines files (one record per line);
/// embeddings are a single JSON array of float arrays.
#[derive(Debug, Clone)]
pub struct FileCorpusProvider {
    questions_path: PathBuf,
    metadata_path: PathBuf,
    embeddings_path: PathBuf,
}

impl FileCorpusProvider {
    pub fn new(questions_path: PathBuf, metadata_path: PathBuf, embeddings_path: PathBuf) -> Self {
        Self {
            questions_path,
            metadata_path,
            embeddings_path,
        }
    }

    fn read_json_lines<T: serde::de::DeserializeOwned>(path: &PathBuf) -> CorpusResult<Vec<T>> {
        let content = std::fs::read_to_string(path).map_err(|e| CorpusError::Io {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| CorpusError::Parse {
                    path: path.clone(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}

impl CorpusProvider for FileCorpusProvider {
    async fn load(&self) -> CorpusResult<ReferenceCorpus> {
        let provider = self.clone();

        tokio::task::spawn_blocking(move || {
            let questions: Vec<Question> = Self::read_json_lines(&provider.questions_path)?;
            let metadata: Vec<ReferenceMetadata> = Self::read_json_lines(&provider.metadata_path)?;

            let embeddings_bytes =
                std::fs::read(&provider.embeddings_path).map_err(|e| CorpusError::Io {
                    path: provider.embeddings_path.clone(),
                    reason: e.to_string(),
                })?;
            let embeddings: Vec<Vec<f32>> =
                serde_json::from_slice(&embeddings_bytes).map_err(|e| CorpusError::Parse {
                    path: provider.embeddings_path.clone(),
                    reason: e.to_string(),
                })?;

            ReferenceCorpus::new(questions, metadata, embeddings)
        })
        .await
        .map_err(|e| CorpusError::Io {
            path: self.questions_path.clone(),
            reason: e.to_string(),
        })?
    }
}
