use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by reference-corpus loading and construction.
pub enum CorpusError {
    /// A corpus file could not be read.
    #[error("failed to read corpus file {path}: {reason}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Error message.
        reason: String,
    },

    /// A corpus file could not be parsed.
    #[error("failed to parse corpus file {path}: {reason}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Error message.
        reason: String,
    },

    /// The three corpus sequences are not index-aligned.
    #[error(
        "misaligned corpus: {questions} questions, {metadata} metadata records, {embeddings} embeddings"
    )]
    Misaligned {
        /// Question count.
        questions: usize,
        /// Metadata record count.
        metadata: usize,
        /// Embedding count.
        embeddings: usize,
    },
}

/// Convenience result type for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;
