//! Reference-corpus matching and topic inference.

pub mod corpus;
pub mod error;
pub mod matcher;


pub use corpus::{CorpusProvider, FileCorpusProvider, ReferenceCorpus, ReferenceMetadata};
pub use error::{CorpusError, CorpusResult};
pub use matcher::ReferenceMatcher;

use tracing::{info, warn};

/// Loads the corpus, degrading to `None` on any failure.
///
/// A missing or malformed corpus must not fail matching; it only disables
/// topic inference and nearest-match enrichment for the process lifetime.
pub async fn load_corpus<P: CorpusProvider>(provider: &P) -> Option<ReferenceCorpus> {
    match provider.load().await {
        Ok(corpus) if corpus.is_empty() => {
            warn!("Reference corpus is empty, topic inference disabled");
            None
        }
        Ok(corpus) => {
            info!(items = corpus.len(), "Reference corpus loaded");
            Some(corpus)
        }
        Err(err) => {
            warn!(error = %err, "Could not load reference corpus, topic inference disabled");
            None
        }
    }
}
