use serde::{Deserialize, Serialize};

use crate::model::{Instrument, Question};

/// One matching request: instruments to cross-match, plus an optional
/// free-text query to rank every question against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchRequest {
    /// Instruments whose questions are matched pairwise.
    #[serde(default)]
    pub instruments: Vec<Instrument>,

    /// Optional query; the empty string counts as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl MatchRequest {
    /// A request over `instruments` with no query.
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self {
            instruments,
            query: None,
        }
    }

    /// Attaches a query string.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Total question count across all instruments.
    pub fn question_count(&self) -> usize {
        self.instruments.iter().map(|i| i.questions.len()).sum()
    }
}

/// One matching response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    /// All input questions in input order, enriched with instrument
    /// back-references and (when a corpus was available) topic and
    /// nearest-match fields.
    pub questions: Vec<Question>,

    /// Polarity-adjusted pairwise similarity; row/column order equals the
    /// question order.
    pub matches: Vec<Vec<f32>>,

    /// Per-question similarity to the query; absent when no query was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_similarity: Option<Vec<f32>>,
}
