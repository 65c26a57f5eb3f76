/// Output of the similarity engine for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityData {
    /// Polarity-adjusted pairwise similarity, row/column order equal to the
    /// input question order. `matches[i][j]` is negative when questions `i`
    /// and `j` oppose in meaning.
    pub matches: Vec<Vec<f32>>,

    /// Plain cosine similarity of each question to the query, one scalar per
    /// question. `None` when no query was supplied.
    pub query_similarity: Option<Vec<f32>>,
}

impl SimilarityData {
    /// Number of questions scored (rows in the matrix).
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` if nothing was scored.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
