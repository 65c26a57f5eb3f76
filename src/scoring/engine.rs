use tracing::debug;

use crate::constants::POLARITY_EPSILON;

use super::error::{ScoringError, ScoringResult};
use super::types::SimilarityData;

/// Cosine similarity between two vectors.
///
/// Returns `0.0` for zero-norm or mismatched inputs rather than NaN, so a
/// degenerate embedding never poisons a whole matrix.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

/// Row-pairwise cosine similarity: `out[i][j] = cosine(a[i], b[j])`.
pub fn cosine_matrix(a: &[Vec<f32>], b: &[Vec<f32>]) -> Vec<Vec<f32>> {
    a.iter()
        .map(|row| b.iter().map(|col| cosine_similarity(row, col)).collect())
        .collect()
}

/// Computes polarity-adjusted pairwise similarity.
///
/// Plain cosine similarity conflates "same statement" with "logically
/// opposite statement phrased similarly" ("I feel anxious" vs "I feel
/// calm"). Each pair is therefore read twice: as given, and with one side
/// negated. The stronger reading supplies the magnitude and the comparison
/// between readings supplies the sign. Near-zero differences
/// (|difference| < [`POLARITY_EPSILON`]) are forced to agreeing polarity so
/// sign noise cannot flip a pair unpredictably.
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine;

impl SimilarityEngine {
    pub fn new() -> Self {
        Self
    }

    /// Scores `v_pos` pairwise against itself, polarity-adjusted via
    /// `v_neg`, plus an optional plain-cosine query column.
    ///
    /// `v_pos[i]` and `v_neg[i]` must embed the original and negated form of
    /// the same question, in the same order.
    pub fn score(
        &self,
        v_pos: &[Vec<f32>],
        v_neg: &[Vec<f32>],
        v_query: Option<&[f32]>,
    ) -> ScoringResult<SimilarityData> {
        if v_pos.is_empty() {
            return Err(ScoringError::InvalidInput {
                reason: "no question vectors to score".to_string(),
            });
        }

        if v_pos.len() != v_neg.len() {
            return Err(ScoringError::InvalidInput {
                reason: format!(
                    "positive/negated vector count mismatch: {} vs {}",
                    v_pos.len(),
                    v_neg.len()
                ),
            });
        }

        let n = v_pos.len();

        let similarity = cosine_matrix(v_pos, v_pos);
        let similarity_neg1 = cosine_matrix(v_neg, v_pos);
        let similarity_neg2 = cosine_matrix(v_pos, v_neg);

        let mut matches = vec![vec![0.0f32; n]; n];
        for i in 0..n {
            for j in 0..n {
                let neg_mean = (similarity_neg1[i][j] + similarity_neg2[i][j]) / 2.0;
                let difference = similarity[i][j] - neg_mean;

                let polarity = if difference.abs() < POLARITY_EPSILON {
                    1.0
                } else {
                    difference.signum()
                };

                matches[i][j] = similarity[i][j].max(neg_mean) * polarity;
            }
        }

        let query_similarity =
            v_query.map(|query| v_pos.iter().map(|row| cosine_similarity(row, query)).collect());

        debug!(
            questions = n,
            with_query = query_similarity.is_some(),
            "Similarity matrix computed"
        );

        Ok(SimilarityData {
            matches,
            query_similarity,
        })
    }
}
