use std::collections::HashMap;

use tracing::{debug, warn};

use crate::model::Question;
use crate::scoring::cosine_matrix;

use super::corpus::ReferenceCorpus;

/// Assigns nearest-reference matches and dominant topics onto questions.
///
/// Topic inference is per-instrument, not per-question: every question votes
/// for the topics of its nearest reference item, and an instrument keeps a
/// topic iff its vote count strictly exceeds half of that instrument's
/// highest count (majority of the peak, not of the total). Every question in
/// the instrument then receives the same dominant-topic set.
#[derive(Debug, Clone, Default)]
pub struct ReferenceMatcher;

impl ReferenceMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Matches `questions` (embedded as `v_pos`, same order) against the
    /// corpus, writing `nearest_match_from_mhc_auto` and `topics_auto` in
    /// place. A no-op on an empty corpus: the fields stay absent so callers
    /// can tell "no corpus" from "zero matches".
    pub fn assign(
        &self,
        corpus: &ReferenceCorpus,
        v_pos: &[Vec<f32>],
        questions: &mut [Question],
    ) {
        if corpus.is_empty() || questions.is_empty() {
            return;
        }

        if v_pos.len() != questions.len() {
            warn!(
                vectors = v_pos.len(),
                questions = questions.len(),
                "Embedding rows do not line up with questions, skipping reference assignment"
            );
            return;
        }

        let similarities = cosine_matrix(v_pos, corpus.embeddings());

        let mut counters: HashMap<String, HashMap<String, usize>> = HashMap::new();

        for (idx, row) in similarities.iter().enumerate() {
            let nearest = argmax(row);

            questions[idx].nearest_match_from_mhc_auto =
                Some(Box::new(corpus.questions()[nearest].clone()));

            if let Some(instrument_id) = questions[idx].instrument_id.clone() {
                let counter = counters.entry(instrument_id).or_default();
                for topic in &corpus.metadata()[nearest].topics {
                    *counter.entry(topic.clone()).or_insert(0) += 1;
                }
            }
        }

        let mut dominant: HashMap<String, Vec<String>> = HashMap::new();
        for (instrument_id, counts) in &counters {
            let max_count = counts.values().copied().max().unwrap_or(0);

            let mut topics: Vec<String> = counts
                .iter()
                .filter(|&(_, &count)| count * 2 > max_count)
                .map(|(topic, _)| topic.clone())
                .collect();
            topics.sort();

            debug!(
                instrument_id = %instrument_id,
                max_count = max_count,
                topics = ?topics,
                "Dominant topics resolved"
            );

            dominant.insert(instrument_id.clone(), topics);
        }

        for question in questions.iter_mut() {
            if let Some(topics) = question
                .instrument_id
                .as_ref()
                .and_then(|id| dominant.get(id))
            {
                question.topics_auto = Some(topics.clone());
            }
        }
    }
}

/// Index of the largest value; first occurrence wins ties.
fn argmax(row: &[f32]) -> usize {
    let mut best = 0usize;
    for (i, &value) in row.iter().enumerate() {
        if value > row[best] {
            best = i;
        }
    }
    best
}
