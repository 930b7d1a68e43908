// Rescoring of parses with P(tag | word) estimates compiled next to the
// dictionary.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::analysis::Parse;
use crate::dawg::ConditionalProbDist;
use crate::errors::{MorphError, Result};
use crate::tagset::Tag;

const PROB_FILE: &str = "p_t_given_w.json";

/// Adjusts parse scores using conditional probabilities. A missing table
/// disables the estimator; a malformed one fails the analyzer constructor.
#[derive(Debug)]
pub struct ProbabilityEstimator {
    probs: ConditionalProbDist,
}

impl ProbabilityEstimator {
    /// Load the table from a dictionary directory, if present.
    pub fn load(dict_path: impl AsRef<Path>) -> Result<Option<ProbabilityEstimator>> {
        let path = dict_path.as_ref().join(PROB_FILE);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no probability table, estimator disabled");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let data: HashMap<String, i64> = serde_json::from_slice(&bytes)
            .map_err(|e| MorphError::invalid_dictionary(&path, format!("malformed JSON: {e}")))?;
        debug!(path = %path.display(), entries = data.len(), "probability table loaded");
        Ok(Some(ProbabilityEstimator {
            probs: ConditionalProbDist::new(data),
        }))
    }

    /// P(tag | word); 0.0 for pairs not in the table.
    pub fn prob(&self, word: &str, tag: &str) -> f64 {
        self.probs.prob(word, tag)
    }

    /// Replace parse scores with conditional probabilities and sort by score
    /// descending (stable). When no parse has a recorded probability, the
    /// existing scores are renormalized to sum to 1 and the order is kept.
    pub fn apply_to_parses(&self, word_lower: &str, parses: &mut Vec<Parse>) {
        if parses.is_empty() {
            return;
        }
        let probs: Vec<f64> = parses
            .iter()
            .map(|p| self.prob(word_lower, p.tag.as_str()))
            .collect();
        let sum: f64 = probs.iter().sum();
        if sum == 0.0 {
            let total: f64 = parses.iter().map(|p| p.score).sum();
            if total > 0.0 {
                for p in parses.iter_mut() {
                    p.score /= total;
                }
            }
            return;
        }
        for (p, prob) in parses.iter_mut().zip(probs) {
            p.score = prob;
        }
        parses.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    }

    /// Sort tags by P(tag | word) descending (stable).
    pub fn apply_to_tags(&self, word_lower: &str, tags: &mut [Tag]) {
        tags.sort_by(|a, b| {
            let pa = self.prob(word_lower, a.as_str());
            let pb = self.prob(word_lower, b.as_str());
            pb.partial_cmp(&pa).unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}
