// Map-backed stand-ins for the DAWG structures of a compiled dictionary:
// the word index, prediction-suffix tables, the lexical prefix matcher and
// the conditional probability table.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

/// Character substitution table used for approximate lookups (e.g. `ё → е`).
pub type CharSubstitutes = HashMap<char, char>;

// ---------------------------------------------------------------------------
// Generic keyed storage with approximate lookup
// ---------------------------------------------------------------------------

/// String-keyed storage with approximate lookup under a character
/// substitution table.
#[derive(Debug)]
pub struct Dawg<T> {
    data: HashMap<String, Vec<T>>,
}

impl<T> Dawg<T> {
    pub fn new(data: HashMap<String, Vec<T>>) -> Self {
        Dawg { data }
    }

    /// Values stored under the exact key; empty if absent.
    pub fn items(&self, key: &str) -> &[T] {
        self.data.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// The underlying map. Callers must treat it as read-only.
    pub fn data(&self) -> &HashMap<String, Vec<T>> {
        &self.data
    }

    /// All stored keys reachable from `word` by independently substituting
    /// characters per `subs`, paired with their values. The original word is
    /// tried first; the remaining variants follow generation order, so the
    /// result is deterministic.
    pub fn similar_items<'a>(
        &'a self,
        word: &str,
        subs: &CharSubstitutes,
    ) -> Vec<(String, &'a [T])> {
        generate_variants(word, subs)
            .into_iter()
            .filter_map(|variant| {
                self.data
                    .get(&variant)
                    .map(|vals| (variant, vals.as_slice()))
            })
            .collect()
    }

}

/// All variants of `word` obtained by replacing characters per `subs`, the
/// original word first. Each substitutable position doubles the number of
/// variants; duplicates are removed.
fn generate_variants(word: &str, subs: &CharSubstitutes) -> Vec<String> {
    let mut variants = vec![word.to_string()];
    let mut seen: HashSet<String> = variants.iter().cloned().collect();
    let chars: Vec<char> = word.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        let Some(&sub) = subs.get(c) else { continue };
        for j in 0..variants.len() {
            let mut replaced: Vec<char> = variants[j].chars().collect();
            replaced[i] = sub;
            let variant: String = replaced.into_iter().collect();
            if seen.insert(variant.clone()) {
                variants.push(variant);
            }
        }
    }
    variants
}

// ---------------------------------------------------------------------------
// Word index
// ---------------------------------------------------------------------------

/// Reference to a single word form: the paradigm it belongs to and the row
/// index of the form inside that paradigm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WordFormRef {
    #[serde(rename = "ParadigmID")]
    pub paradigm_id: u16,
    #[serde(rename = "FormIndex")]
    pub form_index: u16,
}

/// The word index: surface form to its paradigm records.
#[derive(Debug)]
pub struct WordsDawg(Dawg<WordFormRef>);

impl WordsDawg {
    pub fn new(data: HashMap<String, Vec<WordFormRef>>) -> Self {
        WordsDawg(Dawg::new(data))
    }

    pub fn lookup(&self, word: &str) -> &[WordFormRef] {
        self.0.items(word)
    }

    pub fn similar_items<'a>(
        &'a self,
        word: &str,
        subs: &CharSubstitutes,
    ) -> Vec<(String, &'a [WordFormRef])> {
        self.0.similar_items(word, subs)
    }

    pub fn data(&self) -> &HashMap<String, Vec<WordFormRef>> {
        self.0.data()
    }
}

// ---------------------------------------------------------------------------
// Prediction suffixes
// ---------------------------------------------------------------------------

/// A suffix-prediction record: how many dictionary words with this suffix
/// take the given (paradigm, form) reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PredictionRecord {
    #[serde(rename = "Count")]
    pub count: u16,
    #[serde(rename = "ParadigmID")]
    pub paradigm_id: u16,
    #[serde(rename = "FormIndex")]
    pub form_index: u16,
}

/// Suffix-prediction table for one paradigm prefix.
#[derive(Debug)]
pub struct PredictionSuffixesDawg(Dawg<PredictionRecord>);

impl PredictionSuffixesDawg {
    pub fn new(data: HashMap<String, Vec<PredictionRecord>>) -> Self {
        PredictionSuffixesDawg(Dawg::new(data))
    }

    pub fn similar_items<'a>(
        &'a self,
        suffix: &str,
        subs: &CharSubstitutes,
    ) -> Vec<(String, &'a [PredictionRecord])> {
        self.0.similar_items(suffix, subs)
    }
}

// ---------------------------------------------------------------------------
// Prefix matcher
// ---------------------------------------------------------------------------

/// Matches words against a fixed list of lexical prefixes.
#[derive(Debug, Clone, Default)]
pub struct PrefixMatcher {
    prefixes: Vec<String>,
}

impl PrefixMatcher {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PrefixMatcher {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the word starts with any of the prefixes.
    pub fn is_prefixed(&self, word: &str) -> bool {
        self.prefixes.iter().any(|p| word.starts_with(p.as_str()))
    }

    /// All prefixes matching the start of the word.
    pub fn prefixes<'a>(&'a self, word: &str) -> Vec<&'a str> {
        self.prefixes
            .iter()
            .filter(|p| word.starts_with(p.as_str()))
            .map(String::as_str)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Conditional probabilities
// ---------------------------------------------------------------------------

/// Scale factor for probabilities stored as integers.
pub const PROB_MULTIPLIER: i64 = 1_000_000;

/// P(tag | word) table. Probabilities are stored as integers scaled by
/// [`PROB_MULTIPLIER`] to survive serialization exactly.
#[derive(Debug, Default)]
pub struct ConditionalProbDist {
    data: HashMap<String, i64>,
}

impl ConditionalProbDist {
    /// Build from raw scaled values keyed by `"word:tag"`.
    pub fn new(data: HashMap<String, i64>) -> Self {
        ConditionalProbDist { data }
    }

    /// The stored probability for the (word, tag) pair; 0.0 if absent.
    pub fn prob(&self, word: &str, tag: &str) -> f64 {
        let key = format!("{word}:{tag}");
        self.data
            .get(&key)
            .map(|&v| v as f64 / PROB_MULTIPLIER as f64)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs() -> CharSubstitutes {
        [('ё', 'е')].into_iter().collect()
    }

    #[test]
    fn test_similar_items_original_first() {
        let mut data = HashMap::new();
        data.insert("ёлка".to_string(), vec![1]);
        data.insert("елка".to_string(), vec![2]);
        let dawg = Dawg::new(data);

        let items = dawg.similar_items("ёлка", &subs());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].0, "ёлка");
        assert_eq!(items[1].0, "елка");
    }

    #[test]
    fn test_variant_count_bound() {
        // Two substitutable positions: at most 2^2 variants.
        let variants = generate_variants("ёжёж", &subs());
        assert_eq!(variants.len(), 4);
        assert_eq!(variants[0], "ёжёж");

        let variants = generate_variants("дом", &subs());
        assert_eq!(variants, vec!["дом".to_string()]);
    }

    #[test]
    fn test_prefix_matcher() {
        let m = PrefixMatcher::new(["не", "небез"]);
        assert!(m.is_prefixed("нехороший"));
        assert!(!m.is_prefixed("хороший"));
        assert_eq!(m.prefixes("небезопасный"), vec!["не", "небез"]);
    }

    #[test]
    fn test_conditional_prob() {
        let mut data = HashMap::new();
        data.insert("стали:VERB".to_string(), 750_000);
        let dist = ConditionalProbDist::new(data);
        assert!((dist.prob("стали", "VERB") - 0.75).abs() < 1e-9);
        assert_eq!(dist.prob("стали", "NOUN"), 0.0);
    }
}
