// Analyzers for out-of-dictionary words that look like dictionary words:
// known lexical prefixes, arbitrary short prefixes, and suffix prediction.

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::{Method, MethodKind, Parse, UnitId};
use crate::analyzer::MorphAnalyzer;
use crate::dawg::PrefixMatcher;
use crate::dict::Dictionary;
use crate::errors::Result;
use crate::tagset::Tag;
use crate::units::{
    add_parse_if_not_seen, add_tag_if_not_seen, AnalyzerUnit, DictionaryAnalyzer, SeenParses,
    SeenTags, UnitGuard,
};

/// A split of a word into a (prefix, remainder) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Split {
    prefix: String,
    remainder: String,
}

/// All splits of `word` at character positions `1..=max_prefix_len` whose
/// remainder keeps at least `min_remainder` characters.
fn word_splits(word: &str, min_remainder: usize, max_prefix_len: usize) -> Vec<Split> {
    let chars: Vec<char> = word.chars().collect();
    let max_split = max_prefix_len.min(chars.len().saturating_sub(min_remainder));
    (1..=max_split)
        .map(|i| Split {
            prefix: chars[..i].iter().collect(),
            remainder: chars[i..].iter().collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Known prefixes
// ---------------------------------------------------------------------------

/// Parses words starting with a known lexical prefix (`не`, `псевдо`, …) by
/// recursively parsing the remainder through the whole driver chain.
#[derive(Debug, Clone)]
pub struct KnownPrefixAnalyzer {
    known_prefixes: Vec<String>,
    score_multiplier: f64,
    min_remainder: usize,
    matcher: PrefixMatcher,
    id: UnitId,
}

impl KnownPrefixAnalyzer {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KnownPrefixAnalyzer {
            known_prefixes: prefixes.into_iter().map(Into::into).collect(),
            score_multiplier: 0.75,
            min_remainder: 3,
            matcher: PrefixMatcher::default(),
            id: UnitId::default(),
        }
    }

    /// Possible (prefix, remainder) splits, longest prefix first.
    fn possible_splits(&self, word: &str) -> Vec<Split> {
        let mut prefixes = self.matcher.prefixes(word);
        prefixes.sort_by_key(|p| std::cmp::Reverse(p.chars().count()));
        let word_chars = word.chars().count();
        prefixes
            .into_iter()
            .filter(|p| word_chars - p.chars().count() >= self.min_remainder)
            .map(|p| Split {
                prefix: p.to_string(),
                remainder: word[p.len()..].to_string(),
            })
            .collect()
    }
}

impl AnalyzerUnit for KnownPrefixAnalyzer {
    fn init(&mut self, _dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        self.matcher = PrefixMatcher::new(self.known_prefixes.iter().cloned());
        self.id = id;
        Ok(())
    }

    fn parse(
        &self,
        morph: &MorphAnalyzer,
        guard: UnitGuard,
        _word: &str,
        word_lower: &str,
        seen: &mut SeenParses,
    ) -> Vec<Parse> {
        let mut res = Vec::new();
        for split in self.possible_splits(word_lower) {
            let sub_parses = morph.parse_guarded(&split.remainder, guard.with(self.id));
            for sub in sub_parses {
                let method = Method::new(
                    self.id,
                    MethodKind::PrefixAttached {
                        prefix: split.prefix.clone(),
                    },
                );
                let parse = Parse::new(
                    format!("{}{}", split.prefix, sub.word),
                    sub.tag.clone(),
                    format!("{}{}", split.prefix, sub.normal_form),
                    sub.score * self.score_multiplier,
                    sub.with_method(method).methods_stack,
                );
                add_parse_if_not_seen(parse, &mut res, seen);
            }
        }
        res
    }

    fn tag(
        &self,
        morph: &MorphAnalyzer,
        guard: UnitGuard,
        _word: &str,
        word_lower: &str,
        seen: &mut SeenTags,
    ) -> Vec<Tag> {
        let mut res = Vec::new();
        for split in self.possible_splits(word_lower) {
            for tag in morph.tag_guarded(&split.remainder, guard.with(self.id)) {
                add_tag_if_not_seen(tag, &mut res, seen);
            }
        }
        res
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}

// ---------------------------------------------------------------------------
// Unknown prefixes
// ---------------------------------------------------------------------------

/// Parses words by stripping an arbitrary short prefix and looking the
/// remainder up in the dictionary (only — no full driver recursion).
#[derive(Debug, Clone)]
pub struct UnknownPrefixAnalyzer {
    score_multiplier: f64,
    min_remainder: usize,
    dict_analyzer: DictionaryAnalyzer,
    id: UnitId,
}

impl UnknownPrefixAnalyzer {
    pub fn new() -> Self {
        UnknownPrefixAnalyzer {
            score_multiplier: 0.5,
            min_remainder: 3,
            dict_analyzer: DictionaryAnalyzer::new(),
            id: UnitId::default(),
        }
    }
}

impl Default for UnknownPrefixAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerUnit for UnknownPrefixAnalyzer {
    fn init(&mut self, dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        self.dict_analyzer.init(dict, id)?;
        self.id = id;
        Ok(())
    }

    fn parse(
        &self,
        morph: &MorphAnalyzer,
        guard: UnitGuard,
        _word: &str,
        word_lower: &str,
        seen: &mut SeenParses,
    ) -> Vec<Parse> {
        let mut res = Vec::new();
        let max_prefix = word_lower.chars().count().saturating_sub(1);
        for split in word_splits(word_lower, self.min_remainder, max_prefix) {
            let sub_parses =
                self.dict_analyzer
                    .parse(morph, guard, &split.remainder, &split.remainder, seen);
            for sub in sub_parses {
                let method = Method::new(
                    self.id,
                    MethodKind::PrefixAttached {
                        prefix: split.prefix.clone(),
                    },
                );
                let parse = Parse::new(
                    format!("{}{}", split.prefix, sub.word),
                    sub.tag.clone(),
                    format!("{}{}", split.prefix, sub.normal_form),
                    sub.score * self.score_multiplier,
                    sub.with_method(method).methods_stack,
                );
                add_parse_if_not_seen(parse, &mut res, seen);
            }
        }
        res
    }

    fn tag(
        &self,
        morph: &MorphAnalyzer,
        guard: UnitGuard,
        _word: &str,
        word_lower: &str,
        seen: &mut SeenTags,
    ) -> Vec<Tag> {
        let mut res = Vec::new();
        let max_prefix = word_lower.chars().count().saturating_sub(1);
        for split in word_splits(word_lower, self.min_remainder, max_prefix) {
            let tags = self
                .dict_analyzer
                .tag(morph, guard, &split.remainder, &split.remainder, seen);
            for tag in tags {
                add_tag_if_not_seen(tag, &mut res, seen);
            }
        }
        res
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}

// ---------------------------------------------------------------------------
// Suffix prediction
// ---------------------------------------------------------------------------

/// Predicts readings of out-of-dictionary words from their endings, using
/// the prediction-suffix tables built alongside the dictionary. Restricted
/// to productive parts of speech.
#[derive(Debug, Clone)]
pub struct KnownSuffixAnalyzer {
    score_multiplier: f64,
    min_word_length: usize,
    /// (paradigm prefix id, prefix), iterated longest-table-first (reverse
    /// of the stored order).
    paradigm_prefixes: Vec<(usize, String)>,
    /// Suffix lengths to try, longest first.
    prediction_splits: Vec<usize>,
    dict: Option<Arc<Dictionary>>,
    id: UnitId,
}

struct Candidate {
    count: u16,
    word: String,
    tag: Tag,
    normal_form: String,
    prefix_id: usize,
    stack: Vec<Method>,
}

impl KnownSuffixAnalyzer {
    pub fn new() -> Self {
        KnownSuffixAnalyzer {
            score_multiplier: 0.5,
            min_word_length: 4,
            paradigm_prefixes: Vec::new(),
            prediction_splits: Vec::new(),
            dict: None,
            id: UnitId::default(),
        }
    }
}

impl Default for KnownSuffixAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerUnit for KnownSuffixAnalyzer {
    fn init(&mut self, dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        self.paradigm_prefixes = dict
            .paradigm_prefixes()
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.clone()))
            .rev()
            .collect();
        let max_len = match dict.meta().max_suffix_length() {
            0 => 5,
            n => n,
        };
        self.prediction_splits = (1..=max_len).rev().collect();
        self.dict = Some(Arc::clone(dict));
        self.id = id;
        Ok(())
    }

    fn parse(
        &self,
        morph: &MorphAnalyzer,
        _guard: UnitGuard,
        word: &str,
        word_lower: &str,
        seen: &mut SeenParses,
    ) -> Vec<Parse> {
        if word.chars().count() < self.min_word_length {
            return Vec::new();
        }
        let Some(dict) = &self.dict else {
            return Vec::new();
        };
        let subs = morph.char_substitutes();
        let chars: Vec<char> = word_lower.chars().collect();

        let mut total_counts: Vec<u32> = vec![1; dict.paradigm_prefixes().len()];
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut seen_candidates: HashSet<(String, String, u16)> = HashSet::new();

        for (prefix_id, paradigm_prefix) in &self.paradigm_prefixes {
            if !word_lower.starts_with(paradigm_prefix.as_str()) {
                continue;
            }
            let Some(suffix_dawg) = dict.prediction_suffixes().get(*prefix_id) else {
                continue;
            };
            for &split in &self.prediction_splits {
                if split > chars.len() {
                    continue;
                }
                let word_start: String = chars[..chars.len() - split].iter().collect();
                let word_end: String = chars[chars.len() - split..].iter().collect();
                for (suffix, records) in suffix_dawg.similar_items(&word_end, subs) {
                    let fixed_word = format!("{word_start}{suffix}");
                    for rec in records {
                        let Some(tag) = dict.build_tag_info(rec.paradigm_id, rec.form_index)
                        else {
                            continue;
                        };
                        if !tag.is_productive() {
                            continue;
                        }
                        total_counts[*prefix_id] += u32::from(rec.count);
                        let key = (fixed_word.clone(), tag.as_str().to_string(), rec.paradigm_id);
                        if !seen_candidates.insert(key) {
                            continue;
                        }
                        let normal_form =
                            dict.build_normal_form(rec.paradigm_id, rec.form_index, &fixed_word);
                        let stack = vec![
                            Method::new(
                                self.id,
                                MethodKind::DictionaryHit {
                                    word: fixed_word.clone(),
                                    paradigm_id: rec.paradigm_id,
                                    form_index: rec.form_index,
                                },
                            ),
                            Method::new(
                                self.id,
                                MethodKind::SuffixPredicted {
                                    suffix: suffix.clone(),
                                },
                            ),
                        ];
                        candidates.push(Candidate {
                            count: rec.count,
                            word: fixed_word.clone(),
                            tag,
                            normal_form,
                            prefix_id: *prefix_id,
                            stack,
                        });
                    }
                }
                // Stop at the longest split that produced productive matches.
                if total_counts[*prefix_id] > 1 {
                    break;
                }
            }
        }

        let mut res = Vec::new();
        for c in candidates {
            let score =
                f64::from(u32::from(c.count)) / f64::from(total_counts[c.prefix_id]) * self.score_multiplier;
            let parse = Parse::new(c.word, c.tag, c.normal_form, score, c.stack);
            add_parse_if_not_seen(parse, &mut res, seen);
        }
        res.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        res
    }

    fn tag(
        &self,
        morph: &MorphAnalyzer,
        _guard: UnitGuard,
        word: &str,
        word_lower: &str,
        seen: &mut SeenTags,
    ) -> Vec<Tag> {
        if word.chars().count() < self.min_word_length {
            return Vec::new();
        }
        let Some(dict) = &self.dict else {
            return Vec::new();
        };
        let subs = morph.char_substitutes();
        let chars: Vec<char> = word_lower.chars().collect();

        let mut counted: Vec<(u16, Tag)> = Vec::new();
        for (prefix_id, paradigm_prefix) in &self.paradigm_prefixes {
            if !word_lower.starts_with(paradigm_prefix.as_str()) {
                continue;
            }
            let Some(suffix_dawg) = dict.prediction_suffixes().get(*prefix_id) else {
                continue;
            };
            for &split in &self.prediction_splits {
                if split > chars.len() {
                    continue;
                }
                let word_end: String = chars[chars.len() - split..].iter().collect();
                let mut found = false;
                for (_, records) in suffix_dawg.similar_items(&word_end, subs) {
                    for rec in records {
                        let Some(tag) = dict.build_tag_info(rec.paradigm_id, rec.form_index)
                        else {
                            continue;
                        };
                        if !tag.is_productive() {
                            continue;
                        }
                        found = true;
                        if seen.insert(&tag) {
                            counted.push((rec.count, tag));
                        }
                    }
                }
                if found {
                    break;
                }
            }
        }
        counted.sort_by(|a, b| b.0.cmp(&a.0));
        counted.into_iter().map(|(_, tag)| tag).collect()
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}
