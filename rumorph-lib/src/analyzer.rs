// The analyzer driver: owns the ordered unit chain, runs a Parse/Tag call
// over it with shared deduplication state, and implements the inflection
// operations on top of lexeme replay.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::analysis::{Parse, UnitId};
use crate::dawg::CharSubstitutes;
use crate::dict::Dictionary;
use crate::errors::{MorphError, Result};
use crate::lang;
use crate::probability::ProbabilityEstimator;
use crate::tagset::{self, Tag};
use crate::units::{AnalyzerUnit, SeenParses, SeenTags, UnitGuard};

/// Maximum number of units the re-entry guard bitset can track.
const MAX_UNITS: usize = 64;

// ---------------------------------------------------------------------------
// Unit configuration
// ---------------------------------------------------------------------------

/// Ordered unit configuration. An entry is either a single unit (terminal by
/// itself) or a group of units whose last member is terminal: once a
/// terminal unit has run and the accumulated result is non-empty, the chain
/// stops.
#[derive(Default)]
pub struct UnitsConfig {
    groups: Vec<Vec<Box<dyn AnalyzerUnit>>>,
}

impl UnitsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single terminal unit.
    pub fn unit(mut self, unit: impl AnalyzerUnit + 'static) -> Self {
        self.groups.push(vec![Box::new(unit)]);
        self
    }

    /// Append a group of units; only the last member is terminal.
    pub fn group(mut self, units: Vec<Box<dyn AnalyzerUnit>>) -> Self {
        self.groups.push(units);
        self
    }

    fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }
}

struct UnitEntry {
    unit: Box<dyn AnalyzerUnit>,
    terminal: bool,
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Morphological analyzer: a dictionary plus an ordered chain of analyzer
/// units. Safe to share read-only across threads once constructed.
pub struct MorphAnalyzer {
    dict: Arc<Dictionary>,
    units: Vec<UnitEntry>,
    prob: Option<ProbabilityEstimator>,
    char_subs: CharSubstitutes,
}

impl MorphAnalyzer {
    /// Open a dictionary directory with the default Russian unit chain.
    pub fn open(path: impl AsRef<Path>) -> Result<MorphAnalyzer> {
        Self::with_units(path, &lang::ru::default_units())
    }

    /// Open a dictionary directory with a custom unit configuration. Each
    /// configured unit is cloned and initialized before registration, so the
    /// configuration can be reused.
    pub fn with_units(path: impl AsRef<Path>, config: &UnitsConfig) -> Result<MorphAnalyzer> {
        let total = config.len();
        if total > MAX_UNITS {
            return Err(MorphError::TooManyUnits(total));
        }
        let dict = Arc::new(Dictionary::load(path.as_ref())?);
        let mut units = Vec::with_capacity(total);
        for group in &config.groups {
            for (i, prototype) in group.iter().enumerate() {
                let mut unit = prototype.clone_unit();
                unit.init(&dict, UnitId(units.len()))?;
                units.push(UnitEntry {
                    unit,
                    terminal: i == group.len() - 1,
                });
            }
        }
        let prob = ProbabilityEstimator::load(dict.path())?;
        info!(
            path = %path.as_ref().display(),
            units = units.len(),
            probabilities = prob.is_some(),
            "analyzer ready"
        );
        Ok(MorphAnalyzer {
            dict,
            units,
            prob,
            char_subs: lang::ru::char_substitutes(),
        })
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dict
    }

    /// The character substitution table used for approximate lookups.
    pub fn char_substitutes(&self) -> &CharSubstitutes {
        &self.char_subs
    }

    /// Whether the word is in the dictionary (directly or through character
    /// substitutions).
    pub fn word_is_known(&self, word: &str) -> bool {
        self.dict.word_is_known(&word.to_lowercase(), &self.char_subs)
    }

    /// Every plausible morphological interpretation of the word, rescored by
    /// the probability estimator when one is loaded.
    pub fn parse(&self, word: &str) -> Vec<Parse> {
        self.parse_guarded(word, UnitGuard::default())
    }

    pub(crate) fn parse_guarded(&self, word: &str, guard: UnitGuard) -> Vec<Parse> {
        let word_lower = word.to_lowercase();
        let mut seen = SeenParses::default();
        let mut res = Vec::new();
        for (i, entry) in self.units.iter().enumerate() {
            if guard.contains(UnitId(i)) {
                continue;
            }
            res.extend(entry.unit.parse(self, guard, word, &word_lower, &mut seen));
            if entry.terminal && !res.is_empty() {
                break;
            }
        }
        if let Some(prob) = &self.prob {
            prob.apply_to_parses(&word_lower, &mut res);
        }
        res
    }

    /// The distinct tags of the word, in unit order (reordered by the
    /// probability estimator when one is loaded).
    pub fn tag(&self, word: &str) -> Vec<Tag> {
        self.tag_guarded(word, UnitGuard::default())
    }

    pub(crate) fn tag_guarded(&self, word: &str, guard: UnitGuard) -> Vec<Tag> {
        let word_lower = word.to_lowercase();
        let mut seen = SeenTags::default();
        let mut res = Vec::new();
        for (i, entry) in self.units.iter().enumerate() {
            if guard.contains(UnitId(i)) {
                continue;
            }
            res.extend(entry.unit.tag(self, guard, word, &word_lower, &mut seen));
            if entry.terminal && !res.is_empty() {
                break;
            }
        }
        if let Some(prob) = &self.prob {
            prob.apply_to_tags(&word_lower, &mut res);
        }
        res
    }

    /// The ordered, duplicate-free normal forms of the word.
    pub fn normal_forms(&self, word: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut res = Vec::new();
        for p in self.parse(word) {
            if seen.insert(p.normal_form.clone()) {
                res.push(p.normal_form);
            }
        }
        res
    }

    /// The full inflectional paradigm around the parse, reconstructed by the
    /// unit that produced the top of its method stack.
    pub fn get_lexeme(&self, parse: &Parse) -> Vec<Parse> {
        match self.dispatch_unit(parse) {
            Some(unit) => unit.lexeme(self, parse),
            None => vec![parse.clone()],
        }
    }

    /// The normal-form parse, reconstructed the same way.
    pub fn normalized(&self, parse: &Parse) -> Parse {
        match self.dispatch_unit(parse) {
            Some(unit) => unit.normalized(self, parse),
            None => parse.clone(),
        }
    }

    fn dispatch_unit(&self, parse: &Parse) -> Option<&dyn AnalyzerUnit> {
        let method = parse.methods_stack.last()?;
        self.units
            .get(method.unit.index())
            .map(|entry| entry.unit.as_ref())
    }

    /// Inflect the parse so that its tag carries every grammeme in
    /// `required`. Rare case grammemes are downgraded to their common
    /// equivalents when nothing matches directly. `None` when the lexeme has
    /// no matching form.
    pub fn inflect(&self, parse: &Parse, required: &[String]) -> Option<Parse> {
        let lexeme = self.get_lexeme(parse);
        let mut required = required.to_vec();
        let mut matches: Vec<&Parse> = lexeme
            .iter()
            .filter(|f| contains_all(&f.tag, &required))
            .collect();
        if matches.is_empty() {
            required = tagset::fix_rare_cases(&required);
            matches = lexeme
                .iter()
                .filter(|f| contains_all(&f.tag, &required))
                .collect();
        }
        if matches.is_empty() {
            return None;
        }
        let target = parse.tag.updated_grammemes(&required).ok()?;
        let mut best = matches[0];
        let mut best_score = similarity(&target, best.tag.grammemes());
        for &candidate in &matches[1..] {
            let score = similarity(&target, candidate.tag.grammemes());
            if score > best_score {
                best = candidate;
                best_score = score;
            }
        }
        Some(best.clone())
    }

    /// Inflect the parse so that it agrees with the numeral `num`.
    pub fn make_agree_with_number(&self, parse: &Parse, num: i64) -> Option<Parse> {
        let grammemes = parse.tag.numeral_agreement_grammemes(num);
        self.inflect(parse, &grammemes)
    }

    /// Translate Cyrillic grammemes of a tag string to Latin.
    pub fn cyr2lat(&self, tag: &str) -> String {
        tagset::cyr2lat(tag)
    }

    /// Translate Latin grammemes of a tag string to Cyrillic.
    pub fn lat2cyr(&self, tag: &str) -> String {
        tagset::lat2cyr(tag)
    }
}

fn contains_all(tag: &Tag, grammemes: &[String]) -> bool {
    grammemes.iter().all(|g| tag.contains(g).unwrap_or(false))
}

/// `|a ∩ b| − 0.1·|a △ b|` over grammeme sets.
fn similarity(a: &[String], b: &[String]) -> f64 {
    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();
    let inter = set_a.intersection(&set_b).count();
    let symdiff = set_a.symmetric_difference(&set_b).count();
    inter as f64 - 0.1 * symdiff as f64
}
