// Analyzer units: the common contract plus the shared deduplication state
// threaded through a single Parse call.

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::{Parse, UnitId};
use crate::analyzer::MorphAnalyzer;
use crate::dict::Dictionary;
use crate::errors::Result;
use crate::tagset::Tag;

pub mod abbreviations;
pub mod analogy;
pub mod dictionary;
pub mod hyphen;
pub mod shape;
pub mod unknown;

pub use abbreviations::{
    AbbreviatedFirstNameAnalyzer, AbbreviatedPatronymicAnalyzer, InitialsAnalyzer,
};
pub use analogy::{KnownPrefixAnalyzer, KnownSuffixAnalyzer, UnknownPrefixAnalyzer};
pub use dictionary::DictionaryAnalyzer;
pub use hyphen::{HyphenAdverbAnalyzer, HyphenSeparatedParticleAnalyzer, HyphenatedWordsAnalyzer};
pub use shape::{LatinAnalyzer, NumberAnalyzer, PunctuationAnalyzer, RomanNumberAnalyzer};
pub use unknown::UnknownAnalyzer;

// ---------------------------------------------------------------------------
// Re-entry guard
// ---------------------------------------------------------------------------

/// Bitset of compositional units active on the current recursive call chain.
/// The driver skips a unit whose id is in the guard, which forbids a unit
/// from re-entering itself on a sub-word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitGuard(u64);

impl UnitGuard {
    pub fn contains(self, id: UnitId) -> bool {
        self.0 & (1u64 << id.index()) != 0
    }

    #[must_use]
    pub fn with(self, id: UnitId) -> UnitGuard {
        UnitGuard(self.0 | (1u64 << id.index()))
    }
}

// ---------------------------------------------------------------------------
// Deduplication state
// ---------------------------------------------------------------------------

/// Parses already emitted during the current Parse call, keyed by
/// (word, tag text, paradigm id). Parses without a dictionary hit at the
/// bottom of their stack use -1 as the paradigm id.
#[derive(Debug, Default)]
pub struct SeenParses(HashSet<(String, String, i64)>);

impl SeenParses {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn key(parse: &Parse) -> (String, String, i64) {
        let paradigm_id = parse.paradigm_id().map(i64::from).unwrap_or(-1);
        (
            parse.word.clone(),
            parse.tag.as_str().to_string(),
            paradigm_id,
        )
    }
}

/// Tag texts already emitted during the current Tag call.
#[derive(Debug, Default)]
pub struct SeenTags(HashSet<String>);

impl SeenTags {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn insert(&mut self, tag: &Tag) -> bool {
        self.0.insert(tag.as_str().to_string())
    }
}

/// Append the parse to `out` unless an equivalent one was already seen.
pub fn add_parse_if_not_seen(parse: Parse, out: &mut Vec<Parse>, seen: &mut SeenParses) {
    if seen.0.insert(SeenParses::key(&parse)) {
        out.push(parse);
    }
}

/// Append the tag to `out` unless it was already seen.
pub fn add_tag_if_not_seen(tag: Tag, out: &mut Vec<Tag>, seen: &mut SeenTags) {
    if seen.insert(&tag) {
        out.push(tag);
    }
}

// ---------------------------------------------------------------------------
// Unit contract
// ---------------------------------------------------------------------------

/// A single analyzer unit. Units are owned by the driver; the driver passes
/// itself into every call so that compositional units can recursively parse
/// sub-words.
pub trait AnalyzerUnit: Send + Sync {
    /// Bind the unit to its dictionary and driver slot. Units that introduce
    /// synthetic grammemes register them here.
    fn init(&mut self, dict: &Arc<Dictionary>, id: UnitId) -> Result<()>;

    /// Produce parses for the word. Units must consult and update `seen`.
    fn parse(
        &self,
        morph: &MorphAnalyzer,
        guard: UnitGuard,
        word: &str,
        word_lower: &str,
        seen: &mut SeenParses,
    ) -> Vec<Parse>;

    /// Produce tags for the word. The default derives them from
    /// [`AnalyzerUnit::parse`] with a throwaway parse deduplication set.
    fn tag(
        &self,
        morph: &MorphAnalyzer,
        guard: UnitGuard,
        word: &str,
        word_lower: &str,
        seen: &mut SeenTags,
    ) -> Vec<Tag> {
        let mut seen_parses = SeenParses::default();
        let mut res = Vec::new();
        for parse in self.parse(morph, guard, word, word_lower, &mut seen_parses) {
            add_tag_if_not_seen(parse.tag, &mut res, seen);
        }
        res
    }

    /// Enumerate the full inflectional paradigm around the parse. Units that
    /// do not inflect return the parse itself.
    fn lexeme(&self, morph: &MorphAnalyzer, parse: &Parse) -> Vec<Parse> {
        let _ = morph;
        vec![parse.clone()]
    }

    /// The normal-form parse. Units that do not inflect return the parse
    /// unchanged.
    fn normalized(&self, morph: &MorphAnalyzer, parse: &Parse) -> Parse {
        let _ = morph;
        parse.clone()
    }

    /// An independent copy, used by the driver at registration.
    fn clone_unit(&self) -> Box<dyn AnalyzerUnit>;
}
