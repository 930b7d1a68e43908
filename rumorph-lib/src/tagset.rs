// OpenCorpora tagset: grammemes, the process-wide grammeme registry, and the
// immutable Tag type with its category accessors.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, LazyLock, RwLock};

use serde::{Serialize, Serializer};

use crate::errors::{MorphError, Result};

// ---------------------------------------------------------------------------
// Grammeme categories
// ---------------------------------------------------------------------------

pub const PARTS_OF_SPEECH: &[&str] = &[
    "NOUN", "ADJF", "ADJS", "COMP", "VERB", "INFN", "PRTF", "PRTS", "GRND", "NUMR", "ADVB",
    "NPRO", "PRED", "PREP", "CONJ", "PRCL", "INTJ",
];
pub const ANIMACY: &[&str] = &["anim", "inan"];
pub const GENDERS: &[&str] = &["masc", "femn", "neut"];
pub const NUMBERS: &[&str] = &["sing", "plur"];
pub const CASES: &[&str] = &[
    "nomn", "gent", "datv", "accs", "ablt", "loct", "voct", "gen1", "gen2", "acc2", "loc1",
    "loc2",
];
pub const ASPECTS: &[&str] = &["perf", "impf"];
pub const TRANSITIVITY: &[&str] = &["tran", "intr"];
pub const PERSONS: &[&str] = &["1per", "2per", "3per"];
pub const TENSES: &[&str] = &["pres", "past", "futr"];
pub const MOODS: &[&str] = &["indc", "impr"];
pub const VOICES: &[&str] = &["actv", "pssv"];
pub const INVOLVEMENT: &[&str] = &["incl", "excl"];

/// Grammemes that mark a tag as belonging to a non-productive part of speech.
const NON_PRODUCTIVE_GRAMMEMES: &[&str] =
    &["NUMR", "NPRO", "PRED", "PREP", "CONJ", "PRCL", "INTJ", "Apro"];

/// All categories, in the order used when replacing grammemes in
/// [`Tag::updated_grammemes`]. A grammeme belongs to at most one category.
const CATEGORIES: &[&[&str]] = &[
    PARTS_OF_SPEECH,
    ANIMACY,
    GENDERS,
    NUMBERS,
    CASES,
    ASPECTS,
    TRANSITIVITY,
    PERSONS,
    TENSES,
    MOODS,
    VOICES,
    INVOLVEMENT,
];

fn category_of(grammeme: &str) -> Option<&'static [&'static str]> {
    CATEGORIES.iter().copied().find(|cat| cat.contains(&grammeme))
}

// ---------------------------------------------------------------------------
// Grammeme registry
// ---------------------------------------------------------------------------

struct Registry {
    known: HashSet<String>,
    lat_to_cyr: HashMap<String, String>,
    cyr_to_lat: HashMap<String, String>,
}

impl Registry {
    fn with_builtin() -> Self {
        let mut reg = Registry {
            known: HashSet::new(),
            lat_to_cyr: HashMap::new(),
            cyr_to_lat: HashMap::new(),
        };
        for cat in CATEGORIES {
            for g in *cat {
                reg.add(g, g, true);
            }
        }
        reg
    }

    fn add(&mut self, lat: &str, cyr: &str, overwrite: bool) {
        if !overwrite && self.known.contains(lat) {
            return;
        }
        self.known.insert(lat.to_string());
        self.lat_to_cyr.insert(lat.to_string(), cyr.to_string());
        self.cyr_to_lat.insert(cyr.to_string(), lat.to_string());
    }
}

static REGISTRY: LazyLock<RwLock<Registry>> = LazyLock::new(|| RwLock::new(Registry::with_builtin()));

/// Register a grammeme, with its Cyrillic counterpart for transliteration.
///
/// Registration happens at dictionary load time and during analyzer unit
/// initialization; the registry is effectively frozen afterwards.
pub fn add_grammeme_to_known(lat: &str, cyr: &str, overwrite: bool) {
    REGISTRY
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .add(lat, cyr, overwrite);
}

/// Whether the grammeme has been registered.
pub fn grammeme_is_known(grammeme: &str) -> bool {
    REGISTRY
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .known
        .contains(grammeme)
}

fn translate_tag(tag: &str, pick: impl Fn(&Registry, &str) -> Option<String>) -> String {
    let reg = REGISTRY
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    tag.split_whitespace()
        .map(|part| {
            part.split(',')
                .map(|g| pick(&reg, g).unwrap_or_else(|| g.to_string()))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Translate every grammeme of a tag string into its Cyrillic counterpart,
/// preserving the comma/space grouping.
pub fn lat2cyr(tag: &str) -> String {
    translate_tag(tag, |reg, g| reg.lat_to_cyr.get(g).cloned())
}

/// Translate every Cyrillic grammeme of a tag string back to Latin.
pub fn cyr2lat(tag: &str) -> String {
    translate_tag(tag, |reg, g| reg.cyr_to_lat.get(g).cloned())
}

// ---------------------------------------------------------------------------
// Rare case normalization
// ---------------------------------------------------------------------------

const RARE_CASES: &[(&str, &str)] = &[
    ("gen1", "gent"),
    ("gen2", "gent"),
    ("acc1", "accs"),
    ("acc2", "accs"),
    ("loc1", "loct"),
    ("loc2", "loct"),
    ("voct", "nomn"),
];

/// Replace rare case grammemes with their common equivalents. The result is
/// deduplicated and sorted.
pub fn fix_rare_cases(grammemes: &[String]) -> Vec<String> {
    let mut set: HashSet<String> = HashSet::with_capacity(grammemes.len());
    for g in grammemes {
        let fixed = RARE_CASES
            .iter()
            .find(|(rare, _)| *rare == g.as_str())
            .map(|(_, common)| common.to_string())
            .unwrap_or_else(|| g.clone());
        set.insert(fixed);
    }
    let mut res: Vec<String> = set.into_iter().collect();
    res.sort();
    res
}

// ---------------------------------------------------------------------------
// Tag
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct TagInner {
    text: String,
    grammemes: Vec<String>,
    set: HashSet<String>,
}

/// An immutable OpenCorpora grammatical tag: the original text form plus the
/// ordered sequence of grammemes it contains.
///
/// Every grammeme is validated against the registry at construction time.
/// Cloning is cheap (the payload is shared).
#[derive(Debug, Clone)]
pub struct Tag(Arc<TagInner>);

impl Tag {
    /// Parse a tag string. Commas and spaces both separate grammemes; empty
    /// tokens are discarded. Fails if any grammeme is unknown.
    pub fn new(text: &str) -> Result<Tag> {
        let grammemes = parse_tag(text);
        for g in &grammemes {
            if !grammeme_is_known(g) {
                return Err(MorphError::UnknownGrammeme(g.clone()));
            }
        }
        let set = grammemes.iter().cloned().collect();
        Ok(Tag(Arc::new(TagInner {
            text: text.to_string(),
            grammemes,
            set,
        })))
    }

    /// The original textual form of the tag.
    pub fn as_str(&self) -> &str {
        &self.0.text
    }

    /// The grammemes of the tag, in original order.
    pub fn grammemes(&self) -> &[String] {
        &self.0.grammemes
    }

    /// O(1) containment check without a registry lookup.
    pub(crate) fn has(&self, grammeme: &str) -> bool {
        self.0.set.contains(grammeme)
    }

    /// Whether the tag contains the grammeme. Unknown grammemes are reported
    /// as an error rather than silently absent.
    pub fn contains(&self, grammeme: &str) -> Result<bool> {
        if self.has(grammeme) {
            return Ok(true);
        }
        if !grammeme_is_known(grammeme) {
            return Err(MorphError::UnknownGrammeme(grammeme.to_string()));
        }
        Ok(false)
    }

    fn select(&self, category: &[&str]) -> Option<&str> {
        self.0
            .grammemes
            .iter()
            .map(|g| g.as_str())
            .find(|g| category.contains(g))
    }

    pub fn pos(&self) -> Option<&str> {
        self.select(PARTS_OF_SPEECH)
    }
    pub fn animacy(&self) -> Option<&str> {
        self.select(ANIMACY)
    }
    pub fn aspect(&self) -> Option<&str> {
        self.select(ASPECTS)
    }
    pub fn case(&self) -> Option<&str> {
        self.select(CASES)
    }
    pub fn gender(&self) -> Option<&str> {
        self.select(GENDERS)
    }
    pub fn involvement(&self) -> Option<&str> {
        self.select(INVOLVEMENT)
    }
    pub fn mood(&self) -> Option<&str> {
        self.select(MOODS)
    }
    pub fn number(&self) -> Option<&str> {
        self.select(NUMBERS)
    }
    pub fn person(&self) -> Option<&str> {
        self.select(PERSONS)
    }
    pub fn tense(&self) -> Option<&str> {
        self.select(TENSES)
    }
    pub fn transitivity(&self) -> Option<&str> {
        self.select(TRANSITIVITY)
    }
    pub fn voice(&self) -> Option<&str> {
        self.select(VOICES)
    }

    /// Whether the tag belongs to a productive part of speech. The suffix
    /// predictor skips non-productive candidates.
    pub fn is_productive(&self) -> bool {
        !NON_PRODUCTIVE_GRAMMEMES.iter().any(|g| self.has(g))
    }

    /// Return a new grammeme list in which every grammeme of `required` has
    /// replaced any prior grammeme from the same category. The result is
    /// sorted for reproducibility.
    pub fn updated_grammemes(&self, required: &[String]) -> Result<Vec<String>> {
        let mut set: HashSet<String> = self.0.set.clone();
        for g in required {
            if !grammeme_is_known(g) {
                return Err(MorphError::UnknownGrammeme(g.clone()));
            }
            if let Some(cat) = category_of(g) {
                for other in cat {
                    set.remove(*other);
                }
            }
            set.insert(g.clone());
        }
        let mut res: Vec<String> = set.into_iter().collect();
        res.sort();
        Ok(res)
    }

    /// Grammemes a word tagged with this tag must carry to agree with the
    /// numeral `num` (Russian agreement rule). Empty for parts of speech that
    /// do not agree with numerals.
    pub fn numeral_agreement_grammemes(&self, num: i64) -> Vec<String> {
        const ROWS: &[&[&str]] = &[
            &["sing", "nomn"],
            &["sing", "accs"],
            &["sing", "gent"],
            &["plur", "nomn"],
            &["plur", "gent"],
        ];
        let row = |i: usize| ROWS[i].iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let index = if num % 10 == 1 && num % 100 != 11 {
            0
        } else if (2..=4).contains(&(num % 10)) && !(10..20).contains(&(num % 100)) {
            1
        } else {
            2
        };

        let pos = match self.pos() {
            Some(p) if p == "NOUN" || p == "ADJF" || p == "PRTF" => p,
            _ => return Vec::new(),
        };
        let case = self.case();
        if pos == "NOUN" && !matches!(case, Some("nomn") | Some("accs") | None) {
            let case = case.unwrap_or_default().to_string();
            return if index == 0 {
                vec!["sing".to_string(), case]
            } else {
                vec!["plur".to_string(), case]
            };
        }
        if index == 0 {
            return if case == Some("nomn") || case.is_none() {
                row(0)
            } else {
                row(1)
            };
        }
        if pos == "NOUN" && index == 1 {
            return row(2);
        }
        if (pos == "ADJF" || pos == "PRTF") && self.gender() == Some("femn") && index == 1 {
            return row(3);
        }
        row(4)
    }
}

fn parse_tag(text: &str) -> Vec<String> {
    text.replace(' ', ",")
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.text)
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.0.text == other.0.text
    }
}

impl Eq for Tag {}

impl std::hash::Hash for Tag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.text.hash(state);
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parsing_and_accessors() {
        let tag = Tag::new("NOUN,anim,femn sing,nomn").unwrap();
        assert_eq!(tag.as_str(), "NOUN,anim,femn sing,nomn");
        assert_eq!(tag.pos(), Some("NOUN"));
        assert_eq!(tag.gender(), Some("femn"));
        assert_eq!(tag.number(), Some("sing"));
        assert_eq!(tag.case(), Some("nomn"));
        assert_eq!(tag.tense(), None);
        assert!(tag.contains("anim").unwrap());
        assert!(!tag.contains("plur").unwrap());
    }

    #[test]
    fn test_unknown_grammeme_rejected() {
        assert!(matches!(
            Tag::new("NOUN,bogus"),
            Err(MorphError::UnknownGrammeme(g)) if g == "bogus"
        ));
        let tag = Tag::new("NOUN").unwrap();
        assert!(tag.contains("bogus").is_err());
    }

    #[test]
    fn test_is_productive() {
        assert!(Tag::new("NOUN,anim,femn sing,nomn").unwrap().is_productive());
        assert!(!Tag::new("PREP").unwrap().is_productive());
        assert!(!Tag::new("NUMR,nomn").unwrap().is_productive());
    }

    #[test]
    fn test_updated_grammemes_replaces_category() {
        let tag = Tag::new("NOUN,anim,femn sing,nomn").unwrap();
        let updated = tag
            .updated_grammemes(&["plur".to_string(), "gent".to_string()])
            .unwrap();
        assert!(updated.contains(&"plur".to_string()));
        assert!(updated.contains(&"gent".to_string()));
        assert!(!updated.contains(&"sing".to_string()));
        assert!(!updated.contains(&"nomn".to_string()));
        assert!(updated.contains(&"femn".to_string()));
    }

    #[test]
    fn test_fix_rare_cases() {
        let fixed = fix_rare_cases(&["sing".to_string(), "loc2".to_string()]);
        assert_eq!(fixed, vec!["loct".to_string(), "sing".to_string()]);
        let fixed = fix_rare_cases(&["voct".to_string()]);
        assert_eq!(fixed, vec!["nomn".to_string()]);
    }

    #[test]
    fn test_numeral_agreement() {
        let noun = Tag::new("NOUN,anim,femn sing,nomn").unwrap();
        assert_eq!(noun.numeral_agreement_grammemes(1), vec!["sing", "nomn"]);
        assert_eq!(noun.numeral_agreement_grammemes(3), vec!["sing", "gent"]);
        assert_eq!(noun.numeral_agreement_grammemes(5), vec!["plur", "gent"]);
        assert_eq!(noun.numeral_agreement_grammemes(11), vec!["plur", "gent"]);
        assert_eq!(noun.numeral_agreement_grammemes(21), vec!["sing", "nomn"]);

        let noun_datv = Tag::new("NOUN,anim,femn sing,datv").unwrap();
        assert_eq!(noun_datv.numeral_agreement_grammemes(1), vec!["sing", "datv"]);
        assert_eq!(noun_datv.numeral_agreement_grammemes(2), vec!["plur", "datv"]);

        let adjf = Tag::new("ADJF femn,sing,nomn").unwrap();
        assert_eq!(adjf.numeral_agreement_grammemes(2), vec!["plur", "nomn"]);
        let adjm = Tag::new("ADJF masc,sing,nomn").unwrap();
        assert_eq!(adjm.numeral_agreement_grammemes(2), vec!["plur", "gent"]);

        // A tag without a case grammeme counts as nominative at index 0.
        let caseless = Tag::new("NOUN,anim,femn sing").unwrap();
        assert_eq!(caseless.numeral_agreement_grammemes(1), vec!["sing", "nomn"]);
        assert_eq!(caseless.numeral_agreement_grammemes(3), vec!["sing", "gent"]);
        assert_eq!(caseless.numeral_agreement_grammemes(5), vec!["plur", "gent"]);

        let prep = Tag::new("PREP").unwrap();
        assert!(prep.numeral_agreement_grammemes(2).is_empty());
    }

    #[test]
    fn test_transliteration_round_trip() {
        add_grammeme_to_known("TEST1", "ТЕСТ1", true);
        add_grammeme_to_known("TEST2", "ТЕСТ2", true);
        let tag = "TEST1,TEST2 TEST1";
        assert_eq!(lat2cyr(tag), "ТЕСТ1,ТЕСТ2 ТЕСТ1");
        assert_eq!(cyr2lat(&lat2cyr(tag)), tag);
    }
}
