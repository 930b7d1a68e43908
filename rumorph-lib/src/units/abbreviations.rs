// Single-letter initials: generic, first-name and patronymic variants.

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::{Method, MethodKind, Parse, UnitId};
use crate::analyzer::MorphAnalyzer;
use crate::dict::Dictionary;
use crate::errors::Result;
use crate::tagset::{self, Tag};
use crate::units::{AnalyzerUnit, SeenParses, SeenTags, UnitGuard};

const DEFAULT_TAG_PATTERN: &str = "NOUN,anim,{gender},Sgtm,Fixd,Abbr,Init sing,{case}";
const GENDERS: &[&str] = &["masc", "femn"];
const CASES: &[&str] = &["nomn", "gent", "datv", "accs", "ablt", "loct"];

/// Accepts single capital letters and produces one candidate reading per
/// gender and case combination of the configured tag template.
#[derive(Debug, Clone)]
pub struct InitialsAnalyzer {
    letters: String,
    tag_pattern: String,
    score: f64,
    letter_set: HashSet<String>,
    tags: Vec<Tag>,
    id: UnitId,
}

impl InitialsAnalyzer {
    pub fn new(letters: &str, tag_pattern: &str, score: f64) -> Self {
        let pattern = if tag_pattern.is_empty() {
            DEFAULT_TAG_PATTERN
        } else {
            tag_pattern
        };
        InitialsAnalyzer {
            letters: letters.to_string(),
            tag_pattern: pattern.to_string(),
            score,
            letter_set: HashSet::new(),
            tags: Vec::new(),
            id: UnitId::default(),
        }
    }

    /// An analyzer for plain initials with the default template.
    pub fn with_letters(letters: &str) -> Self {
        Self::new(letters, "", 0.9)
    }

    fn tags(&self) -> &[Tag] {
        &self.tags
    }
}

impl AnalyzerUnit for InitialsAnalyzer {
    fn init(&mut self, _dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        tagset::add_grammeme_to_known("Init", "иниц", false);
        self.letter_set = self.letters.chars().map(String::from).collect();
        self.tags.clear();
        for gender in GENDERS {
            for case in CASES {
                let text = self
                    .tag_pattern
                    .replace("{gender}", gender)
                    .replace("{case}", case);
                self.tags.push(Tag::new(&text)?);
            }
        }
        self.id = id;
        Ok(())
    }

    fn parse(
        &self,
        _morph: &MorphAnalyzer,
        _guard: UnitGuard,
        word: &str,
        word_lower: &str,
        _seen: &mut SeenParses,
    ) -> Vec<Parse> {
        if !self.letter_set.contains(word) {
            return Vec::new();
        }
        let method = Method::new(self.id, MethodKind::Simple);
        self.tags
            .iter()
            .map(|tag| {
                Parse::new(
                    word_lower,
                    tag.clone(),
                    word_lower,
                    self.score,
                    vec![method.clone()],
                )
            })
            .collect()
    }

    fn tag(
        &self,
        _morph: &MorphAnalyzer,
        _guard: UnitGuard,
        word: &str,
        _word_lower: &str,
        _seen: &mut SeenTags,
    ) -> Vec<Tag> {
        if !self.letter_set.contains(word) {
            return Vec::new();
        }
        self.tags.clone()
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}

/// First-name initials (`И.` in `И. Иванов`): the lexeme keeps the gender of
/// the current reading, the normal form is its nominative.
#[derive(Debug, Clone)]
pub struct AbbreviatedFirstNameAnalyzer {
    inner: InitialsAnalyzer,
    tags_masc: Vec<Tag>,
    tags_femn: Vec<Tag>,
}

impl AbbreviatedFirstNameAnalyzer {
    pub fn new(letters: &str) -> Self {
        AbbreviatedFirstNameAnalyzer {
            inner: InitialsAnalyzer::new(
                letters,
                "NOUN,anim,{gender},Sgtm,Name,Fixd,Abbr,Init sing,{case}",
                0.1,
            ),
            tags_masc: Vec::new(),
            tags_femn: Vec::new(),
        }
    }

    fn gender_tags(&self, tag: &Tag) -> &[Tag] {
        if tag.has("masc") {
            &self.tags_masc
        } else {
            &self.tags_femn
        }
    }
}

impl AnalyzerUnit for AbbreviatedFirstNameAnalyzer {
    fn init(&mut self, dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        self.inner.init(dict, id)?;
        self.tags_masc.clear();
        self.tags_femn.clear();
        for tag in self.inner.tags() {
            if tag.has("masc") {
                self.tags_masc.push(tag.clone());
            } else {
                self.tags_femn.push(tag.clone());
            }
        }
        Ok(())
    }

    fn parse(
        &self,
        morph: &MorphAnalyzer,
        guard: UnitGuard,
        word: &str,
        word_lower: &str,
        seen: &mut SeenParses,
    ) -> Vec<Parse> {
        self.inner.parse(morph, guard, word, word_lower, seen)
    }

    fn tag(
        &self,
        morph: &MorphAnalyzer,
        guard: UnitGuard,
        word: &str,
        word_lower: &str,
        seen: &mut SeenTags,
    ) -> Vec<Tag> {
        self.inner.tag(morph, guard, word, word_lower, seen)
    }

    fn lexeme(&self, _morph: &MorphAnalyzer, parse: &Parse) -> Vec<Parse> {
        self.gender_tags(&parse.tag)
            .iter()
            .map(|tag| {
                Parse::new(
                    parse.word.clone(),
                    tag.clone(),
                    parse.normal_form.clone(),
                    parse.score,
                    parse.methods_stack.clone(),
                )
            })
            .collect()
    }

    fn normalized(&self, _morph: &MorphAnalyzer, parse: &Parse) -> Parse {
        match self.gender_tags(&parse.tag).first() {
            Some(tag) => Parse::new(
                parse.word.clone(),
                tag.clone(),
                parse.normal_form.clone(),
                parse.score,
                parse.methods_stack.clone(),
            ),
            None => parse.clone(),
        }
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}

/// Patronymic initials (`И.` in `Иванов И. И.`): the lexeme spans both
/// genders, the normal form is the first template tag.
#[derive(Debug, Clone)]
pub struct AbbreviatedPatronymicAnalyzer {
    inner: InitialsAnalyzer,
}

impl AbbreviatedPatronymicAnalyzer {
    pub fn new(letters: &str) -> Self {
        AbbreviatedPatronymicAnalyzer {
            inner: InitialsAnalyzer::new(
                letters,
                "NOUN,anim,{gender},Sgtm,Patr,Fixd,Abbr,Init sing,{case}",
                0.1,
            ),
        }
    }
}

impl AnalyzerUnit for AbbreviatedPatronymicAnalyzer {
    fn init(&mut self, dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        tagset::add_grammeme_to_known("Patr", "отч", false);
        self.inner.init(dict, id)
    }

    fn parse(
        &self,
        morph: &MorphAnalyzer,
        guard: UnitGuard,
        word: &str,
        word_lower: &str,
        seen: &mut SeenParses,
    ) -> Vec<Parse> {
        self.inner.parse(morph, guard, word, word_lower, seen)
    }

    fn tag(
        &self,
        morph: &MorphAnalyzer,
        guard: UnitGuard,
        word: &str,
        word_lower: &str,
        seen: &mut SeenTags,
    ) -> Vec<Tag> {
        self.inner.tag(morph, guard, word, word_lower, seen)
    }

    fn lexeme(&self, _morph: &MorphAnalyzer, parse: &Parse) -> Vec<Parse> {
        self.inner
            .tags()
            .iter()
            .map(|tag| {
                Parse::new(
                    parse.word.clone(),
                    tag.clone(),
                    parse.normal_form.clone(),
                    parse.score,
                    parse.methods_stack.clone(),
                )
            })
            .collect()
    }

    fn normalized(&self, _morph: &MorphAnalyzer, parse: &Parse) -> Parse {
        match self.inner.tags().first() {
            Some(tag) => Parse::new(
                parse.word.clone(),
                tag.clone(),
                parse.normal_form.clone(),
                parse.score,
                parse.methods_stack.clone(),
            ),
            None => parse.clone(),
        }
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}
