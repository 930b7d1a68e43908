// Shape-based analyzers: punctuation, Latin words, numbers and Roman
// numerals. Each emits a single fixed-tag parse and does not inflect.

use std::sync::Arc;

use crate::analysis::{Method, MethodKind, Parse, UnitId};
use crate::analyzer::MorphAnalyzer;
use crate::dict::Dictionary;
use crate::errors::Result;
use crate::shapes;
use crate::tagset::{self, Tag};
use crate::units::{AnalyzerUnit, SeenParses, SeenTags, UnitGuard};

const SHAPE_SCORE: f64 = 0.9;

fn shape_parse(id: UnitId, tag: &Tag, word_lower: &str, score: f64) -> Vec<Parse> {
    let method = Method::new(id, MethodKind::Simple);
    vec![Parse::new(
        word_lower,
        tag.clone(),
        word_lower,
        score,
        vec![method],
    )]
}

/// Tags punctuation tokens as `PNCT`.
#[derive(Debug, Clone, Default)]
pub struct PunctuationAnalyzer {
    tag: Option<Tag>,
    id: UnitId,
}

impl PunctuationAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnalyzerUnit for PunctuationAnalyzer {
    fn init(&mut self, _dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        tagset::add_grammeme_to_known("PNCT", "ЗПР", false);
        self.tag = Some(Tag::new("PNCT")?);
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
        match &self.tag {
            Some(tag) if shapes::is_punctuation(word) => {
                shape_parse(self.id, tag, word_lower, SHAPE_SCORE)
            }
            _ => Vec::new(),
        }
    }

    fn tag(
        &self,
        _morph: &MorphAnalyzer,
        _guard: UnitGuard,
        word: &str,
        _word_lower: &str,
        _seen: &mut SeenTags,
    ) -> Vec<Tag> {
        match &self.tag {
            Some(tag) if shapes::is_punctuation(word) => vec![tag.clone()],
            _ => Vec::new(),
        }
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}

/// Tags words written in the Latin script as `LATN`.
#[derive(Debug, Clone, Default)]
pub struct LatinAnalyzer {
    tag: Option<Tag>,
    id: UnitId,
}

impl LatinAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnalyzerUnit for LatinAnalyzer {
    fn init(&mut self, _dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        tagset::add_grammeme_to_known("LATN", "ЛАТ", false);
        self.tag = Some(Tag::new("LATN")?);
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
        match &self.tag {
            Some(tag) if shapes::is_latin(word) => {
                shape_parse(self.id, tag, word_lower, SHAPE_SCORE)
            }
            _ => Vec::new(),
        }
    }

    fn tag(
        &self,
        _morph: &MorphAnalyzer,
        _guard: UnitGuard,
        word: &str,
        _word_lower: &str,
        _seen: &mut SeenTags,
    ) -> Vec<Tag> {
        match &self.tag {
            Some(tag) if shapes::is_latin(word) => vec![tag.clone()],
            _ => Vec::new(),
        }
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}

/// Tags integer tokens as `NUMB,intg` and decimal ones as `NUMB,real`.
#[derive(Debug, Clone, Default)]
pub struct NumberAnalyzer {
    tag_intg: Option<Tag>,
    tag_real: Option<Tag>,
    id: UnitId,
}

impl NumberAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    fn shape_tag(&self, word: &str) -> Option<&Tag> {
        if word.parse::<i64>().is_ok() {
            return self.tag_intg.as_ref();
        }
        if word.replacen(',', ".", 1).parse::<f64>().is_ok() {
            return self.tag_real.as_ref();
        }
        None
    }
}

impl AnalyzerUnit for NumberAnalyzer {
    fn init(&mut self, _dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        for (lat, cyr) in [("NUMB", "ЧИСЛО"), ("intg", "цел"), ("real", "вещ")] {
            tagset::add_grammeme_to_known(lat, cyr, false);
        }
        self.tag_intg = Some(Tag::new("NUMB,intg")?);
        self.tag_real = Some(Tag::new("NUMB,real")?);
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
        match self.shape_tag(word) {
            Some(tag) => shape_parse(self.id, tag, word_lower, SHAPE_SCORE),
            None => Vec::new(),
        }
    }

    fn tag(
        &self,
        _morph: &MorphAnalyzer,
        _guard: UnitGuard,
        word: &str,
        _word_lower: &str,
        _seen: &mut SeenTags,
    ) -> Vec<Tag> {
        self.shape_tag(word).cloned().into_iter().collect()
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}

/// Tags Roman numerals as `ROMN`.
#[derive(Debug, Clone, Default)]
pub struct RomanNumberAnalyzer {
    tag: Option<Tag>,
    id: UnitId,
}

impl RomanNumberAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnalyzerUnit for RomanNumberAnalyzer {
    fn init(&mut self, _dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        tagset::add_grammeme_to_known("ROMN", "РИМ", false);
        self.tag = Some(Tag::new("ROMN")?);
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
        match &self.tag {
            Some(tag) if shapes::is_roman_number(word) => {
                shape_parse(self.id, tag, word_lower, SHAPE_SCORE)
            }
            _ => Vec::new(),
        }
    }

    fn tag(
        &self,
        _morph: &MorphAnalyzer,
        _guard: UnitGuard,
        word: &str,
        _word_lower: &str,
        _seen: &mut SeenTags,
    ) -> Vec<Tag> {
        match &self.tag {
            Some(tag) if shapes::is_roman_number(word) => vec![tag.clone()],
            _ => Vec::new(),
        }
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}
