// Last-resort fallback: tag the word as unknown.

use std::sync::Arc;

use crate::analysis::{Method, MethodKind, Parse, UnitId};
use crate::analyzer::MorphAnalyzer;
use crate::dict::Dictionary;
use crate::errors::Result;
use crate::tagset::{self, Tag};
use crate::units::{AnalyzerUnit, SeenParses, SeenTags, UnitGuard};

/// Emits a single `UNKN` parse, but only when no other unit produced
/// anything for the word. Configured as the terminal unit of the chain.
#[derive(Debug, Clone)]
pub struct UnknownAnalyzer {
    tag: Option<Tag>,
    score: f64,
    id: UnitId,
}

impl UnknownAnalyzer {
    pub fn new() -> Self {
        UnknownAnalyzer {
            tag: None,
            score: 1.0,
            id: UnitId::default(),
        }
    }
}

impl Default for UnknownAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerUnit for UnknownAnalyzer {
    fn init(&mut self, _dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        tagset::add_grammeme_to_known("UNKN", "НЕИЗВ", false);
        self.tag = Some(Tag::new("UNKN")?);
        self.id = id;
        Ok(())
    }

    fn parse(
        &self,
        _morph: &MorphAnalyzer,
        _guard: UnitGuard,
        _word: &str,
        word_lower: &str,
        seen: &mut SeenParses,
    ) -> Vec<Parse> {
        if !seen.is_empty() {
            return Vec::new();
        }
        let Some(tag) = &self.tag else {
            return Vec::new();
        };
        let method = Method::new(self.id, MethodKind::Simple);
        vec![Parse::new(
            word_lower,
            tag.clone(),
            word_lower,
            self.score,
            vec![method],
        )]
    }

    fn tag(
        &self,
        _morph: &MorphAnalyzer,
        _guard: UnitGuard,
        _word: &str,
        _word_lower: &str,
        seen: &mut SeenTags,
    ) -> Vec<Tag> {
        if !seen.is_empty() {
            return Vec::new();
        }
        self.tag.clone().into_iter().collect()
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}
