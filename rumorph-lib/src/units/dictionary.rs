// Dictionary lookup: the base analyzer every other unit builds on.

use std::sync::Arc;

use crate::analysis::{Method, MethodKind, Parse, UnitId};
use crate::analyzer::MorphAnalyzer;
use crate::dict::Dictionary;
use crate::errors::Result;
use crate::tagset::Tag;
use crate::units::{
    add_parse_if_not_seen, add_tag_if_not_seen, AnalyzerUnit, SeenParses, SeenTags, UnitGuard,
};

/// Analyzes words found in the dictionary index, including matches reached
/// through character substitutions (`ё ↔ е`).
#[derive(Debug, Clone, Default)]
pub struct DictionaryAnalyzer {
    dict: Option<Arc<Dictionary>>,
    id: UnitId,
}

impl DictionaryAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    fn hit(&self, word: &str, paradigm_id: u16, form_index: u16) -> Method {
        Method::new(
            self.id,
            MethodKind::DictionaryHit {
                word: word.to_string(),
                paradigm_id,
                form_index,
            },
        )
    }
}

impl AnalyzerUnit for DictionaryAnalyzer {
    fn init(&mut self, dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        self.dict = Some(Arc::clone(dict));
        self.id = id;
        Ok(())
    }

    fn parse(
        &self,
        morph: &MorphAnalyzer,
        _guard: UnitGuard,
        _word: &str,
        word_lower: &str,
        seen: &mut SeenParses,
    ) -> Vec<Parse> {
        let Some(dict) = &self.dict else {
            return Vec::new();
        };
        let mut res = Vec::new();
        for (matched, forms) in dict.words().similar_items(word_lower, morph.char_substitutes()) {
            for wf in forms {
                let Some(tag) = dict.build_tag_info(wf.paradigm_id, wf.form_index) else {
                    continue;
                };
                let normal = dict.build_normal_form(wf.paradigm_id, wf.form_index, &matched);
                let method = self.hit(&matched, wf.paradigm_id, wf.form_index);
                let parse = Parse::new(matched.clone(), tag, normal, 1.0, vec![method]);
                add_parse_if_not_seen(parse, &mut res, seen);
            }
        }
        res
    }

    fn tag(
        &self,
        morph: &MorphAnalyzer,
        _guard: UnitGuard,
        _word: &str,
        word_lower: &str,
        seen: &mut SeenTags,
    ) -> Vec<Tag> {
        let Some(dict) = &self.dict else {
            return Vec::new();
        };
        let mut res = Vec::new();
        for (_, forms) in dict.words().similar_items(word_lower, morph.char_substitutes()) {
            for wf in forms {
                let Some(tag) = dict.build_tag_info(wf.paradigm_id, wf.form_index) else {
                    continue;
                };
                add_tag_if_not_seen(tag, &mut res, seen);
            }
        }
        res
    }

    /// Rebuild the stem once from the recorded (paradigm, form), then emit
    /// one parse per paradigm row, swapping the bottom dictionary hit for
    /// the row's reference.
    fn lexeme(&self, _morph: &MorphAnalyzer, parse: &Parse) -> Vec<Parse> {
        let Some(dict) = &self.dict else {
            return vec![parse.clone()];
        };
        let Some((fixed_word, paradigm_id, form_index)) = bottom_hit(parse) else {
            return vec![parse.clone()];
        };
        let paradigm = dict.build_paradigm_info(paradigm_id);
        let Some(current) = paradigm.get(form_index as usize) else {
            return vec![parse.clone()];
        };
        let stem = fixed_word
            .strip_prefix(current.prefix.as_str())
            .unwrap_or(&fixed_word);
        let stem = stem.strip_suffix(current.suffix.as_str()).unwrap_or(stem);

        let mut res = Vec::with_capacity(paradigm.len());
        for (i, form) in paradigm.iter().enumerate() {
            let word = format!("{}{stem}{}", form.prefix, form.suffix);
            let mut stack = parse.methods_stack.clone();
            stack[0] = self.replaced_hit(&stack[0], &word, paradigm_id, i as u16);
            res.push(Parse::new(
                word,
                form.tag.clone(),
                parse.normal_form.clone(),
                1.0,
                stack,
            ));
        }
        res
    }

    fn normalized(&self, _morph: &MorphAnalyzer, parse: &Parse) -> Parse {
        let Some(dict) = &self.dict else {
            return parse.clone();
        };
        let Some((_, paradigm_id, form_index)) = bottom_hit(parse) else {
            return parse.clone();
        };
        if form_index == 0 {
            return parse.clone();
        }
        let Some(tag) = dict.build_tag_info(paradigm_id, 0) else {
            return parse.clone();
        };
        let normal = parse.normal_form.clone();
        let mut stack = parse.methods_stack.clone();
        stack[0] = self.replaced_hit(&stack[0], &normal, paradigm_id, 0);
        Parse::new(normal.clone(), tag, normal, 1.0, stack)
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}

impl DictionaryAnalyzer {
    /// A dictionary hit addressed to the same driver slot as `original`, so
    /// that rebuilt stacks keep dispatching to the unit that produced the
    /// source parse.
    fn replaced_hit(&self, original: &Method, word: &str, paradigm_id: u16, form_index: u16) -> Method {
        Method::new(
            original.unit,
            MethodKind::DictionaryHit {
                word: word.to_string(),
                paradigm_id,
                form_index,
            },
        )
    }
}

/// The bottom-of-stack dictionary hit of a parse, if present.
fn bottom_hit(parse: &Parse) -> Option<(String, u16, u16)> {
    match parse.methods_stack.first() {
        Some(Method {
            kind:
                MethodKind::DictionaryHit {
                    word,
                    paradigm_id,
                    form_index,
                },
            ..
        }) => Some((word.clone(), *paradigm_id, *form_index)),
        _ => None,
    }
}
