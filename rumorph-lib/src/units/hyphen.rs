// Analyzers for hyphenated words: trailing particles, `по-` adverbs, and
// words composed of two independent halves.

use std::sync::Arc;

use crate::analysis::{Method, MethodKind, Parse, UnitId};
use crate::analyzer::MorphAnalyzer;
use crate::dawg::PrefixMatcher;
use crate::dict::Dictionary;
use crate::errors::Result;
use crate::tagset::Tag;
use crate::units::{
    add_parse_if_not_seen, add_tag_if_not_seen, AnalyzerUnit, SeenParses, SeenTags, UnitGuard,
};

// ---------------------------------------------------------------------------
// Hyphen-separated particles
// ---------------------------------------------------------------------------

/// Parses words with a particle after a hyphen (`смотри-ка`, `как-то`) by
/// stripping the particle, parsing the base through the driver, and
/// re-attaching the particle to every result.
#[derive(Debug, Clone)]
pub struct HyphenSeparatedParticleAnalyzer {
    particles: Vec<String>,
    score_multiplier: f64,
    id: UnitId,
}

impl HyphenSeparatedParticleAnalyzer {
    pub fn new<I, S>(particles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HyphenSeparatedParticleAnalyzer {
            particles: particles.into_iter().map(Into::into).collect(),
            score_multiplier: 0.9,
            id: UnitId::default(),
        }
    }

    /// The top-of-stack method together with its particle, if this unit put
    /// one there.
    fn attached_particle(&self, parse: &Parse) -> Option<(Method, String)> {
        match parse.methods_stack.last() {
            Some(
                method @ Method {
                    kind: MethodKind::ParticleAttached { particle },
                    ..
                },
            ) => Some((method.clone(), particle.clone())),
            _ => None,
        }
    }
}

impl AnalyzerUnit for HyphenSeparatedParticleAnalyzer {
    fn init(&mut self, _dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
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
        for particle in &self.particles {
            let Some(base) = word_lower.strip_suffix(particle.as_str()) else {
                continue;
            };
            if base.is_empty() {
                continue;
            }
            for p in morph.parse_guarded(base, guard.with(self.id)) {
                let method = Method::new(
                    self.id,
                    MethodKind::ParticleAttached {
                        particle: particle.clone(),
                    },
                );
                let parse = Parse::new(
                    format!("{}{particle}", p.word),
                    p.tag.clone(),
                    format!("{}{particle}", p.normal_form),
                    p.score * self.score_multiplier,
                    p.with_method(method).methods_stack,
                );
                add_parse_if_not_seen(parse, &mut res, seen);
            }
            // A word that ends with one particle cannot end with another.
            break;
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
        for particle in &self.particles {
            let Some(base) = word_lower.strip_suffix(particle.as_str()) else {
                continue;
            };
            if base.is_empty() {
                continue;
            }
            for tag in morph.tag_guarded(base, guard.with(self.id)) {
                add_tag_if_not_seen(tag, &mut res, seen);
            }
            break;
        }
        res
    }

    /// Strip the particle, replay the lexeme of the base parse, and
    /// re-attach the particle to every form.
    fn lexeme(&self, morph: &MorphAnalyzer, parse: &Parse) -> Vec<Parse> {
        let Some((method, particle)) = self.attached_particle(parse) else {
            return vec![parse.clone()];
        };
        let base = parse.without_fixed_suffix(particle.len()).without_last_method();
        if base.methods_stack.is_empty() {
            return vec![base.with_suffix(&particle).with_method(method)];
        }
        morph
            .get_lexeme(&base)
            .iter()
            .map(|form| form.with_suffix(&particle).with_method(method.clone()))
            .collect()
    }

    fn normalized(&self, morph: &MorphAnalyzer, parse: &Parse) -> Parse {
        let Some((method, particle)) = self.attached_particle(parse) else {
            return parse.clone();
        };
        let base = parse.without_fixed_suffix(particle.len()).without_last_method();
        if base.methods_stack.is_empty() {
            return base.with_suffix(&particle).with_method(method);
        }
        morph
            .normalized(&base)
            .with_suffix(&particle)
            .with_method(method)
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}

// ---------------------------------------------------------------------------
// `по-` adverbs
// ---------------------------------------------------------------------------

/// Detects adverbs of the `по-хорошему` pattern: the word starts with `по-`
/// and its remainder reads as a dative singular adjective.
#[derive(Debug, Clone)]
pub struct HyphenAdverbAnalyzer {
    score: f64,
    tag: Option<Tag>,
    id: UnitId,
}

impl HyphenAdverbAnalyzer {
    pub fn new() -> Self {
        HyphenAdverbAnalyzer {
            score: 0.7,
            tag: None,
            id: UnitId::default(),
        }
    }

    fn should_parse(&self, morph: &MorphAnalyzer, guard: UnitGuard, word: &str) -> bool {
        if word.chars().count() < 5 {
            return false;
        }
        let Some(remainder) = word.strip_prefix("по-") else {
            return false;
        };
        morph
            .tag_guarded(remainder, guard.with(self.id))
            .iter()
            .any(|t| t.has("ADJF") && t.has("sing") && t.has("datv"))
    }
}

impl Default for HyphenAdverbAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerUnit for HyphenAdverbAnalyzer {
    fn init(&mut self, _dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        self.tag = Some(Tag::new("ADVB")?);
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
        if !self.should_parse(morph, guard, word_lower) {
            return Vec::new();
        }
        let Some(tag) = &self.tag else {
            return Vec::new();
        };
        let method = Method::new(self.id, MethodKind::Simple);
        let parse = Parse::new(word_lower, tag.clone(), word_lower, self.score, vec![method]);
        let mut res = Vec::new();
        add_parse_if_not_seen(parse, &mut res, seen);
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
        if !self.should_parse(morph, guard, word_lower) {
            return Vec::new();
        }
        let Some(tag) = &self.tag else {
            return Vec::new();
        };
        let mut res = Vec::new();
        add_tag_if_not_seen(tag.clone(), &mut res, seen);
        res
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}

// ---------------------------------------------------------------------------
// Hyphenated compounds
// ---------------------------------------------------------------------------

/// Parses words composed of two hyphen-joined halves (`человек-гора`).
/// Emits variants that keep the left half verbatim and variants where both
/// halves inflect together; the tag always comes from parsing a half, never
/// from the compound as a whole.
#[derive(Debug, Clone)]
pub struct HyphenatedWordsAnalyzer {
    skip_prefixes: Vec<String>,
    score_multiplier: f64,
    matcher: PrefixMatcher,
    id: UnitId,
}

impl HyphenatedWordsAnalyzer {
    pub fn new<I, S>(skip_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HyphenatedWordsAnalyzer {
            skip_prefixes: skip_prefixes.into_iter().map(Into::into).collect(),
            score_multiplier: 0.75,
            matcher: PrefixMatcher::default(),
            id: UnitId::default(),
        }
    }

    fn should_parse(&self, word: &str) -> bool {
        word.matches('-').count() == 1
            && !word.starts_with('-')
            && !word.ends_with('-')
            && !self.matcher.is_prefixed(word)
    }
}

impl AnalyzerUnit for HyphenatedWordsAnalyzer {
    fn init(&mut self, _dict: &Arc<Dictionary>, id: UnitId) -> Result<()> {
        self.matcher = PrefixMatcher::new(self.skip_prefixes.iter().cloned());
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
        if !self.should_parse(word_lower) {
            return Vec::new();
        }
        let Some((left, right)) = word_lower.split_once('-') else {
            return Vec::new();
        };
        let sub_guard = guard.with(self.id);
        let left_parses = morph.parse_guarded(left, sub_guard);
        let right_parses = morph.parse_guarded(right, sub_guard);
        let method = Method::new(self.id, MethodKind::Simple);

        let mut res = Vec::new();
        // Left half kept verbatim, right half analyzed.
        for rp in &right_parses {
            let parse = Parse::new(
                format!("{left}-{}", rp.word),
                rp.tag.clone(),
                format!("{left}-{}", rp.normal_form),
                rp.score * self.score_multiplier,
                rp.with_method(method.clone()).methods_stack,
            );
            add_parse_if_not_seen(parse, &mut res, seen);
        }
        // Both halves analyzed; the left tag describes the compound.
        for lp in &left_parses {
            for rp in &right_parses {
                let mut stack = lp.methods_stack.clone();
                stack.extend(rp.methods_stack.iter().cloned());
                stack.push(method.clone());
                let parse = Parse::new(
                    format!("{}-{}", lp.word, rp.word),
                    lp.tag.clone(),
                    format!("{}-{}", lp.normal_form, rp.normal_form),
                    (lp.score + rp.score) / 2.0 * self.score_multiplier,
                    stack,
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
        if !self.should_parse(word_lower) {
            return Vec::new();
        }
        let Some((_, right)) = word_lower.split_once('-') else {
            return Vec::new();
        };
        let mut res = Vec::new();
        for tag in morph.tag_guarded(right, guard.with(self.id)) {
            add_tag_if_not_seen(tag, &mut res, seen);
        }
        res
    }

    fn clone_unit(&self) -> Box<dyn AnalyzerUnit> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_hyphenated() {
        let unit = {
            let mut u = HyphenatedWordsAnalyzer::new(["кое-", "кой-"]);
            u.matcher = PrefixMatcher::new(u.skip_prefixes.iter().cloned());
            u
        };
        assert!(unit.should_parse("человек-гора"));
        assert!(!unit.should_parse("гора"));
        assert!(!unit.should_parse("кое-кто"));
        assert!(!unit.should_parse("-кто"));
        assert!(!unit.should_parse("кто-"));
        assert!(!unit.should_parse("а-б-в"));
    }
}
