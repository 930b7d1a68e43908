// Compiled dictionary: paradigm tables, the gramtab, suffix and prefix
// lists, the word index and the prediction-suffix tables, loaded from a
// dictionary directory of JSON files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::dawg::{
    CharSubstitutes, PredictionRecord, PredictionSuffixesDawg, WordFormRef, WordsDawg,
};
use crate::errors::{MorphError, Result};
use crate::tagset::{self, Tag};

/// Dictionary format this crate understands.
pub const FORMAT_VERSION: &str = "0.1";

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionOptions {
    #[serde(default)]
    pub max_suffix_length: usize,
}

/// Contents of `meta.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct DictMeta {
    pub format_version: String,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub compiled_at: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub compile_options: Option<PredictionOptions>,
    #[serde(default)]
    pub prediction_options: Option<PredictionOptions>,
}

impl DictMeta {
    /// Maximum suffix length used when the prediction tables were built.
    pub fn max_suffix_length(&self) -> usize {
        self.compile_options
            .as_ref()
            .or(self.prediction_options.as_ref())
            .map(|o| o.max_suffix_length)
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Dictionary
// ---------------------------------------------------------------------------

/// A form of a paradigm: its prefix, tag and suffix.
#[derive(Debug, Clone)]
pub struct ParadigmForm {
    pub prefix: String,
    pub tag: Tag,
    pub suffix: String,
}

/// A known word coupled with one of its readings, as produced by
/// [`Dictionary::iter_known_words`].
#[derive(Debug, Clone)]
pub struct KnownWord {
    pub word: String,
    pub tag: Tag,
    pub normal_form: String,
    pub paradigm_id: u16,
    pub form_index: u16,
}

/// In-memory compiled dictionary. Immutable after load.
///
/// Each paradigm with N forms is stored as 3N 16-bit integers: suffix ids,
/// then tag ids, then prefix ids. Form 0 is the lemma; all forms share the
/// stem obtained by stripping the lemma's prefix and suffix.
#[derive(Debug)]
pub struct Dictionary {
    paradigms: Vec<Vec<u16>>,
    gramtab: Vec<Tag>,
    paradigm_prefixes: Vec<String>,
    suffixes: Vec<String>,
    words: WordsDawg,
    prediction_dawgs: Vec<PredictionSuffixesDawg>,
    meta: DictMeta,
    path: PathBuf,
}

impl Dictionary {
    /// Load a dictionary from a directory laid out as described in the
    /// format documentation. Grammemes listed in `grammemes.json` are
    /// registered before the gramtab is parsed. Any malformed required file
    /// fails the whole load.
    pub fn load(path: impl AsRef<Path>) -> Result<Dictionary> {
        let path = path.as_ref();
        let file = |name: &str| path.join(name);

        let meta: DictMeta = read_json(&file("meta.json"))?;
        if meta.format_version != FORMAT_VERSION {
            return Err(MorphError::invalid_dictionary(
                path,
                format!(
                    "unsupported format version {:?} (expected {FORMAT_VERSION:?})",
                    meta.format_version
                ),
            ));
        }

        let grammemes: Vec<String> = read_json(&file("grammemes.json"))?;
        for g in &grammemes {
            tagset::add_grammeme_to_known(g, g, true);
        }

        let gramtab_text: Vec<String> = read_json(&file("gramtab.json"))?;
        let mut gramtab = Vec::with_capacity(gramtab_text.len());
        for text in &gramtab_text {
            gramtab.push(Tag::new(text)?);
        }

        let suffixes: Vec<String> = read_json(&file("suffixes.json"))?;
        let paradigms: Vec<Vec<u16>> = read_json(&file("paradigms.json"))?;
        for (i, p) in paradigms.iter().enumerate() {
            if p.is_empty() || p.len() % 3 != 0 {
                return Err(MorphError::invalid_dictionary(
                    path,
                    format!("paradigm {i} has length {}, expected a positive multiple of 3", p.len()),
                ));
            }
        }
        let paradigm_prefixes: Vec<String> = read_json(&file("paradigm-prefixes.json"))?;

        let words_map: HashMap<String, Vec<WordFormRef>> = read_json(&file("words.json"))?;
        let words = WordsDawg::new(words_map);

        let mut prediction_dawgs = Vec::new();
        loop {
            let name = file(&format!("prediction-suffixes-{}.json", prediction_dawgs.len()));
            if !name.exists() {
                break;
            }
            let data: HashMap<String, Vec<PredictionRecord>> = read_json(&name)?;
            prediction_dawgs.push(PredictionSuffixesDawg::new(data));
        }

        debug!(
            path = %path.display(),
            paradigms = paradigms.len(),
            words = words.data().len(),
            prediction_tables = prediction_dawgs.len(),
            "dictionary loaded"
        );

        Ok(Dictionary {
            paradigms,
            gramtab,
            paradigm_prefixes,
            suffixes,
            words,
            prediction_dawgs,
            meta,
            path: path.to_path_buf(),
        })
    }

    pub fn meta(&self) -> &DictMeta {
        &self.meta
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn words(&self) -> &WordsDawg {
        &self.words
    }

    pub fn prediction_suffixes(&self) -> &[PredictionSuffixesDawg] {
        &self.prediction_dawgs
    }

    pub fn paradigm_prefixes(&self) -> &[String] {
        &self.paradigm_prefixes
    }

    fn paradigm(&self, paradigm_id: u16) -> Option<&[u16]> {
        self.paradigms.get(paradigm_id as usize).map(Vec::as_slice)
    }

    /// The tag of form `form_index` in paradigm `paradigm_id`.
    pub fn build_tag_info(&self, paradigm_id: u16, form_index: u16) -> Option<Tag> {
        let paradigm = self.paradigm(paradigm_id)?;
        let n = paradigm.len() / 3;
        let tag_id = *paradigm.get(n + form_index as usize)?;
        self.gramtab.get(tag_id as usize).cloned()
    }

    /// The (prefix, tag, suffix) triples of every form in the paradigm.
    pub fn build_paradigm_info(&self, paradigm_id: u16) -> Vec<ParadigmForm> {
        let Some(paradigm) = self.paradigm(paradigm_id) else {
            return Vec::new();
        };
        let n = paradigm.len() / 3;
        let mut res = Vec::with_capacity(n);
        for i in 0..n {
            let prefix = &self.paradigm_prefixes[paradigm[2 * n + i] as usize];
            let tag = &self.gramtab[paradigm[n + i] as usize];
            let suffix = &self.suffixes[paradigm[i] as usize];
            res.push(ParadigmForm {
                prefix: prefix.clone(),
                tag: tag.clone(),
                suffix: suffix.clone(),
            });
        }
        res
    }

    /// The shared stem of `fixed_word` according to its (paradigm, form).
    pub fn build_stem<'a>(
        &self,
        paradigm_id: u16,
        form_index: u16,
        fixed_word: &'a str,
    ) -> &'a str {
        let Some(paradigm) = self.paradigm(paradigm_id) else {
            return fixed_word;
        };
        let n = paradigm.len() / 3;
        let idx = form_index as usize;
        let prefix = &self.paradigm_prefixes[paradigm[2 * n + idx] as usize];
        let suffix = &self.suffixes[paradigm[idx] as usize];
        let stem = fixed_word.strip_prefix(prefix.as_str()).unwrap_or(fixed_word);
        stem.strip_suffix(suffix.as_str()).unwrap_or(stem)
    }

    /// The normal form (lemma) corresponding to `fixed_word` at the given
    /// (paradigm, form): form 0 composed around the shared stem.
    pub fn build_normal_form(&self, paradigm_id: u16, form_index: u16, fixed_word: &str) -> String {
        if form_index == 0 {
            return fixed_word.to_string();
        }
        let Some(paradigm) = self.paradigm(paradigm_id) else {
            return fixed_word.to_string();
        };
        let n = paradigm.len() / 3;
        let stem = self.build_stem(paradigm_id, form_index, fixed_word);
        let prefix = &self.paradigm_prefixes[paradigm[2 * n] as usize];
        let suffix = &self.suffixes[paradigm[0] as usize];
        format!("{prefix}{stem}{suffix}")
    }

    /// Whether the word is in the index, either directly or through a
    /// character-substitution variant.
    pub fn word_is_known(&self, word: &str, subs: &CharSubstitutes) -> bool {
        if !self.words.lookup(word).is_empty() {
            return true;
        }
        !subs.is_empty() && !self.words.similar_items(word, subs).is_empty()
    }

    /// Every (word, reading) pair in the index whose word starts with
    /// `prefix`. Intended for diagnostics; iteration order is unspecified.
    pub fn iter_known_words(&self, prefix: &str) -> Vec<KnownWord> {
        let mut res = Vec::new();
        for (word, forms) in self.words.data() {
            if !word.starts_with(prefix) {
                continue;
            }
            for wf in forms {
                let Some(tag) = self.build_tag_info(wf.paradigm_id, wf.form_index) else {
                    continue;
                };
                let normal_form = self.build_normal_form(wf.paradigm_id, wf.form_index, word);
                res.push(KnownWord {
                    word: word.clone(),
                    tag,
                    normal_form,
                    paradigm_id: wf.paradigm_id,
                    form_index: wf.form_index,
                });
            }
        }
        res
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| {
        MorphError::invalid_dictionary(path, format!("cannot read: {e}"))
    })?;
    serde_json::from_slice(&bytes)
        .map_err(|e| MorphError::invalid_dictionary(path, format!("malformed JSON: {e}")))
}
