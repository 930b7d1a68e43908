//! Morphological analyzer for Russian built on OpenCorpora dictionaries.
//!
//! Given a word in isolation, [`MorphAnalyzer::parse`] returns every
//! plausible interpretation as a [`Parse`]: the surface form, an OpenCorpora
//! [`Tag`], the normal form (lemma), a confidence score and the derivation
//! trace that produced it. On top of a parse, the analyzer can enumerate the
//! full inflectional paradigm ([`MorphAnalyzer::get_lexeme`]), reconstruct
//! the normal form, inflect to a required grammeme set and agree a word with
//! a numeral.
//!
//! Analysis runs through an ordered chain of cooperating units: exact
//! dictionary lookup first, then shape detectors (numbers, punctuation,
//! Latin words, Roman numerals), hyphen handling, prefix and suffix analogy
//! for out-of-dictionary words, and an unknown-word fallback.

pub mod analysis;
pub mod analyzer;
pub mod dawg;
pub mod dict;
pub mod errors;
pub mod lang;
pub mod probability;
pub mod shapes;
pub mod tagset;
pub mod tokenizers;
pub mod units;

pub use analysis::{Method, MethodKind, Parse};
pub use analyzer::{MorphAnalyzer, UnitsConfig};
pub use dict::Dictionary;
pub use errors::{MorphError, Result};
pub use tagset::Tag;
