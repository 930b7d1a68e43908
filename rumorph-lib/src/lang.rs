// Per-language data and default analyzer configurations.

pub mod ru {
    //! Russian: character substitutions, affix lists and the default unit
    //! chain for OpenCorpora-based dictionaries.

    use crate::analyzer::UnitsConfig;
    use crate::dawg::CharSubstitutes;
    use crate::units::{
        AbbreviatedFirstNameAnalyzer, AbbreviatedPatronymicAnalyzer, DictionaryAnalyzer,
        HyphenAdverbAnalyzer, HyphenSeparatedParticleAnalyzer, HyphenatedWordsAnalyzer,
        KnownPrefixAnalyzer, KnownSuffixAnalyzer, LatinAnalyzer, NumberAnalyzer,
        PunctuationAnalyzer, RomanNumberAnalyzer, UnknownAnalyzer, UnknownPrefixAnalyzer,
    };

    /// Particles that attach to a word with a hyphen. Only the first match
    /// is stripped; no particle here is a suffix of another.
    pub const PARTICLES_AFTER_HYPHEN: &[&str] =
        &["-то", "-ка", "-таки", "-де", "-тко", "-тка", "-с", "-ста"];

    /// Prefixes of hyphenated pronouns and the like that the
    /// hyphenated-words analyzer must leave to other units.
    pub const HYPHENATED_SKIP_PREFIXES: &[&str] = &["кое-", "кой-"];

    /// Lexical prefixes that combine freely with dictionary words.
    pub const KNOWN_PREFIXES: &[&str] = &[
        "авиа", "авто", "аэро", "био", "вело", "видео", "вице-", "внутри", "гипер", "гидро",
        "гос", "дву", "двух", "евро", "зоо", "интер", "кино", "контр", "лже", "макро", "максимально-",
        "мета", "микро", "мини", "моно", "мото", "мульти", "нано", "не", "небез", "недо",
        "около", "пост", "псевдо", "радио", "само", "спец", "стерео", "супер", "теле", "транс",
        "ультра", "фото", "экс-", "экстра", "электро", "энерго",
    ];

    /// Capital letters that can stand as initials.
    pub const INITIAL_LETTERS: &str = "АБВГДЕЁЖЗИКЛМНОПРСТУФХЦЧШЩЭЮЯ";

    /// Substitutions applied during approximate dictionary lookup: `ё` is
    /// routinely typed as `е`, and dictionaries store the `е` spelling.
    pub fn char_substitutes() -> CharSubstitutes {
        [('ё', 'е')].into_iter().collect()
    }

    /// The default unit chain. Mirrors the standard analyzer layout: exact
    /// readings first, then shape readings, then hyphen handling, then
    /// prefix/suffix analogy, with the unknown fallback closing the chain.
    pub fn default_units() -> UnitsConfig {
        UnitsConfig::new()
            .group(vec![
                Box::new(DictionaryAnalyzer::new()),
                Box::new(AbbreviatedFirstNameAnalyzer::new(INITIAL_LETTERS)),
                Box::new(AbbreviatedPatronymicAnalyzer::new(INITIAL_LETTERS)),
            ])
            .unit(NumberAnalyzer::new())
            .unit(PunctuationAnalyzer::new())
            // Roman numerals are also Latin-letter words, so each shape unit
            // is terminal on its own and the numeral reading wins.
            .unit(RomanNumberAnalyzer::new())
            .unit(LatinAnalyzer::new())
            .unit(HyphenSeparatedParticleAnalyzer::new(
                PARTICLES_AFTER_HYPHEN.iter().copied(),
            ))
            .unit(HyphenAdverbAnalyzer::new())
            .unit(HyphenatedWordsAnalyzer::new(
                HYPHENATED_SKIP_PREFIXES.iter().copied(),
            ))
            .unit(KnownPrefixAnalyzer::new(KNOWN_PREFIXES.iter().copied()))
            .group(vec![
                Box::new(UnknownPrefixAnalyzer::new()),
                Box::new(KnownSuffixAnalyzer::new()),
            ])
            .unit(UnknownAnalyzer::new())
    }
}
