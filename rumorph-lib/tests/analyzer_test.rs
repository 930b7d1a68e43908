// End-to-end tests against the small fixture dictionary.

use rumorph_lib::analysis::MethodKind;
use rumorph_lib::probability::ProbabilityEstimator;
use rumorph_lib::{MorphAnalyzer, Parse, Tag};

fn fixture_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/ru-small")
}

fn morph() -> MorphAnalyzer {
    MorphAnalyzer::open(fixture_path()).expect("fixture dictionary should load")
}

fn has_grammemes(tag: &Tag, grammemes: &[&str]) -> bool {
    grammemes.iter().all(|g| tag.contains(g).unwrap_or(false))
}

#[test]
fn known_word_parses_with_dictionary_hit() {
    let m = morph();
    let parses = m.parse("мама");
    assert_eq!(parses.len(), 1);
    let p = &parses[0];
    assert_eq!(p.word, "мама");
    assert_eq!(p.normal_form, "мама");
    assert_eq!(p.score, 1.0);
    assert!(has_grammemes(&p.tag, &["NOUN", "sing", "nomn"]));
    assert_eq!(p.methods_stack.len(), 1);
    assert!(matches!(
        p.methods_stack[0].kind,
        MethodKind::DictionaryHit { paradigm_id: 0, form_index: 0, .. }
    ));
}

#[test]
fn stali_is_ambiguous_between_noun_and_verb() {
    let m = morph();
    let parses = m.parse("стали");
    assert!(parses.iter().any(|p| has_grammemes(&p.tag, &["NOUN", "sing", "gent"])));
    assert!(parses.iter().any(|p| has_grammemes(&p.tag, &["VERB", "plur", "past"])));
    assert_eq!(m.normal_forms("стали"), vec!["сталь", "стать"]);
}

#[test]
fn normal_forms_are_deduplicated_in_order() {
    let m = morph();
    // Two readings of "мамы" (sing,gent and plur,nomn) share the lemma.
    assert_eq!(m.parse("мамы").len(), 2);
    assert_eq!(m.normal_forms("мамы"), vec!["мама"]);
}

#[test]
fn lexeme_replays_the_whole_paradigm() {
    let m = morph();
    let parses = m.parse("мамы");
    let p = &parses[0];
    let lexeme = m.get_lexeme(p);
    assert_eq!(lexeme.len(), 12);
    let words: Vec<&str> = lexeme.iter().map(|f| f.word.as_str()).collect();
    assert_eq!(words[0], "мама");
    assert!(words.contains(&"мамами"));
    assert!(words.contains(&"мамах"));
    for (i, form) in lexeme.iter().enumerate() {
        // Every form of the lexeme normalizes to the same parse.
        let normalized = m.normalized(form);
        assert_eq!(normalized.word, "мама", "form {i} normalizes to the lemma");
        assert!(has_grammemes(&normalized.tag, &["sing", "nomn"]));
        assert!(matches!(
            form.methods_stack[0].kind,
            MethodKind::DictionaryHit { paradigm_id: 0, .. }
        ));
    }
}

#[test]
fn normalized_points_at_form_zero() {
    let m = morph();
    let p = m
        .parse("мамой")
        .into_iter()
        .next()
        .expect("мамой should parse");
    let n = m.normalized(&p);
    assert_eq!(n.word, "мама");
    assert_eq!(n.normal_form, "мама");
    assert!(matches!(
        n.methods_stack[0].kind,
        MethodKind::DictionaryHit { form_index: 0, .. }
    ));
}

#[test]
fn inflect_finds_the_requested_form() {
    let m = morph();
    let parses = m.parse("мама");
    let p = &parses[0];
    let plur_gent = m
        .inflect(p, &["plur".to_string(), "gent".to_string()])
        .expect("plur,gent should exist");
    assert_eq!(plur_gent.word, "мам");

    // Rare cases fall back to their common equivalents: voct → nomn.
    let voct = m.inflect(p, &["voct".to_string()]).expect("voct should fall back");
    assert_eq!(voct.word, "мама");

    // No verb tense exists in a noun paradigm.
    assert!(m.inflect(p, &["pres".to_string()]).is_none());
}

#[test]
fn agreement_with_numerals() {
    let m = morph();
    let parses = m.parse("мама");
    let p = &parses[0];
    assert_eq!(m.make_agree_with_number(p, 1).unwrap().word, "мама");
    assert_eq!(m.make_agree_with_number(p, 3).unwrap().word, "мамы");
    assert_eq!(m.make_agree_with_number(p, 5).unwrap().word, "мам");
    assert_eq!(m.make_agree_with_number(p, 11).unwrap().word, "мам");
    assert_eq!(m.make_agree_with_number(p, 21).unwrap().word, "мама");
}

#[test]
fn particle_is_stripped_and_reattached() {
    let m = morph();
    let parses = m.parse("мамы-то");
    let p = &parses[0];
    assert_eq!(p.word, "мамы-то");
    assert_eq!(p.normal_form, "мама-то");
    assert!((p.score - 0.9).abs() < 1e-9);
    assert!(matches!(
        p.methods_stack.last().unwrap().kind,
        MethodKind::ParticleAttached { .. }
    ));

    let normalized = m.normalized(p);
    assert_eq!(normalized.word, "мама-то");

    let lexeme = m.get_lexeme(p);
    assert_eq!(lexeme.len(), 12);
    assert!(lexeme.iter().all(|f| f.word.ends_with("-то")));
    assert!(lexeme.iter().any(|f| f.word == "мам-то"));
}

#[test]
fn hyphen_adverb_is_detected() {
    let m = morph();
    let parses = m.parse("по-хорошему");
    assert_eq!(parses.len(), 1);
    let p = &parses[0];
    assert!(has_grammemes(&p.tag, &["ADVB"]));
    assert!((p.score - 0.7).abs() < 1e-9);
    assert_eq!(p.normal_form, "по-хорошему");
}

#[test]
fn hyphenated_compound_combines_both_halves() {
    let m = morph();
    let parses = m.parse("мама-сталь");
    assert!(!parses.is_empty());
    // Keep-left variants take the right half's tag.
    assert!(parses
        .iter()
        .any(|p| has_grammemes(&p.tag, &["NOUN", "inan"]) && p.normal_form == "мама-сталь"));
    // The combined variant is tagged by the left half.
    assert!(parses
        .iter()
        .any(|p| has_grammemes(&p.tag, &["NOUN", "anim"]) && p.normal_form == "мама-сталь"));
    assert!(parses.iter().all(|p| (p.score - 0.75).abs() < 1e-9));
}

#[test]
fn skip_prefixed_hyphenated_words_are_left_alone() {
    let m = morph();
    let parses = m.parse("кое-кто");
    assert_eq!(parses.len(), 1);
    assert!(has_grammemes(&parses[0].tag, &["UNKN"]));
}

#[test]
fn known_prefix_is_stripped() {
    let m = morph();
    let parses = m.parse("нехороший");
    let p = parses
        .iter()
        .find(|p| has_grammemes(&p.tag, &["ADJF", "masc", "nomn"]))
        .expect("should parse through the known prefix");
    assert_eq!(p.word, "нехороший");
    assert_eq!(p.normal_form, "нехороший");
    assert!((p.score - 0.75).abs() < 1e-9);
    assert!(matches!(
        p.methods_stack.last().unwrap().kind,
        MethodKind::PrefixAttached { .. }
    ));
}

#[test]
fn unknown_prefix_falls_back_to_dictionary_remainder() {
    let m = morph();
    let parses = m.parse("псмама");
    let p = parses
        .iter()
        .find(|p| has_grammemes(&p.tag, &["NOUN", "sing", "nomn"]))
        .expect("remainder should be found in the dictionary");
    assert_eq!(p.word, "псмама");
    assert_eq!(p.normal_form, "псмама");
    assert!((p.score - 0.5).abs() < 1e-9);
}

#[test]
fn suffix_prediction_builds_the_paradigm_form() {
    let m = morph();
    let parses = m.parse("глокая");
    let p = parses
        .iter()
        .find(|p| {
            matches!(
                p.methods_stack.last().map(|m| &m.kind),
                Some(MethodKind::SuffixPredicted { .. })
            )
        })
        .expect("should be predicted from the suffix");
    assert!(has_grammemes(&p.tag, &["ADJF", "femn", "sing", "nomn"]));
    assert_eq!(p.word, "глокая");
    assert_eq!(p.normal_form, "глокий");
    assert!((p.score - 7.0 / 8.0 * 0.5).abs() < 1e-9);
    // Predicted parses do not inflect.
    assert_eq!(m.get_lexeme(p).len(), 1);
}

#[test]
fn unknown_word_gets_a_single_unkn_parse() {
    let m = morph();
    let parses = m.parse("ффффф");
    assert_eq!(parses.len(), 1);
    let p = &parses[0];
    assert!(has_grammemes(&p.tag, &["UNKN"]));
    assert_eq!(p.score, 1.0);
    assert_eq!(m.get_lexeme(p), vec![p.clone()]);
}

#[test]
fn shape_analyzers_tag_tokens() {
    let m = morph();

    let parses = m.parse("123");
    assert_eq!(parses.len(), 1);
    assert!(has_grammemes(&parses[0].tag, &["NUMB", "intg"]));

    let parses = m.parse("12,5");
    assert_eq!(parses.len(), 1);
    assert!(has_grammemes(&parses[0].tag, &["NUMB", "real"]));

    let parses = m.parse("XIV");
    assert_eq!(parses.len(), 1);
    assert!(has_grammemes(&parses[0].tag, &["ROMN"]));

    let parses = m.parse("foobar");
    assert_eq!(parses.len(), 1);
    assert!(has_grammemes(&parses[0].tag, &["LATN"]));

    let parses = m.parse("!?!");
    assert_eq!(parses.len(), 1);
    assert!(has_grammemes(&parses[0].tag, &["PNCT"]));
    assert!((parses[0].score - 0.9).abs() < 1e-9);
}

#[test]
fn initials_produce_gendered_case_candidates() {
    let m = morph();
    let parses = m.parse("А");
    assert_eq!(parses.len(), 24);
    assert!(parses.iter().all(|p| has_grammemes(&p.tag, &["Init", "Abbr"])));
    assert!(parses.iter().any(|p| has_grammemes(&p.tag, &["Name"])));
    assert!(parses.iter().any(|p| has_grammemes(&p.tag, &["Patr"])));

    let femn = parses
        .iter()
        .find(|p| has_grammemes(&p.tag, &["Name", "femn", "gent"]))
        .expect("feminine genitive reading should exist");
    let normalized = m.normalized(femn);
    assert!(has_grammemes(&normalized.tag, &["femn", "nomn"]));
    assert_eq!(m.get_lexeme(femn).len(), 6);
}

#[test]
fn yo_letter_is_substituted_on_lookup() {
    let m = morph();
    let parses = m.parse("ёлка");
    assert_eq!(parses.len(), 1);
    assert_eq!(parses[0].word, "елка");
    assert!(has_grammemes(&parses[0].tag, &["NOUN", "inan", "sing", "nomn"]));
    assert!(m.word_is_known("ёлка"));
    assert!(m.word_is_known("мама"));
    assert!(!m.word_is_known("тест"));
}

#[test]
fn driver_tag_collects_distinct_tags() {
    let m = morph();
    let tags = m.tag("стали");
    assert_eq!(tags.len(), 6);
    assert!(tags.iter().any(|t| has_grammemes(t, &["VERB"])));

    let tags = m.tag("ффффф");
    assert_eq!(tags.len(), 1);
    assert!(has_grammemes(&tags[0], &["UNKN"]));
}

#[test]
fn dictionary_words_reconstruct_their_normal_forms() {
    let m = morph();
    let dict = m.dictionary().clone();
    for known in dict.iter_known_words("") {
        let parses = m.parse(&known.word);
        assert!(!parses.is_empty(), "{} should parse", known.word);
        for p in &parses {
            if let MethodKind::DictionaryHit {
                paradigm_id,
                form_index,
                ..
            } = &p.methods_stack[0].kind
            {
                assert_eq!(
                    p.normal_form,
                    dict.build_normal_form(*paradigm_id, *form_index, &p.word),
                    "normal form of {} must reconstruct",
                    p.word
                );
            }
        }
    }
}

#[test]
fn probability_estimator_rescales_and_sorts() {
    let prob_path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/prob-only");
    let estimator = ProbabilityEstimator::load(prob_path)
        .expect("table should load")
        .expect("table should be present");
    // Force grammeme registration by loading the fixture dictionary.
    let _m = morph();

    let noun = Tag::new("NOUN,inan,femn sing,gent").unwrap();
    let verb = Tag::new("VERB,perf,intr plur,past,indc").unwrap();
    let mut parses = vec![
        Parse::new("стали", noun.clone(), "сталь", 1.0, Vec::new()),
        Parse::new("стали", verb.clone(), "стать", 1.0, Vec::new()),
    ];
    estimator.apply_to_parses("стали", &mut parses);
    assert!(has_grammemes(&parses[0].tag, &["VERB"]));
    assert!((parses[0].score - 0.6).abs() < 1e-9);
    assert!((parses[1].score - 0.3).abs() < 1e-9);
    // Sorted non-increasing.
    assert!(parses[0].score >= parses[1].score);

    // Unknown word: scores renormalize to sum 1, order preserved.
    let mut parses = vec![
        Parse::new("мама", noun.clone(), "мама", 1.0, Vec::new()),
        Parse::new("мама", verb.clone(), "мама", 0.5, Vec::new()),
    ];
    estimator.apply_to_parses("мама", &mut parses);
    assert!(has_grammemes(&parses[0].tag, &["NOUN"]));
    let total: f64 = parses.iter().map(|p| p.score).sum();
    assert!((total - 1.0).abs() < 1e-9);

    let mut tags = vec![noun.clone(), verb.clone()];
    estimator.apply_to_tags("стали", &mut tags);
    assert!(has_grammemes(&tags[0], &["VERB"]));

    // Missing table: estimator is silently disabled.
    assert!(ProbabilityEstimator::load(fixture_path()).unwrap().is_none());
}

#[test]
fn custom_unit_configuration() {
    use rumorph_lib::units::{DictionaryAnalyzer, InitialsAnalyzer, UnknownAnalyzer};
    use rumorph_lib::UnitsConfig;

    let config = UnitsConfig::new()
        .unit(DictionaryAnalyzer::new())
        .unit(InitialsAnalyzer::with_letters("АБВ"))
        .unit(UnknownAnalyzer::new());
    let m = MorphAnalyzer::with_units(fixture_path(), &config).expect("config should initialize");

    let parses = m.parse("А");
    assert_eq!(parses.len(), 12);
    assert!((parses[0].score - 0.9).abs() < 1e-9);
    assert!(parses.iter().all(|p| has_grammemes(&p.tag, &["Init", "Abbr"])));

    // Without the analogy units everything unknown falls through.
    assert!(has_grammemes(&m.parse("глокая")[0].tag, &["UNKN"]));
}

#[test]
fn missing_dictionary_fails_to_load() {
    let err = MorphAnalyzer::open(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/missing"));
    assert!(err.is_err());
}
