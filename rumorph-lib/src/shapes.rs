// Word-shape predicates and capitalization transfer.

use std::sync::LazyLock;

use regex::Regex;

static ROMAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^M{0,4}(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$").unwrap()
});
static LATIN_CHAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A\p{Latin}\z").unwrap());
static PUNCT_CHAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\A\p{P}\z").unwrap());

fn char_matches(re: &Regex, c: char) -> bool {
    let mut buf = [0u8; 4];
    re.is_match(c.encode_utf8(&mut buf))
}

/// True if the token contains at least one letter and every letter belongs
/// to the Latin script.
pub fn is_latin(token: &str) -> bool {
    let mut has_alpha = false;
    for c in token.chars() {
        if c.is_alphabetic() {
            if !char_matches(&LATIN_CHAR_RE, c) {
                return false;
            }
            has_alpha = true;
        }
    }
    has_alpha
}

/// True if the token consists only of punctuation and whitespace and
/// contains at least one punctuation mark.
pub fn is_punctuation(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let mut has_punct = false;
    for c in token.chars() {
        if c.is_whitespace() {
            continue;
        }
        if char_matches(&PUNCT_CHAR_RE, c) {
            has_punct = true;
        } else {
            return false;
        }
    }
    has_punct
}

/// True if the token is a well-formed Roman numeral.
pub fn is_roman_number(token: &str) -> bool {
    !token.is_empty() && ROMAN_RE.is_match(token)
}

/// Transfer the capitalization of `example` onto `word`. Hyphenated words
/// are handled part by part.
pub fn restore_capitalization(word: &str, example: &str) -> String {
    if example.contains('-') {
        let example_parts: Vec<&str> = example.split('-').collect();
        return word
            .split('-')
            .enumerate()
            .map(|(i, part)| match example_parts.get(i) {
                Some(ex) => make_the_same_case(part, ex),
                None => part.to_lowercase(),
            })
            .collect::<Vec<_>>()
            .join("-");
    }
    make_the_same_case(word, example)
}

fn make_the_same_case(word: &str, example: &str) -> String {
    if example == example.to_lowercase() {
        return word.to_lowercase();
    }
    if example == example.to_uppercase() {
        return word.to_uppercase();
    }
    if is_title(example) {
        return to_title(word);
    }
    word.to_lowercase()
}

fn is_title(s: &str) -> bool {
    let mut letters = s.chars().filter(|c| c.is_alphabetic());
    match letters.next() {
        Some(first) if first.is_uppercase() => letters.all(|c| !c.is_uppercase()),
        _ => false,
    }
}

fn to_title(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_latin() {
        assert!(is_latin("foobar"));
        assert!(is_latin("pdf-1"));
        assert!(!is_latin("сталь"));
        assert!(!is_latin("123"));
        assert!(!is_latin(""));
    }

    #[test]
    fn test_is_punctuation() {
        assert!(is_punctuation("!?!"));
        assert!(is_punctuation("«»"));
        assert!(!is_punctuation("a."));
        assert!(!is_punctuation(""));
        assert!(!is_punctuation("   "));
    }

    #[test]
    fn test_is_roman_number() {
        assert!(is_roman_number("XIV"));
        assert!(is_roman_number("mcmxc"));
        assert!(!is_roman_number(""));
        assert!(!is_roman_number("XIVX"));
        assert!(!is_roman_number("X4"));
    }

    #[test]
    fn test_restore_capitalization() {
        assert_eq!(restore_capitalization("стали", "Мама"), "Стали");
        assert_eq!(restore_capitalization("стали", "МАМА"), "СТАЛИ");
        assert_eq!(restore_capitalization("СТАЛИ", "мама"), "стали");
        assert_eq!(
            restore_capitalization("по-хорошему", "По-Хорошему"),
            "По-Хорошему"
        );
    }
}
