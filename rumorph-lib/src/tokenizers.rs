// Simple word-level tokenization.

use std::sync::LazyLock;

use regex::Regex;

static GROUPING_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^\p{L}\p{M}\p{N}_-]|[+])").unwrap());

/// Split text into word and punctuation tokens. Letters, digits, marks,
/// underscores and hyphens stick together; every other character becomes its
/// own token; whitespace is dropped.
pub fn simple_word_tokenize(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut tokens = Vec::new();
    let mut last = 0;
    for m in GROUPING_SPACE_RE.find_iter(text) {
        if m.start() > last {
            push_token(&mut tokens, &text[last..m.start()]);
        }
        push_token(&mut tokens, m.as_str());
        last = m.end();
    }
    if last < text.len() {
        push_token(&mut tokens, &text[last..]);
    }
    tokens
}

fn push_token(tokens: &mut Vec<String>, segment: &str) {
    if !segment.is_empty() && !segment.chars().all(char::is_whitespace) {
        tokens.push(segment.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_words_and_punct() {
        assert_eq!(
            simple_word_tokenize("Мама мыла раму."),
            vec!["Мама", "мыла", "раму", "."]
        );
    }

    #[test]
    fn test_hyphen_kept_inside_token() {
        assert_eq!(
            simple_word_tokenize("кое-что, да!"),
            vec!["кое-что", ",", "да", "!"]
        );
    }

    #[test]
    fn test_empty() {
        assert!(simple_word_tokenize("").is_empty());
        assert!(simple_word_tokenize("   ").is_empty());
    }
}
