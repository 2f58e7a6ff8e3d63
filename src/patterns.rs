//! Compiled regex patterns for text processing.
//!
//! All patterns are compiled once at first use using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// A word token: ASCII letters and digits, accented French letters,
/// apostrophes (straight and typographic) and hyphens.
///
/// Applied to already lowercased text.
pub static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-zA-Zàâçéèêëîïôûùüÿñæœ'’-]+").expect("TOKEN regex")
});

/// Any run of whitespace, including non-breaking spaces.
pub static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE regex"));

/// End of a sentence: terminal punctuation followed by whitespace or the end
/// of the text.
pub static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?…]+(?:\s+|$)").expect("SENTENCE_END regex"));

/// Characters stripped from both ends of a sentence word before it is
/// counted in the global ranking.
pub const SENTENCE_WORD_TRIM: &[char] = &['.', ',', '!', '?', ';', ':', '(', ')', '\'', '"'];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_keeps_accents_apostrophes_and_hyphens() {
        let tokens: Vec<&str> = TOKEN
            .find_iter("l'été arrive-t-il à 10h? aujourd’hui")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(tokens, vec!["l'été", "arrive-t-il", "à", "10h", "aujourd’hui"]);
    }

    #[test]
    fn test_token_splits_on_punctuation() {
        let tokens: Vec<&str> = TOKEN.find_iter("chat,noir.dort").map(|m| m.as_str()).collect();
        assert_eq!(tokens, vec!["chat", "noir", "dort"]);
    }

    #[test]
    fn test_sentence_end_requires_following_space() {
        assert!(SENTENCE_END.is_match("fin. Début"));
        assert!(SENTENCE_END.is_match("fin!"));
        assert!(!SENTENCE_END.is_match("version 1.5"));
    }
}
