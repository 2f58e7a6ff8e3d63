//! Punctuation-based sentence splitting.

use crate::patterns::{SENTENCE_END, SENTENCE_WORD_TRIM};

/// Split `text` into trimmed sentences.
///
/// A sentence ends at a run of `.`, `!`, `?` or `…` followed by whitespace
/// or the end of the text; the terminal punctuation stays with its sentence.
/// Decimal numbers and abbreviations glued to the next word are not split.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(text) {
        push_trimmed(&mut sentences, &text[start..m.end()]);
        start = m.end();
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}

/// The first `max` sentences of `text` with at least `min_words`
/// whitespace-separated words.
#[must_use]
pub fn key_sentences(text: &str, min_words: usize, max: usize) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .filter(|s| s.split_whitespace().count() >= min_words)
        .take(max)
        .collect()
}

/// Lowercased words of a sentence with surrounding punctuation stripped,
/// keeping those longer than two characters.
pub fn sentence_words(sentence: &str) -> impl Iterator<Item = String> + '_ {
    sentence
        .split_whitespace()
        .map(|word| word.to_lowercase().trim_matches(SENTENCE_WORD_TRIM).to_string())
        .filter(|word| word.chars().count() > 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_terminators() {
        let sentences = split_sentences("Bonjour à tous. Comment allez-vous ? Très bien!");
        assert_eq!(
            sentences,
            vec!["Bonjour à tous.", "Comment allez-vous ?", "Très bien!"]
        );
    }

    #[test]
    fn test_split_does_not_break_decimals() {
        let sentences = split_sentences("La version 1.5 est sortie. Enfin");
        assert_eq!(sentences, vec!["La version 1.5 est sortie.", "Enfin"]);
    }

    #[test]
    fn test_split_empty_text() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_key_sentences_filters_and_limits() {
        let text = "Trop court. Celle-ci contient bien six mots au total. \
                    Une deuxième phrase assez longue pour compter ici. \
                    Une troisième phrase assez longue pour compter aussi.";
        let keys = key_sentences(text, 6, 2);
        assert_eq!(keys.len(), 2);
        assert!(keys[0].starts_with("Celle-ci"));
        assert!(keys[1].starts_with("Une deuxième"));
    }

    #[test]
    fn test_sentence_words_strip_punctuation() {
        let words: Vec<String> = sentence_words("« Le (Chat), noir! » dort.").collect();
        assert_eq!(words, vec!["chat", "noir", "dort"]);
    }
}
