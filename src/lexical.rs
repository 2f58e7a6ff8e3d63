//! Tokenization, n-gram counting and top-K term selection.
//!
//! Counting is insertion ordered: every counter remembers the order in which
//! terms were first seen, and "most common" selections are a stable sort by
//! descending count over that order. Equal counts therefore always rank by
//! first discovery, independent of hashing.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::options::Options;
use crate::patterns::TOKEN;
use crate::stopwords::StopWords;

/// Tokens of this many characters or fewer are discarded.
pub const MIN_TOKEN_CHARS: usize = 2;

/// N-gram orders to their term counters.
pub type NgramTables = BTreeMap<usize, TermCounter>;

/// An insertion-ordered term counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermCounter {
    counts: IndexMap<String, usize>,
}

impl TermCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `term`.
    pub fn add(&mut self, term: &str, count: usize) {
        if let Some(existing) = self.counts.get_mut(term) {
            *existing += count;
        } else {
            self.counts.insert(term.to_string(), count);
        }
    }

    /// Add one occurrence of `term`.
    #[inline]
    pub fn increment(&mut self, term: &str) {
        self.add(term, 1);
    }

    /// Add every count of `other`, in `other`'s order.
    pub fn merge(&mut self, other: &TermCounter) {
        for (term, count) in other.iter() {
            self.add(term, count);
        }
    }

    /// Count for `term`, zero when absent.
    #[must_use]
    pub fn get(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Terms and counts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(term, count)| (term.as_str(), *count))
    }

    /// Terms in insertion order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Keep only the entries matching `keep`, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, usize) -> bool) {
        self.counts.retain(|term, count| keep(term, *count));
    }

    /// The `n` most frequent terms, ties broken by first insertion.
    #[must_use]
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.iter().collect();
        // sort_by is stable: equal counts keep insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// All entries, most frequent first.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        self.most_common(self.len())
    }
}

impl<S: AsRef<str>> FromIterator<S> for TermCounter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counter = Self::new();
        for term in iter {
            counter.increment(term.as_ref());
        }
        counter
    }
}

/// Lowercase `text` and return its significant tokens in order.
///
/// Tokens of [`MIN_TOKEN_CHARS`] characters or fewer and stop words are
/// dropped from the stream, so n-gram windows span across them.
#[must_use]
pub fn tokenize(text: &str, stop_words: &StopWords) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS && !stop_words.contains(token))
        .map(str::to_string)
        .collect()
}

/// Count the n-grams of a token stream for a single order.
///
/// Returns an empty counter when the stream is shorter than `n`.
#[must_use]
pub fn count_ngrams(tokens: &[String], n: usize, stop_words: &StopWords) -> TermCounter {
    if n == 0 || tokens.len() < n {
        return TermCounter::new();
    }

    let mut counter: TermCounter = tokens.windows(n).map(|window| window.join(" ")).collect();

    // Second filtering layer: only redundant while stop words are removed
    // before windowing.
    counter.retain(|term, _| !term.split(' ').any(|part| stop_words.contains(part)));
    counter
}

/// Count n-grams of `text` for every order in `n_min..=n_max`.
///
/// Every order in the range gets an entry, empty when there are too few
/// tokens.
#[must_use]
pub fn extract_ngrams(text: &str, n_min: usize, n_max: usize, stop_words: &StopWords) -> NgramTables {
    let tokens = tokenize(text, stop_words);
    (n_min..=n_max)
        .map(|n| (n, count_ngrams(&tokens, n, stop_words)))
        .collect()
}

/// Merge per-order tables in ascending order into one counter.
#[must_use]
pub fn combine(ngrams: &NgramTables) -> TermCounter {
    let mut combined = TermCounter::new();
    for counter in ngrams.values() {
        combined.merge(counter);
    }
    combined
}

/// Lexical summary of one document's visible text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalProfile {
    /// One counter per n-gram order.
    pub ngrams: NgramTables,
    /// Every n-gram of every order with its count.
    pub combined: TermCounter,
    /// The `top_k` most frequent terms of `combined`.
    pub top_terms: Vec<String>,
}

impl LexicalProfile {
    /// Build the profile of `text` with the n-gram range and `top_k` of
    /// `options`.
    #[must_use]
    pub fn build(text: &str, options: &Options, stop_words: &StopWords) -> Self {
        let ngrams = extract_ngrams(text, options.n_min, options.n_max, stop_words);
        let combined = combine(&ngrams);
        let top_terms = combined
            .most_common(options.top_k)
            .into_iter()
            .map(|(term, _)| term.to_string())
            .collect();

        Self {
            ngrams,
            combined,
            top_terms,
        }
    }
}

/// Render the `per_order` most common n-grams of each non-empty order as
/// `"1-grams: chat(3), noir(2); 2-grams: chat noir(2)"`.
#[must_use]
pub fn ngram_summary(ngrams: &NgramTables, per_order: usize) -> String {
    ngrams
        .iter()
        .filter(|(_, counter)| !counter.is_empty())
        .map(|(n, counter)| {
            let items = counter
                .most_common(per_order)
                .iter()
                .map(|(term, count)| format!("{term}({count})"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{n}-grams: {items}")
        })
        .collect::<Vec<_>>()
        .join("; ")
}
