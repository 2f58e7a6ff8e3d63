//! Configuration options for document analysis.
//!
//! The `Options` struct controls the n-gram range, how many keywords are kept
//! per page, and how sentences and excerpts are selected.

use crate::error::{Error, Result};

/// Configuration options for document analysis.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use page_lexicon::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Bigrams and trigrams only
/// let options = Options {
///     n_min: 2,
///     n_max: 3,
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Smallest n-gram order to count.
    ///
    /// Default: `1`
    pub n_min: usize,

    /// Largest n-gram order to count.
    ///
    /// Default: `5`
    pub n_max: usize,

    /// Number of dominant terms kept per document.
    ///
    /// Default: `20`
    pub top_k: usize,

    /// Minimum number of words for a sentence to count as a key sentence.
    ///
    /// Default: `6`
    pub min_sentence_words: usize,

    /// Maximum number of key sentences kept per document.
    ///
    /// Default: `10`
    pub max_sentences: usize,

    /// Length of the body text excerpt, in characters.
    ///
    /// Default: `600`
    pub excerpt_chars: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            n_min: 1,
            n_max: 5,
            top_k: 20,
            min_sentence_words: 6,
            max_sentences: 10,
            excerpt_chars: 600,
        }
    }
}

impl Options {
    /// Check that the n-gram range satisfies `1 <= n_min <= n_max`.
    pub fn validate(&self) -> Result<()> {
        if self.n_min == 0 {
            return Err(Error::InvalidOptions("n_min must be at least 1".to_string()));
        }
        if self.n_min > self.n_max {
            return Err(Error::InvalidOptions(format!(
                "n_min ({}) must not exceed n_max ({})",
                self.n_min, self.n_max
            )));
        }
        Ok(())
    }

    /// The n-gram orders to count, in ascending order.
    #[must_use]
    pub fn orders(&self) -> std::ops::RangeInclusive<usize> {
        self.n_min..=self.n_max
    }
}
