//! Stop-word sets.
//!
//! A `StopWords` value is built once and passed to the analyzer; nothing in
//! the crate reads a global list. The default French set unites the NLTK
//! list shipped by `stop-words` with an extended list of function words
//! that the corpus list misses (contractions, auxiliary forms, intensifiers).

use std::collections::HashSet;
use std::path::Path;

use stop_words::{get, LANGUAGE};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Extended French function words: pronouns, demonstratives, possessives,
/// articles, prepositions, conjunctions, auxiliary forms, contractions.
///
/// Also the deterministic fallback when an external list is unavailable.
pub const FRENCH_EXTENDED: &[&str] = &[
    // Pronouns
    "je", "tu", "il", "elle", "nous", "vous", "ils", "elles", "on", "moi", "toi", "lui", "eux",
    // Demonstratives
    "ce", "cet", "cette", "ces", "celui", "celle", "ceux",
    // Possessives
    "mon", "ton", "son", "ma", "ta", "sa", "mes", "tes", "ses", "notre", "votre", "leur",
    // Articles
    "un", "une", "des", "la", "le", "les", "l",
    // Prepositions
    "à", "de", "en", "pour", "par", "avec", "sans", "dans", "sous", "sur", "entre", "vers",
    "durant",
    // Conjunctions
    "et", "ou", "mais", "donc", "car", "ni", "que", "qui", "si", "comme", "alors", "lorsque",
    // Auxiliary and common verbs
    "être", "avoir", "aller", "faire", "venir", "pouvoir", "devoir", "vouloir", "falloir",
    "sembler", "est", "sont", "était", "étaient", "a", "ont", "ai", "as", "ait", "aient", "suis",
    "es", "va", "vont", "allé", "allée", "allés", "allées", "vais", "vas", "fait", "font",
    "faits", "faisait", "faisaient", "fais", "fera", "feront",
    // Fillers
    "ça", "ca", "là", "ci", "pas", "plus", "moins", "très", "bien", "mal", "bon", "meilleur",
    // Contractions
    "d'un", "d'une", "qu'un", "c'est", "l'", "d'", "s'", "t'", "m'", "n'", "j'",
    // Other low-signal words
    "même", "autre", "tel", "telle", "etc", "autant", "aussi", "seulement", "surtout",
    "quelque", "quelques", "quelqu'un", "aucun", "aucune", "nul", "nulle", "tout", "tous",
    "toute", "toutes",
];

/// An immutable set of lowercase stop words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build a set from arbitrary words. Entries are trimmed and lowercased;
    /// blank entries are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// An empty set: every token is significant.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in extended French list alone.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_words(FRENCH_EXTENDED)
    }

    /// The NLTK French list from the `stop-words` crate plus the extended
    /// list.
    #[must_use]
    pub fn french() -> Self {
        let mut set = Self::from_words(get(LANGUAGE::French));
        set.extend(FRENCH_EXTENDED);
        debug!(words = set.len(), "Loaded French stop words");
        set
    }

    /// Load a word list file (one word per line, `#` starts a comment) and
    /// add the extended list to it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::StopWords(format!("{}: {e}", path.display())))?;

        let mut set = Self::from_words(
            content
                .lines()
                .map(|line| line.split('#').next().unwrap_or_default()),
        );
        set.extend(FRENCH_EXTENDED);
        Ok(set)
    }

    /// Load a word list file, falling back to [`StopWords::builtin`] when it
    /// cannot be read.
    pub fn from_file_or_builtin(path: impl AsRef<Path>) -> Self {
        match Self::from_file(path) {
            Ok(set) => set,
            Err(err) => {
                warn!(error = %err, "Using the built-in stop-word list");
                Self::builtin()
            }
        }
    }

    /// Whether `word` (already lowercased) is a stop word.
    #[inline]
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }
}
