//! Error types for page-lexicon.
//!
//! Almost every irregularity in the input is absorbed with a fallback; these
//! variants cover the few cases that cannot be coerced into a document.

/// Error type for analysis operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Analysis options are inconsistent (for example `n_min > n_max`).
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// The input bytes do not look like text at all.
    #[error("input is not text: {0}")]
    NotText(String),

    /// A stop-word list could not be loaded.
    #[error("stop-word list unavailable: {0}")]
    StopWords(String),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;
