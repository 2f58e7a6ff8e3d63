//! # page-lexicon
//!
//! Lexical signal extraction from HTML pages.
//!
//! The crate sanitizes raw HTML, extracts its visible text, counts n-grams
//! with stop-word filtering, and aggregates keywords across a set of pages
//! into a global ranking and a co-occurrence graph.
//!
//! ## Quick Start
//!
//! ```rust
//! use page_lexicon::{aggregate, Analyzer, Options, StopWords};
//!
//! let analyzer = Analyzer::new(Options::default(), StopWords::french())?;
//!
//! let html = r#"<html><head><title>Chats</title></head>
//! <body><h1>Le chat noir</h1><p>Le chat noir mange le poisson. Le chat noir dort.</p></body></html>"#;
//!
//! let record = analyzer.analyze("https://example.com/chats", html, Some("https://example.com/"));
//! assert_eq!(record.title(), "Chats");
//! assert_eq!(record.headings().h1, vec!["Le chat noir"]);
//!
//! let summary = aggregate(&[record]);
//! println!("{:?}", summary.ranking.first());
//! # Ok::<(), page_lexicon::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Sanitizer**: removal policies for markup cleaning and text extraction
//! - **Lexical extractor**: tokens, n-gram tables and top-K terms
//! - **Structure extractor**: title, description, headings, anchors, links
//! - **Aggregator**: global ranking, co-occurrence graph, presence matrix

mod analyze;
mod error;
mod options;
mod patterns;
mod record;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// HTML sanitation policies and passes.
pub mod sanitizer;

/// Tokenization, n-gram counting and term counters.
pub mod lexical;

/// Punctuation-based sentence splitting.
pub mod sentences;

/// Stop-word sets.
pub mod stopwords;

/// Title, description, headings, anchors and internal links.
pub mod structure;

/// URL resolution and same-site checks.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Cross-document aggregation.
pub mod aggregate;

// Public API - re-exports
pub use aggregate::{AggregateOptions, Aggregation, CooccurrenceGraph, Edge, GlobalRanking, KeywordPresence};
pub use analyze::Analyzer;
pub use error::{Error, Result};
pub use lexical::{LexicalProfile, NgramTables, TermCounter};
pub use options::Options;
pub use record::{
    excerpt, format_frequencies, parse_frequencies, DocumentRecord, RecordStatus, LIST_SEPARATOR, ROW_FIELDS,
};
pub use sanitizer::{clean_html, CleanedHtml, RemovalPolicy, SanitizeReport};
pub use stopwords::StopWords;
pub use structure::Headings;

/// Analyzes an HTML document with default options and French stop words.
///
/// # Example
///
/// ```rust
/// let record = page_lexicon::analyze("<p>Le chat noir mange le poisson.</p>");
/// assert!(record.combined().contains("chat noir"));
/// ```
#[must_use]
pub fn analyze(html: &str) -> DocumentRecord {
    default_analyzer().analyze("", html, None)
}

/// Analyzes an HTML document with custom options and French stop words.
///
/// Fails only when `options` are invalid.
///
/// # Example
///
/// ```rust
/// use page_lexicon::{analyze_with_options, Options};
///
/// let options = Options {
///     n_min: 2,
///     n_max: 2,
///     ..Options::default()
/// };
/// let record = analyze_with_options("<p>Le chat noir mange le poisson.</p>", &options)?;
/// assert_eq!(record.ngrams().len(), 1);
/// # Ok::<(), page_lexicon::Error>(())
/// ```
pub fn analyze_with_options(html: &str, options: &Options) -> Result<DocumentRecord> {
    let analyzer = Analyzer::new(options.clone(), StopWords::french())?;
    Ok(analyzer.analyze("", html, None))
}

/// Analyzes HTML bytes with automatic encoding detection.
///
/// # Example
///
/// ```rust
/// let html = b"<meta charset=\"windows-1252\"><p>Caf\xE9 cr\xE8me</p>";
/// let record = page_lexicon::analyze_bytes(html)?;
/// assert!(record.combined().contains("café"));
/// # Ok::<(), page_lexicon::Error>(())
/// ```
pub fn analyze_bytes(html: &[u8]) -> Result<DocumentRecord> {
    default_analyzer().analyze_bytes("", html, None)
}

/// Aggregates records with default settings.
#[must_use]
pub fn aggregate(records: &[DocumentRecord]) -> Aggregation {
    Aggregation::from_records(records, &AggregateOptions::default())
}

fn default_analyzer() -> Analyzer {
    Analyzer::with_defaults(StopWords::french())
}
