//! Per-document analysis record.
//!
//! A [`DocumentRecord`] is built once per input page and only read
//! afterwards: fields are private and exposed through accessors.

use serde::Serialize;

use crate::lexical::{self, NgramTables, TermCounter};
use crate::structure::Headings;

/// Separator used when list fields are flattened to a single string.
pub const LIST_SEPARATOR: &str = " | ";

/// Number of n-grams per order shown in the flattened n-gram summary.
pub const SUMMARY_PER_ORDER: usize = 10;

/// Column names of [`DocumentRecord::to_row`], in order.
pub const ROW_FIELDS: [&str; 13] = [
    "URL",
    "Title",
    "H1",
    "H2",
    "H3",
    "Meta description",
    "Internal anchors",
    "Top keywords",
    "N-grams",
    "Frequencies",
    "Internal links",
    "Key sentences",
    "Excerpt",
];

/// Whether a record holds real analysis results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Ok,
    /// The document could not be analyzed; the record is a placeholder.
    Failed { reason: String },
}

/// Everything extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    identifier: String,
    title: String,
    headings: Headings,
    meta_description: String,
    internal_anchors: Vec<String>,
    internal_links: Vec<String>,
    ngrams: NgramTables,
    combined: TermCounter,
    top_terms: Vec<String>,
    key_sentences: Vec<String>,
    excerpt: String,
    status: RecordStatus,
}

/// Field values for a successfully analyzed document.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordParts {
    pub identifier: String,
    pub title: String,
    pub headings: Headings,
    pub meta_description: String,
    pub internal_anchors: Vec<String>,
    pub internal_links: Vec<String>,
    pub ngrams: NgramTables,
    pub combined: TermCounter,
    pub top_terms: Vec<String>,
    pub key_sentences: Vec<String>,
    pub excerpt: String,
}

impl DocumentRecord {
    pub(crate) fn from_parts(parts: RecordParts) -> Self {
        Self {
            identifier: parts.identifier,
            title: parts.title,
            headings: parts.headings,
            meta_description: parts.meta_description,
            internal_anchors: parts.internal_anchors,
            internal_links: parts.internal_links,
            ngrams: parts.ngrams,
            combined: parts.combined,
            top_terms: parts.top_terms,
            key_sentences: parts.key_sentences,
            excerpt: parts.excerpt,
            status: RecordStatus::Ok,
        }
    }

    /// Placeholder for a document that could not be analyzed.
    ///
    /// The document stays in the batch with an `ERROR:` title and empty
    /// fields, so batch counts remain truthful.
    #[must_use]
    pub fn failed(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            identifier: identifier.into(),
            title: format!("ERROR: {reason}"),
            status: RecordStatus::Failed { reason },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn headings(&self) -> &Headings {
        &self.headings
    }

    #[must_use]
    pub fn meta_description(&self) -> &str {
        &self.meta_description
    }

    #[must_use]
    pub fn internal_anchors(&self) -> &[String] {
        &self.internal_anchors
    }

    /// Sorted, deduplicated internal links.
    #[must_use]
    pub fn internal_links(&self) -> &[String] {
        &self.internal_links
    }

    /// One counter per n-gram order.
    #[must_use]
    pub fn ngrams(&self) -> &NgramTables {
        &self.ngrams
    }

    /// Counts of every n-gram of every order.
    #[must_use]
    pub fn combined(&self) -> &TermCounter {
        &self.combined
    }

    #[must_use]
    pub fn top_terms(&self) -> &[String] {
        &self.top_terms
    }

    #[must_use]
    pub fn key_sentences(&self) -> &[String] {
        &self.key_sentences
    }

    #[must_use]
    pub fn excerpt(&self) -> &str {
        &self.excerpt
    }

    #[must_use]
    pub fn status(&self) -> &RecordStatus {
        &self.status
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.status, RecordStatus::Failed { .. })
    }

    /// Flatten to string fields in [`ROW_FIELDS`] order.
    ///
    /// Lists are joined with [`LIST_SEPARATOR`]; the combined counter is
    /// rendered by [`format_frequencies`].
    #[must_use]
    pub fn to_row(&self) -> Vec<(&'static str, String)> {
        let values = [
            self.identifier.clone(),
            self.title.clone(),
            self.headings.h1.join(LIST_SEPARATOR),
            self.headings.h2.join(LIST_SEPARATOR),
            self.headings.h3.join(LIST_SEPARATOR),
            self.meta_description.clone(),
            self.internal_anchors.join(LIST_SEPARATOR),
            self.top_terms.join(LIST_SEPARATOR),
            lexical::ngram_summary(&self.ngrams, SUMMARY_PER_ORDER),
            if self.is_failed() {
                String::new()
            } else {
                format_frequencies(&self.combined)
            },
            self.internal_links.join(LIST_SEPARATOR),
            self.key_sentences.join(LIST_SEPARATOR),
            self.excerpt.clone(),
        ];
        ROW_FIELDS.into_iter().zip(values).collect()
    }
}

/// The first `max_chars` characters of `text`, with `...` appended when
/// anything was cut.
#[must_use]
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Render a counter as a literal mapping: `{'chat noir': 2, "l'été": 1}`.
///
/// Terms are quoted with single quotes unless they contain one and no
/// double quote; backslashes and the chosen quote are escaped.
#[must_use]
pub fn format_frequencies(counter: &TermCounter) -> String {
    let entries: Vec<String> = counter
        .iter()
        .map(|(term, count)| format!("{}: {count}", quote_literal(term)))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

fn quote_literal(term: &str) -> String {
    let quote = if term.contains('\'') && !term.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(term.len() + 2);
    out.push(quote);
    for c in term.chars() {
        if c == '\\' || c == quote {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(quote);
    out
}

/// Parse a mapping produced by [`format_frequencies`].
///
/// Returns `None` for anything that is not a well-formed literal.
#[must_use]
pub fn parse_frequencies(literal: &str) -> Option<TermCounter> {
    let mut chars = literal.trim().chars().peekable();
    let mut counter = TermCounter::new();

    if chars.next()? != '{' {
        return None;
    }

    loop {
        skip_spaces(&mut chars);
        match chars.peek()? {
            '}' => {
                chars.next();
                break;
            }
            '\'' | '"' => {}
            _ => return None,
        }

        let term = read_quoted(&mut chars)?;
        skip_spaces(&mut chars);
        if chars.next()? != ':' {
            return None;
        }
        skip_spaces(&mut chars);

        let mut digits = String::new();
        while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
            digits.push(c);
            chars.next();
        }
        counter.add(&term, digits.parse().ok()?);

        skip_spaces(&mut chars);
        match chars.next()? {
            ',' => {}
            '}' => break,
            _ => return None,
        }
    }

    // Nothing may follow the closing brace
    skip_spaces(&mut chars);
    chars.next().is_none().then_some(counter)
}

fn skip_spaces(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn read_quoted(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let quote = chars.next()?;
    let mut out = String::new();
    loop {
        match chars.next()? {
            '\\' => out.push(chars.next()?),
            c if c == quote => return Some(out),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_placeholder() {
        let record = DocumentRecord::failed("https://example.com/x", "timeout");
        assert!(record.is_failed());
        assert_eq!(record.title(), "ERROR: timeout");
        assert_eq!(record.identifier(), "https://example.com/x");
        assert!(record.top_terms().is_empty());
        assert!(record.combined().is_empty());

        let row = record.to_row();
        assert_eq!(row[0], ("URL", "https://example.com/x".to_string()));
        assert!(row.iter().skip(2).all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_row_flattens_lists() {
        let record = DocumentRecord::from_parts(RecordParts {
            identifier: "page.html".to_string(),
            headings: Headings {
                h1: vec!["One".to_string(), "Two".to_string()],
                ..Headings::default()
            },
            top_terms: vec!["chat".to_string(), "noir".to_string()],
            combined: ["chat", "noir", "chat"].into_iter().collect(),
            ..RecordParts::default()
        });

        let row = record.to_row();
        assert_eq!(row.len(), ROW_FIELDS.len());
        assert_eq!(row[2], ("H1", "One | Two".to_string()));
        assert_eq!(row[7], ("Top keywords", "chat | noir".to_string()));
        assert_eq!(row[9], ("Frequencies", "{'chat': 2, 'noir': 1}".to_string()));
    }

    #[test]
    fn test_excerpt_truncates_on_characters() {
        assert_eq!(excerpt("éléphant", 3), "élé...");
        assert_eq!(excerpt("court", 10), "court");
        assert_eq!(excerpt("exact", 5), "exact");
        assert_eq!(excerpt("", 5), "");
    }

    #[test]
    fn test_frequencies_literal_quoting() {
        let counter: TermCounter = ["l'été", "dit \"non\"", "a\\b"].into_iter().collect();
        assert_eq!(
            format_frequencies(&counter),
            r#"{"l'été": 1, 'dit "non"': 1, 'a\\b': 1}"#
        );
        assert_eq!(format_frequencies(&TermCounter::new()), "{}");
    }

    #[test]
    fn test_parse_frequencies_reads_formatted_literal() {
        let counter: TermCounter = ["chat noir", "l'été", "chat noir", "it's \"x\""].into_iter().collect();
        let parsed = parse_frequencies(&format_frequencies(&counter)).unwrap();
        assert_eq!(parsed, counter);
        assert_eq!(parse_frequencies("{}"), Some(TermCounter::new()));
    }

    #[test]
    fn test_parse_frequencies_rejects_malformed() {
        assert!(parse_frequencies("").is_none());
        assert!(parse_frequencies("{'a': }").is_none());
        assert!(parse_frequencies("{'a' 1}").is_none());
        assert!(parse_frequencies("{'a': 1").is_none());
        assert!(parse_frequencies("{'a': 1} extra").is_none());
        assert!(parse_frequencies("{a: 1}").is_none());
    }
}
