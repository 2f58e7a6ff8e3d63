//! Per-document analysis pipeline.
//!
//! parse → outline (title, description, headings, anchors) → sanitize
//! (text profile) → internal links + visible text → lexical profile → key
//! sentences → record.

use std::path::Path;

use tracing::{debug, warn};

use crate::dom;
use crate::encoding;
use crate::error::Result;
use crate::lexical::LexicalProfile;
use crate::options::Options;
use crate::record::{self, DocumentRecord, RecordParts};
use crate::sanitizer::{self, RemovalPolicy};
use crate::sentences;
use crate::stopwords::StopWords;
use crate::structure;

/// Analyzes documents with fixed options and stop words.
///
/// An `Analyzer` holds no per-document state: one instance can be shared by
/// reference across worker threads, each call parsing its own tree.
#[derive(Debug, Clone)]
pub struct Analyzer {
    options: Options,
    stop_words: StopWords,
    policy: RemovalPolicy,
}

impl Analyzer {
    /// Build an analyzer after validating `options`.
    pub fn new(options: Options, stop_words: StopWords) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            stop_words,
            policy: RemovalPolicy::render_safe_text(),
        })
    }

    /// Build an analyzer with [`Options::default`], which always validates.
    #[must_use]
    pub fn with_defaults(stop_words: StopWords) -> Self {
        Self {
            options: Options::default(),
            stop_words,
            policy: RemovalPolicy::render_safe_text(),
        }
    }

    /// Replace the sanitation policy applied before extraction.
    #[must_use]
    pub fn with_policy(mut self, policy: RemovalPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Analyze one HTML document.
    ///
    /// `identifier` names the document in the record (URL or path);
    /// `base_url` drives internal link resolution.
    #[must_use]
    pub fn analyze(&self, identifier: &str, html: &str, base_url: Option<&str>) -> DocumentRecord {
        let doc = dom::parse(html);

        // Outline is read before page chrome goes; links and text after
        let title = structure::extract_title(&doc);
        let meta_description = structure::extract_meta_description(&doc);
        let headings = structure::extract_headings(&doc);
        let internal_anchors = structure::extract_internal_anchors(&doc);

        sanitizer::sanitize(&doc, &self.policy);
        let internal_links = structure::extract_internal_links(&doc, base_url);

        let text = dom::visible_text(&doc);
        let profile = LexicalProfile::build(&text, &self.options, &self.stop_words);
        let key_sentences =
            sentences::key_sentences(&text, self.options.min_sentence_words, self.options.max_sentences);

        debug!(
            identifier,
            text_chars = text.len(),
            terms = profile.combined.len(),
            links = internal_links.len(),
            sentences = key_sentences.len(),
            "Analyzed document"
        );

        DocumentRecord::from_parts(RecordParts {
            identifier: identifier.to_string(),
            title,
            headings,
            meta_description,
            internal_anchors,
            internal_links,
            ngrams: profile.ngrams,
            combined: profile.combined,
            top_terms: profile.top_terms,
            key_sentences,
            excerpt: record::excerpt(&text, self.options.excerpt_chars),
        })
    }

    /// Analyze a document given as raw bytes, detecting its encoding.
    ///
    /// Fails with [`Error::NotText`](crate::Error::NotText) when the bytes
    /// are binary.
    pub fn analyze_bytes(&self, identifier: &str, html: &[u8], base_url: Option<&str>) -> Result<DocumentRecord> {
        let text = encoding::decode_document(html)?;
        Ok(self.analyze(identifier, &text, base_url))
    }

    /// Read and analyze a local file, named by its path.
    pub fn analyze_file(&self, path: impl AsRef<Path>, base_url: Option<&str>) -> Result<DocumentRecord> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        self.analyze_bytes(&path.display().to_string(), &bytes, base_url)
    }

    /// Analyze raw bytes, turning a failure into a placeholder record.
    #[must_use]
    pub fn analyze_or_placeholder(&self, identifier: &str, html: &[u8], base_url: Option<&str>) -> DocumentRecord {
        self.analyze_bytes(identifier, html, base_url).unwrap_or_else(|err| {
            warn!(identifier, error = %err, "Document analysis failed");
            DocumentRecord::failed(identifier, err.to_string())
        })
    }
}
