//! DOM operations adapter
//!
//! Thin helpers over the `dom_query` crate used by the sanitizer and the
//! extractors. Parsing goes through html5ever's error-recovering tree
//! builder, so any string yields a document.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

use crate::patterns::WHITESPACE;

// === Parsing ===

/// Parse an HTML string into a document.
///
/// Never fails: unclosed tags, invalid nesting and stray markup are repaired
/// the way browsers repair them.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get an attribute value, lowercased, or an empty string when absent.
#[must_use]
pub fn attribute_lower(sel: &Selection, name: &str) -> String {
    sel.attr(name).map(|s| s.to_lowercase()).unwrap_or_default()
}

/// Remove an attribute
#[inline]
pub fn remove_attribute(sel: &Selection, name: &str) {
    sel.remove_attr(name);
}

/// Names of all attributes on the first node of the selection.
#[must_use]
pub fn attribute_names(sel: &Selection) -> Vec<String> {
    sel.nodes()
        .first()
        .map(|node| {
            node.attrs()
                .iter()
                .map(|attr| attr.name.local.to_string())
                .collect()
        })
        .unwrap_or_default()
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

// === Tree Manipulation ===

/// Remove every comment node from the document.
///
/// Returns the number of comments removed.
pub fn remove_comments(doc: &Document) -> usize {
    let comments: Vec<NodeRef> = doc
        .root()
        .descendants()
        .into_iter()
        .filter(NodeRef::is_comment)
        .collect();

    for comment in &comments {
        comment.remove_from_parent();
    }
    comments.len()
}

// === Text Content ===

/// Collapse whitespace runs to a single space and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Text content of the first node of the selection, whitespace-collapsed.
#[must_use]
pub fn normalized_text(sel: &Selection) -> String {
    sel.nodes()
        .first()
        .map(|node| collapse_whitespace(&node.text()))
        .unwrap_or_default()
}

/// All text of the document, one space between text nodes, whitespace
/// collapsed.
///
/// Text nodes are joined with a separator so that `<p>a</p><p>b</p>` reads
/// `a b` rather than `ab`. Comment nodes never contribute.
#[must_use]
pub fn visible_text(doc: &Document) -> String {
    let Some(root) = doc.select("html").nodes().first().copied() else {
        return String::new();
    };

    let mut buffer = String::new();
    for node in root.descendants() {
        if node.is_text() {
            buffer.push_str(&node.text());
            buffer.push(' ');
        }
    }
    collapse_whitespace(&buffer)
}
