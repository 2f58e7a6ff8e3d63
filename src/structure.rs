//! Page structure: title, meta description, headings, anchors and internal
//! links.
//!
//! Every function here is a pure read of the tree.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dom::{self, Document, Selection};
use crate::url_utils;

/// Heading texts by level, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
}

/// Text of the first `<title>`, trimmed.
#[must_use]
pub fn extract_title(doc: &Document) -> String {
    dom::normalized_text(&doc.select("title"))
}

/// Content of the first `meta[name=description]`, else of the first
/// `og:description`.
///
/// A description tag that exists but is empty wins over `og:description`.
#[must_use]
pub fn extract_meta_description(doc: &Document) -> String {
    let metas: Vec<Selection> = doc
        .select("meta")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect();
    let find = |attr: &str, value: &str| {
        metas
            .iter()
            .find(|meta| dom::attribute_lower(meta, attr) == value)
    };

    find("name", "description")
        .or_else(|| find("property", "og:description"))
        .and_then(|meta| dom::get_attribute(meta, "content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

/// Text of every h1, h2 and h3.
#[must_use]
pub fn extract_headings(doc: &Document) -> Headings {
    let texts = |tag: &str| -> Vec<String> {
        doc.select(tag)
            .nodes()
            .iter()
            .map(|node| dom::normalized_text(&Selection::from(*node)))
            .collect()
    };

    Headings {
        h1: texts("h1"),
        h2: texts("h2"),
        h3: texts("h3"),
    }
}

/// Text of links pointing into the page itself (`href` starting with `#`).
#[must_use]
pub fn extract_internal_anchors(doc: &Document) -> Vec<String> {
    doc.select("a[href]")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|a| dom::get_attribute(a, "href").is_some_and(|href| href.starts_with('#')))
        .map(|a| dom::normalized_text(&a))
        .collect()
}

/// Links to other pages of the same site, deduplicated and sorted.
///
/// With a base URL, each `href` is resolved against it and kept when the
/// result has the same network location. Without one, only root-relative
/// paths (`/...`) are kept, as written. An unparseable base URL is treated
/// as absent.
#[must_use]
pub fn extract_internal_links(doc: &Document, base_url: Option<&str>) -> Vec<String> {
    let base = base_url.and_then(|raw| {
        let parsed = url_utils::parse_base_url(raw);
        if parsed.is_none() {
            warn!(base_url = raw, "Ignoring unparseable base URL");
        }
        parsed
    });

    let mut links = BTreeSet::new();

    for node in doc.select("a[href]").nodes() {
        let a = Selection::from(*node);
        let href = dom::get_attribute(&a, "href").unwrap_or_default();
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        match &base {
            Some(base) => {
                if let Some(resolved) = url_utils::resolve(href, base) {
                    if url_utils::same_network_location(&resolved, base) {
                        links.insert(String::from(resolved));
                    }
                }
            }
            None => {
                if href.starts_with('/') {
                    links.insert(href.to_string());
                }
            }
        }
    }

    links.into_iter().collect()
}
