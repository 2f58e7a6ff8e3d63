//! HTML sanitation.
//!
//! One [`RemovalPolicy`] describes everything that is stripped from a
//! tree: whole elements by tag name, stylesheet links, meta refresh,
//! presentation and event-handler attributes, comments and empty `div`
//! containers. Two profiles cover the two uses of the crate:
//!
//! - [`RemovalPolicy::markup`] cleans a page that will be stored or
//!   re-rendered: active content and styling go, structure stays.
//! - [`RemovalPolicy::render_safe_text`] prepares a tree for visible text
//!   extraction: scripts, styles and page chrome (navigation, footers,
//!   forms) go, attributes are left alone.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::dom::{self, Document, Selection};

/// Tags removed by the markup profile.
pub const MARKUP_TAGS: [&str; 5] = ["script", "iframe", "embed", "object", "style"];

/// Tags removed by the text extraction profile.
pub const TEXT_TAGS: [&str; 6] = ["script", "style", "nav", "footer", "form", "noscript"];

/// Descendants that keep an otherwise empty `div` alive.
const EMBEDDED_CONTENT: &str = "img, iframe, embed, object";

/// What a sanitation pass removes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RemovalPolicy {
    /// Remove comment nodes.
    pub remove_comments: bool,

    /// Elements removed together with their content.
    pub remove_tags: BTreeSet<String>,

    /// Remove `<link>` elements that load stylesheets or imports.
    pub remove_stylesheet_links: bool,

    /// Remove `<meta http-equiv="refresh">`.
    pub remove_meta_refresh: bool,

    /// Delete `style` attributes.
    pub strip_style_attributes: bool,

    /// Delete `on*` event-handler attributes.
    pub strip_event_handlers: bool,

    /// Remove `div` elements with no text and no embedded content.
    pub prune_empty_divs: bool,

    /// Leave `img` presentation attributes alone; handlers are still removed.
    pub keep_images: bool,

    /// Collect the text of `<style>` elements before they are removed.
    pub capture_css: bool,
}

impl RemovalPolicy {
    /// Profile for cleaning markup that is kept as HTML.
    #[must_use]
    pub fn markup() -> Self {
        Self {
            remove_comments: true,
            remove_tags: MARKUP_TAGS.iter().map(|t| (*t).to_string()).collect(),
            remove_stylesheet_links: true,
            remove_meta_refresh: true,
            strip_style_attributes: true,
            strip_event_handlers: true,
            prune_empty_divs: true,
            keep_images: false,
            capture_css: false,
        }
    }

    /// Profile for visible text extraction.
    #[must_use]
    pub fn render_safe_text() -> Self {
        Self {
            remove_comments: true,
            remove_tags: TEXT_TAGS.iter().map(|t| (*t).to_string()).collect(),
            remove_stylesheet_links: false,
            remove_meta_refresh: false,
            strip_style_attributes: false,
            strip_event_handlers: false,
            prune_empty_divs: false,
            keep_images: false,
            capture_css: false,
        }
    }

    #[must_use]
    pub fn with_keep_images(mut self, keep: bool) -> Self {
        self.keep_images = keep;
        self
    }

    #[must_use]
    pub fn with_css_capture(mut self, capture: bool) -> Self {
        self.capture_css = capture;
        self
    }

    /// Also remove elements named `tag`.
    #[must_use]
    pub fn with_removed_tag(mut self, tag: &str) -> Self {
        self.remove_tags.insert(tag.to_ascii_lowercase());
        self
    }
}

impl Default for RemovalPolicy {
    fn default() -> Self {
        Self::markup()
    }
}

/// Counts of what a sanitation pass removed, plus captured CSS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    pub comments: usize,
    pub elements: usize,
    pub stylesheet_links: usize,
    pub meta_refresh: usize,
    pub attributes: usize,
    pub empty_divs: usize,
    /// Non-blank `<style>` contents, in document order.
    pub css: Vec<String>,
}

impl SanitizeReport {
    /// Total number of removed nodes and attributes.
    #[must_use]
    pub fn total_removed(&self) -> usize {
        self.comments
            + self.elements
            + self.stylesheet_links
            + self.meta_refresh
            + self.attributes
            + self.empty_divs
    }

    /// Whether the pass found nothing to remove.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.total_removed() == 0
    }

    /// Captured CSS joined by blank lines, if any was captured.
    #[must_use]
    pub fn css_text(&self) -> Option<String> {
        if self.css.is_empty() {
            None
        } else {
            Some(self.css.join("\n\n"))
        }
    }
}

/// Sanitize `doc` in place according to `policy`.
pub fn sanitize(doc: &Document, policy: &RemovalPolicy) -> SanitizeReport {
    let mut report = SanitizeReport::default();

    if policy.remove_comments {
        report.comments = dom::remove_comments(doc);
    }

    if policy.capture_css {
        report.css = doc
            .select("style")
            .nodes()
            .iter()
            .map(|node| node.text().to_string())
            .filter(|css| !css.trim().is_empty())
            .collect();
    }

    if !policy.remove_tags.is_empty() {
        let combined = policy
            .remove_tags
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let selection = doc.select(&combined);
        report.elements = selection.length();
        selection.remove();
    }

    if policy.remove_stylesheet_links {
        report.stylesheet_links = remove_matching(doc, "link", is_stylesheet_link);
    }

    if policy.remove_meta_refresh {
        report.meta_refresh = remove_matching(doc, "meta", is_meta_refresh);
    }

    if policy.strip_style_attributes || policy.strip_event_handlers {
        report.attributes = strip_attributes(doc, policy);
    }

    if policy.prune_empty_divs {
        report.empty_divs = prune_empty_divs(doc);
    }

    debug!(
        comments = report.comments,
        elements = report.elements,
        stylesheet_links = report.stylesheet_links,
        meta_refresh = report.meta_refresh,
        attributes = report.attributes,
        empty_divs = report.empty_divs,
        "Sanitized document"
    );

    report
}

/// Whether a `<link>` loads a stylesheet or an import.
#[must_use]
pub fn is_stylesheet_link(sel: &Selection) -> bool {
    if dom::tag_name(sel).as_deref() != Some("link") {
        return false;
    }

    let rel = dom::attribute_lower(sel, "rel");
    if rel.contains("stylesheet") || rel.contains("import") {
        return true;
    }

    dom::attribute_lower(sel, "href").ends_with(".css") || dom::attribute_lower(sel, "as") == "style"
}

/// Whether a `<meta>` is an HTTP refresh directive.
#[must_use]
pub fn is_meta_refresh(sel: &Selection) -> bool {
    dom::tag_name(sel).as_deref() == Some("meta") && dom::attribute_lower(sel, "http-equiv") == "refresh"
}

fn remove_matching(doc: &Document, tag: &str, matches: fn(&Selection) -> bool) -> usize {
    let mut removed = 0;
    for node in doc.select(tag).nodes() {
        let sel = Selection::from(*node);
        if matches(&sel) {
            sel.remove();
            removed += 1;
        }
    }
    removed
}

fn strip_attributes(doc: &Document, policy: &RemovalPolicy) -> usize {
    let mut removed = 0;

    for node in doc.select("*").nodes() {
        let sel = Selection::from(*node);
        let is_kept_image = policy.keep_images && dom::tag_name(&sel).as_deref() == Some("img");

        for name in dom::attribute_names(&sel) {
            let lower = name.to_ascii_lowercase();
            let is_handler = policy.strip_event_handlers && lower.starts_with("on");
            let is_style = policy.strip_style_attributes && !is_kept_image && lower == "style";

            if is_handler || is_style {
                dom::remove_attribute(&sel, &name);
                removed += 1;
            }
        }
    }

    removed
}

/// Remove `div` elements without text or embedded content.
///
/// Runs children before parents, so a container left empty by the removal
/// of its children is removed as well.
fn prune_empty_divs(doc: &Document) -> usize {
    let mut removed = 0;
    let divs = doc.select("div").nodes().to_vec();

    for node in divs.into_iter().rev() {
        let sel = Selection::from(node);
        if sel.text().trim().is_empty() && !sel.select(EMBEDDED_CONTENT).exists() {
            sel.remove();
            removed += 1;
        }
    }

    removed
}

/// Cleaned markup, ready to be written out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanedHtml {
    /// Serialized document with whitespace-only lines dropped.
    pub html: String,
    /// Captured `<style>` contents with whitespace-only lines dropped.
    pub css: Option<String>,
    pub report: SanitizeReport,
}

/// Parse `html`, sanitize it with `policy` and serialize the result.
#[must_use]
pub fn clean_html(html: &str, policy: &RemovalPolicy) -> CleanedHtml {
    let doc = dom::parse(html);
    let report = sanitize(&doc, policy);

    CleanedHtml {
        html: strip_blank_lines(&doc.html()),
        css: report.css_text().map(|css| strip_blank_lines(&css)),
        report,
    }
}

/// Drop whitespace-only lines; a non-empty result ends with a newline.
#[must_use]
pub fn strip_blank_lines(text: &str) -> String {
    let kept: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    if kept.is_empty() {
        String::new()
    } else {
        let mut out = kept.join("\n");
        out.push('\n');
        out
    }
}
