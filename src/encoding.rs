//! Character encoding detection and transcoding.
//!
//! Pages saved to disk arrive as raw bytes. This module detects the charset
//! from HTML meta tags, converts to UTF-8, and rejects input that is not
//! text at all.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Number of leading bytes inspected for charset declarations and binary
/// content.
const SNIFF_LEN: usize = 1024;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>/]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Detect character encoding from HTML bytes.
///
/// Looks for, in order: a byte order mark, `<meta charset="...">`, then
/// `<meta http-equiv="Content-Type" content="...; charset=...">`.
/// Defaults to UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }

    let head = &html[..html.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);

    let declared = CHARSET_META_RE
        .captures(&head_str)
        .or_else(|| CONTENT_TYPE_CHARSET_RE.captures(&head_str))
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()));

    declared.unwrap_or(UTF_8)
}

/// Transcode HTML bytes to a UTF-8 string.
///
/// Invalid sequences are replaced with U+FFFD rather than causing errors.
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    let (decoded, _encoding_used, _had_errors) = encoding.decode(html);
    decoded.into_owned()
}

/// Decode a document, refusing input that is clearly binary.
///
/// NUL bytes in the first kilobyte never occur in HTML served as an 8-bit
/// encoding; UTF-16 documents are recognised by their byte order mark.
pub fn decode_document(html: &[u8]) -> Result<String> {
    let is_utf16 = matches!(Encoding::for_bom(html), Some((e, _)) if e == UTF_16LE || e == UTF_16BE);
    let head = &html[..html.len().min(SNIFF_LEN)];

    if !is_utf16 && head.contains(&0) {
        return Err(Error::NotText(format!(
            "NUL byte within the first {} bytes",
            head.len()
        )));
    }

    Ok(transcode_to_utf8(html))
}
