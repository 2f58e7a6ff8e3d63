//! URL Utility Functions
//!
//! Resolution of link targets against a page URL and same-site checks used
//! by the internal link extractor.

use url::{Position, Url};

/// Parse a base URL. Only absolute URLs with a host qualify.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_base_url(url_str: &str) -> Option<Url> {
    let url = Url::parse(url_str.trim()).ok()?;
    url.host().is_some().then_some(url)
}

/// The network location of a URL: userinfo, host and port, as written
/// between `//` and the path.
///
/// ```
/// use page_lexicon::url_utils::{network_location, parse_base_url};
///
/// let url = parse_base_url("https://user@example.com:8443/a?q#f").unwrap();
/// assert_eq!(network_location(&url), "user@example.com:8443");
/// ```
#[must_use]
pub fn network_location(url: &Url) -> &str {
    &url[Position::BeforeUsername..Position::AfterPort]
}

/// Resolve `href` against `base`.
///
/// Absolute references are returned as parsed; relative ones are joined the
/// way a browser would follow them.
#[must_use]
pub fn resolve(href: &str, base: &Url) -> Option<Url> {
    base.join(href.trim()).ok()
}

/// Whether `url` lives on the same network location as `base`.
#[must_use]
pub fn same_network_location(url: &Url, base: &Url) -> bool {
    network_location(url) == network_location(base)
}
