//! HTML parsing and link/canonical resolution
//!
//! This module turns a fetched body into a document and derives from it:
//! - The href of the page's `<link rel="canonical">`
//! - The same-origin links to add to the frontier (`<a href>`)
//!
//! Everything here is a pure function of the document, the origin and the
//! crawl settings.

use crate::config::InvalidLinkPolicy;
use crate::url::{resolve_href, scope_link, Origin};
use crate::UrlError;
use scraper::{Html, Selector};

/// Parses a fetched body into a document
///
/// The tree builder recovers from malformed markup on its own, so every
/// body yields a document.
///
/// # Example
///
/// ```
/// use sitewalk::crawler::{extract_anchor_hrefs, parse_document};
///
/// let document = parse_document("<html><body><a href=\"/a\">A</a></body></html>");
/// assert_eq!(extract_anchor_hrefs(&document), vec!["/a"]);
/// ```
pub fn parse_document(body: &str) -> Html {
    Html::parse_document(body)
}

/// Returns the href of the first `<link rel="canonical">`, if it has one
pub fn extract_canonical_href(document: &Html) -> Option<&str> {
    let selector = Selector::parse("link[rel='canonical']").ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("href"))
}

/// Returns the raw href of every anchor, in document order
pub fn extract_anchor_hrefs(document: &Html) -> Vec<&str> {
    let mut hrefs = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                hrefs.push(href);
            }
        }
    }

    hrefs
}

/// Resolves and scopes every anchor of a document
///
/// # Link Rules
///
/// - `/path` → `origin + /path`
/// - not starting with `http` → discarded
/// - other host than the origin → discarded
/// - same host → kept, with the query string removed when `ignore_query` is set
///
/// # Returns
///
/// * `Ok(Vec<String>)` - In-scope links
/// * `Err(UrlError::InvalidLink)` - A link could not be parsed and the policy is `Abort`
pub fn collect_links(
    document: &Html,
    origin: &Origin,
    ignore_query: bool,
    policy: InvalidLinkPolicy,
) -> Result<Vec<String>, UrlError> {
    let mut links = Vec::new();

    for href in extract_anchor_hrefs(document) {
        let Some(resolved) = resolve_href(href, origin) else {
            continue;
        };

        match scope_link(&resolved, origin, ignore_query) {
            Ok(Some(link)) => links.push(link),
            Ok(None) => {}
            Err(e) => match policy {
                InvalidLinkPolicy::Abort => return Err(e),
                InvalidLinkPolicy::Skip => tracing::warn!("Skipping link: {}", e),
            },
        }
    }

    Ok(links)
}
