use crate::url::Origin;
use crate::UrlError;
use url::{ParseError, Url};

/// Resolves a raw anchor href against the crawl origin
///
/// # Resolution Rules
///
/// 1. Root-relative (`/path`) → `origin + path`
/// 2. Anything that does not start with `http` is discarded
///    (relative paths, fragments, `mailto:`, `javascript:`, ...)
/// 3. Everything else is kept verbatim
///
/// # Examples
///
/// ```
/// use sitewalk::url::{resolve_href, Origin};
///
/// let origin = Origin::parse("https://x.com/").unwrap();
/// assert_eq!(resolve_href("/a", &origin), Some("https://x.com/a".to_string()));
/// assert_eq!(resolve_href("a.html", &origin), None);
/// ```
pub fn resolve_href(href: &str, origin: &Origin) -> Option<String> {
    if href.starts_with('/') {
        Some(origin.join(href))
    } else if href.starts_with("http") {
        Some(href.to_string())
    } else {
        None
    }
}

/// Decides whether a resolved link belongs in the frontier
///
/// # Arguments
///
/// * `resolved` - A link already passed through [`resolve_href`]
/// * `origin` - The crawl origin
/// * `ignore_query` - Strip the query string before returning the link
///
/// # Returns
///
/// * `Ok(Some(String))` - Same-host link, in the form it should be queued
/// * `Ok(None)` - Link is on another host (or has no host at all)
/// * `Err(UrlError::InvalidLink)` - Link could not be parsed
pub fn scope_link(
    resolved: &str,
    origin: &Origin,
    ignore_query: bool,
) -> Result<Option<String>, UrlError> {
    let parsed = match Url::parse(resolved) {
        Ok(url) => url,
        // Hostless references like "httpdocs/page" can never match the origin
        Err(ParseError::RelativeUrlWithoutBase) => return Ok(None),
        Err(e) => {
            return Err(UrlError::InvalidLink {
                href: resolved.to_string(),
                message: e.to_string(),
            })
        }
    };

    if !origin.is_same_host(&parsed) {
        return Ok(None);
    }

    if ignore_query {
        Ok(Some(strip_query(parsed)))
    } else {
        Ok(Some(resolved.to_string()))
    }
}

/// Removes the query string from a URL, keeping everything else
///
/// # Examples
///
/// ```
/// use sitewalk::url::strip_query;
/// use url::Url;
///
/// let url = Url::parse("https://x.com/list?page=2").unwrap();
/// assert_eq!(strip_query(url), "https://x.com/list");
/// ```
pub fn strip_query(mut url: Url) -> String {
    url.set_query(None);
    url.to_string()
}

/// Resolves the canonical identity of a fetched page
///
/// Defaults to the fetch URL. A canonical href that is already absolute is
/// used as-is; anything else is appended to the origin.
pub fn resolve_canonical(canonical_href: Option<&str>, fetch_url: &str, origin: &Origin) -> String {
    match canonical_href {
        Some(href) if href.starts_with("http") => href.to_string(),
        Some(href) => origin.join(href),
        None => fetch_url.to_string(),
    }
}
