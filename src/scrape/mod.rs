//! DOM query helpers over a parsed page
//!
//! Every query is read-only and never fails: a selector that matches nothing,
//! an invalid selector, a missing attribute or an unparseable number all
//! produce an empty string, `false` or zero.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(\.\d{2})?").unwrap());
static INT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Query helper borrowing a parsed document
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use sitewalk::Scraper;
///
/// let document = Html::parse_document(r#"<p class="price">$1,299.99</p>"#);
/// let scraper = Scraper::new(&document);
/// assert_eq!(scraper.float(".price"), 1299.99);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Scraper<'a> {
    document: &'a Html,
}

impl<'a> Scraper<'a> {
    pub fn new(document: &'a Html) -> Self {
        Self { document }
    }

    /// Returns true if `selector` matches at least one element
    pub fn exists(&self, selector: &str) -> bool {
        self.first(selector).is_some()
    }

    /// Trimmed text of all matching elements, concatenated
    pub fn text(&self, selector: &str) -> String {
        let Some(parsed) = parse_selector(selector) else {
            return String::new();
        };

        let text: String = self
            .document
            .select(&parsed)
            .flat_map(|element| element.text())
            .collect();

        text.trim().to_string()
    }

    /// Inner HTML of the first matching element
    pub fn html(&self, selector: &str) -> String {
        self.first(selector)
            .map(|element| element.inner_html())
            .unwrap_or_default()
    }

    /// Value of `name` on the first matching element
    pub fn attr(&self, selector: &str, name: &str) -> String {
        self.first(selector)
            .and_then(|element| element.value().attr(name))
            .unwrap_or_default()
            .to_string()
    }

    /// Floating point value found in the text of the matching elements
    pub fn float(&self, selector: &str) -> f64 {
        if !self.exists(selector) {
            return 0.0;
        }
        to_float(&self.text(selector))
    }

    /// Integer value found in the text of the matching elements
    pub fn int(&self, selector: &str) -> i64 {
        if !self.exists(selector) {
            return 0;
        }
        to_int(&self.text(selector))
    }

    /// Converts arbitrary text to a floating point value
    pub fn to_float(&self, input: &str) -> f64 {
        to_float(input)
    }

    /// Converts arbitrary text to an integer value
    pub fn to_int(&self, input: &str) -> i64 {
        to_int(input)
    }

    fn first(&self, selector: &str) -> Option<ElementRef<'a>> {
        let parsed = parse_selector(selector)?;
        self.document.select(&parsed).next()
    }
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::debug!("Invalid selector '{}': {:?}", selector, e);
            None
        }
    }
}

/// Parses the first number in `input`, ignoring thousands separators
///
/// Only a two-digit fractional part is recognized as cents; `"3.5"` reads as `3.0`.
pub fn to_float(input: &str) -> f64 {
    let cleaned = input.replace(',', "");

    FLOAT_PATTERN
        .find(&cleaned)
        .and_then(|found| found.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Parses the first run of digits in `input`, ignoring thousands separators
pub fn to_int(input: &str) -> i64 {
    let cleaned = input.replace(',', "");

    INT_PATTERN
        .find(&cleaned)
        .and_then(|found| found.as_str().parse::<i64>().ok())
        .unwrap_or(0)
}
