//! Page sink traits and types
//!
//! A sink is notified once per successfully parsed page, in fetch order.
//! The crawl never waits for a sink to finish processing a page.

use scraper::Html;
use tokio::sync::mpsc;

/// One successfully fetched and parsed page
#[derive(Debug)]
pub struct PageRecord {
    /// The URL the page was fetched from
    pub url: String,

    /// The parsed document
    pub document: Html,
}

impl PageRecord {
    pub fn new(url: impl Into<String>, document: Html) -> Self {
        Self {
            url: url.into(),
            document,
        }
    }
}

/// Trait for consumers of crawled pages
pub trait PageSink {
    /// Called once per parsed page, before that page's links are queued
    fn page_loaded(&mut self, page: PageRecord);
}

/// Collects every page in memory
impl PageSink for Vec<PageRecord> {
    fn page_loaded(&mut self, page: PageRecord) {
        self.push(page);
    }
}

impl<S: PageSink + ?Sized> PageSink for &mut S {
    fn page_loaded(&mut self, page: PageRecord) {
        (**self).page_loaded(page);
    }
}

/// Adapts a closure into a sink
pub struct FnSink<F>(pub F);

impl<F: FnMut(PageRecord)> PageSink for FnSink<F> {
    fn page_loaded(&mut self, page: PageRecord) {
        (self.0)(page);
    }
}

/// Forwards pages over an unbounded channel
///
/// Sending never blocks the crawl. If the receiving side has gone away the
/// page is dropped and the crawl carries on.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<PageRecord>,
}

impl ChannelSink {
    /// Creates a sink and the receiver that pages will arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PageRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl PageSink for ChannelSink {
    fn page_loaded(&mut self, page: PageRecord) {
        if let Err(e) = self.tx.send(page) {
            tracing::debug!("Page receiver closed, dropping {}", e.0.url);
        }
    }
}
