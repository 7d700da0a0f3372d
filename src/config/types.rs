use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for a crawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// URL the crawl starts from; its scheme and host define the origin
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Global ceiling on the number of fetches across the whole crawl
    #[serde(rename = "max-fetches")]
    pub max_fetches: u32,

    /// Pause applied before every fetch (milliseconds, 0 = none)
    #[serde(rename = "request-delay-ms", default)]
    pub request_delay_ms: u64,

    /// Drop the query string from discovered links before queueing them
    #[serde(rename = "ignore-query-params", default)]
    pub ignore_query_params: bool,

    /// What to do with a discovered link that cannot be parsed
    #[serde(rename = "on-invalid-link", default)]
    pub on_invalid_link: InvalidLinkPolicy,
}

/// Handling of discovered links whose URL cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidLinkPolicy {
    /// Stop the whole crawl with an error
    #[default]
    Abort,
    /// Log the link and continue with the next one
    Skip,
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Accept servers presenting invalid or self-signed certificates
    #[serde(rename = "accept-invalid-certs", default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,
}

fn default_user_agent() -> String {
    format!("sitewalk/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_accept_invalid_certs() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            accept_invalid_certs: default_accept_invalid_certs(),
        }
    }
}

impl Config {
    /// Creates a configuration with default HTTP settings, no delay and
    /// query strings preserved
    pub fn new(start_url: impl Into<String>, max_fetches: u32) -> Self {
        Self {
            crawl: CrawlConfig {
                start_url: start_url.into(),
                max_fetches,
                request_delay_ms: 0,
                ignore_query_params: false,
                on_invalid_link: InvalidLinkPolicy::default(),
            },
            http: HttpConfig::default(),
        }
    }

    pub fn with_request_delay(mut self, delay_ms: u64) -> Self {
        self.crawl.request_delay_ms = delay_ms;
        self
    }

    pub fn with_ignore_query_params(mut self, ignore: bool) -> Self {
        self.crawl.ignore_query_params = ignore;
        self
    }

    pub fn with_invalid_link_policy(mut self, policy: InvalidLinkPolicy) -> Self {
        self.crawl.on_invalid_link = policy;
        self
    }

    /// The inter-request delay as a `Duration`
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.crawl.request_delay_ms)
    }
}
