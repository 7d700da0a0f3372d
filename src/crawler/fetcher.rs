//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client (user agent, timeouts, certificate trust policy)
//! - Issuing a single GET per URL
//! - Decoding the body with the charset the response declares
//! - Turning every transport or read failure into an empty body
//!
//! There is no retry. A failed fetch is logged and reported as "nothing to parse".

use crate::config::HttpConfig;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with the crawl's transport settings
///
/// Invalid and self-signed certificates are accepted unless the
/// configuration turns that off, because the sites being walked are not
/// controlled by whoever runs the crawl.
///
/// # Example
///
/// ```no_run
/// use sitewalk::config::HttpConfig;
/// use sitewalk::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs one GET per URL and never fails
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches the body of `url` as text
    ///
    /// The body is decoded with the `charset` of the `Content-Type` header,
    /// falling back to UTF-8; undecodable bytes become U+FFFD. Any transport
    /// or read error is logged and yields an empty body. The HTTP status is
    /// not inspected beyond logging: an error page's body is returned like
    /// any other.
    pub async fn fetch(&self, url: &str) -> String {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("GET {} failed: {}", url, e);
                return String::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("{} answered with HTTP {}", url, status.as_u16());
        }

        match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Reading body of {} failed: {}", url, e);
                String::new()
            }
        }
    }
}
