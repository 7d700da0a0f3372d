use crate::UrlError;
use std::fmt;
use url::Url;

/// Scheme and host of the crawl's start URL
///
/// The origin is fixed once, on the first fetch of a crawl, and defines the
/// same-site scope for link following. The port is kept when the start URL
/// names one explicitly, so `http://127.0.0.1:8080` and `http://127.0.0.1`
/// are different origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    scheme: String,
    host: String,
    port: Option<u16>,
    effective_port: Option<u16>,
    serialized: String,
}

impl Origin {
    /// Establishes the origin from a start URL string
    ///
    /// # Returns
    ///
    /// * `Ok(Origin)` - The scheme + host of the URL
    /// * `Err(UrlError)` - The URL is unparseable or has no host
    ///
    /// # Examples
    ///
    /// ```
    /// use sitewalk::url::Origin;
    ///
    /// let origin = Origin::parse("https://example.com/docs/index.html").unwrap();
    /// assert_eq!(origin.as_str(), "https://example.com");
    /// ```
    pub fn parse(start_url: &str) -> Result<Self, UrlError> {
        let url = Url::parse(start_url)
            .map_err(|e| UrlError::Parse(format!("'{}': {}", start_url, e)))?;
        Self::from_url(&url)
    }

    /// Establishes the origin from an already parsed URL
    pub fn from_url(url: &Url) -> Result<Self, UrlError> {
        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or(UrlError::MissingDomain)?
            .to_string();
        let scheme = url.scheme().to_string();
        let port = url.port();

        let serialized = match port {
            Some(port) => format!("{}://{}:{}", scheme, host, port),
            None => format!("{}://{}", scheme, host),
        };

        Ok(Self {
            scheme,
            host,
            port,
            effective_port: url.port_or_known_default(),
            serialized,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The origin serialized as `scheme://host[:port]`, without a trailing slash
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Appends a root-relative path to the origin
    ///
    /// No normalization is applied: `join("/a?b=1")` yields
    /// `scheme://host/a?b=1` verbatim.
    pub fn join(&self, root_relative: &str) -> String {
        format!("{}{}", self.serialized, root_relative)
    }

    /// Returns true if `url` points at the same host (and effective port)
    pub fn is_same_host(&self, url: &Url) -> bool {
        url.host_str() == Some(self.host.as_str())
            && url.port_or_known_default() == self.effective_port
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialized)
    }
}
