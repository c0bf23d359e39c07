//! Builder pattern implementation for creating [`HttpClient`] instances.
//!
//! # Examples
//!
//! ```rust
//! use courier::HttpClientBuilder;
//! use reqwest::header::{self, HeaderValue};
//! use reqwest::Url;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClientBuilder::new()
//!     .base_url(Url::parse("http://localhost:3000")?)
//!     .header(header::USER_AGENT, HeaderValue::from_static("courier"))
//!     .pool_idle_timeout(Duration::from_secs(15))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::client::HttpClient;
use crate::http::HttpClientConfig;
use crate::Result;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::{Proxy, Url};
use std::time::Duration;

/// A builder used to create an [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        HttpClientBuilder::default()
    }

    /// Starts from an existing set of options.
    pub fn from_config(config: HttpClientConfig) -> Self {
        Self { config }
    }

    /// Sets the base URL relative paths are resolved against.
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    /// Sets the total timeout of every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Sets how long idle keep-alive connections are kept around.
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = Some(timeout);
        self
    }

    /// Sets the maximum number of idle connections per host.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = Some(max);
        self
    }

    /// Sets the TCP keepalive interval.
    pub fn tcp_keepalive(mut self, interval: Duration) -> Self {
        self.config.tcp_keepalive = Some(interval);
        self
    }

    /// Routes every request through `proxy`.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Sets the maximum number of redirects. Zero disables redirects.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = Some(max);
        self
    }

    /// Enables retrying transient failures with exponential backoff.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add default headers.
    ///
    /// `.headers()` can be called multiple times; all maps are merged into one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add a default header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// The options collected so far.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Consume the builder, keeping only the options.
    pub fn into_config(self) -> HttpClientConfig {
        self.config
    }

    /// Create the [`HttpClient`] with the specified options.
    pub fn build(self) -> Result<HttpClient> {
        HttpClient::new(self.config)
    }
}
