//! Transport setup and middleware configuration.
//!
//! This module turns an [`HttpClientConfig`] into the middleware-wrapped
//! reqwest client every [`HttpClient`](crate::HttpClient) facade sends through.
//!
//! # Features
//!
//! - **Tracing**: every request is traced by `reqwest-tracing`
//! - **Opt-in retries**: exponential backoff only when `retries > 0`
//! - **Keep-alive tuning**: pool idle timeout, idle connections per host, TCP keepalive
//! - **Proxy Support**: optional HTTP/HTTPS/SOCKS proxy
//! - **Default Headers**: applied to every request
//!
//! # Examples
//!
//! ```rust
//! use courier::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, USER_AGENT};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "MyApp/1.0".parse()?);
//!
//! let config = HttpClientConfig {
//!     headers: Some(headers),
//!     pool_idle_timeout: Some(Duration::from_secs(15)),
//!     ..HttpClientConfig::default()
//! };
//!
//! let client = create_http_client(&config)?;
//! # Ok(())
//! # }
//! ```

use reqwest::{header::HeaderMap, redirect, Proxy, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Construction options for a client instance.
///
/// Everything here is handed to the transport as is; nothing is validated
/// beyond what reqwest itself checks when the client is built.
#[derive(Debug, Clone, Default)]
pub struct HttpClientConfig {
    /// Base URL relative request paths are resolved against.
    pub base_url: Option<Url>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
    /// Total timeout applied to every request.
    pub timeout: Option<Duration>,
    /// Timeout for establishing a connection.
    pub connect_timeout: Option<Duration>,
    /// How long an idle keep-alive connection stays in the pool.
    pub pool_idle_timeout: Option<Duration>,
    /// Maximum number of idle connections kept per host.
    pub pool_max_idle_per_host: Option<usize>,
    /// TCP keepalive interval for pooled connections.
    pub tcp_keepalive: Option<Duration>,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Maximum number of redirects to follow. `Some(0)` disables redirects.
    pub max_redirects: Option<usize>,
    /// Number of retries for transient failures. Zero means single attempt.
    pub retries: u32,
}

/// Creates the middleware-wrapped transport described by `config`.
///
/// The retry middleware is only installed when `config.retries` is non-zero,
/// so the default client performs exactly one attempt per call.
pub fn create_http_client(config: &HttpClientConfig) -> Result<ClientWithMiddleware, reqwest::Error> {
    let inner_client = build_inner_client(config)?;
    Ok(wrap_client(inner_client, config.retries))
}

/// Builds the bare reqwest client holding the connection pool.
pub(crate) fn build_inner_client(config: &HttpClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder();

    if let Some(proxy) = config.proxy.clone() {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers.clone() {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    if let Some(timeout) = config.timeout {
        inner_client_builder = inner_client_builder.timeout(timeout);
    }

    if let Some(connect_timeout) = config.connect_timeout {
        inner_client_builder = inner_client_builder.connect_timeout(connect_timeout);
    }

    if let Some(idle) = config.pool_idle_timeout {
        inner_client_builder = inner_client_builder.pool_idle_timeout(idle);
    }

    if let Some(max_idle) = config.pool_max_idle_per_host {
        inner_client_builder = inner_client_builder.pool_max_idle_per_host(max_idle);
    }

    if let Some(keepalive) = config.tcp_keepalive {
        inner_client_builder = inner_client_builder.tcp_keepalive(keepalive);
    }

    if let Some(max_redirects) = config.max_redirects {
        let policy = if max_redirects == 0 {
            redirect::Policy::none()
        } else {
            redirect::Policy::limited(max_redirects)
        };
        inner_client_builder = inner_client_builder.redirect(policy);
    }

    inner_client_builder.build()
}

/// Wraps `inner_client` in the middleware stack.
///
/// Streaming bodies (multipart forms) cannot be cloned for a retry, so they
/// must go through a client wrapped with `retries == 0`.
pub(crate) fn wrap_client(inner_client: reqwest::Client, retries: u32) -> ClientWithMiddleware {
    // Trace HTTP requests. See the tracing crate to make use of these traces.
    let mut builder = ClientBuilder::new(inner_client).with(TracingMiddleware::default());

    if retries > 0 {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(retries);
        builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
    }

    builder.build()
}
