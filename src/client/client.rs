//! The HTTP client facade.
//!
//! [`HttpClient`] wraps one middleware-wrapped reqwest client plus the
//! configuration it was built from, and exposes verb-oriented calls with
//! optional response shaping on top:
//!
//! | call                          | returns                                   |
//! |-------------------------------|-------------------------------------------|
//! | `get`, `post`, `put`, ...     | the full [`Response`] envelope            |
//! | `*_data`                      | one field of the JSON body, or `None`     |
//! | `*_form`                      | the envelope of a multipart request       |
//! | `get_buffer`                  | the body bytes                            |
//! | `get_stream`                  | a lazy [`ByteStream`] over the body       |
//! | `get_base64`                  | the body bytes, base64 encoded            |
//! | `get_and_download`            | the path the body was written to          |
//!
//! Every call makes a single attempt unless retries were enabled in the
//! [`HttpClientConfig`]. Multipart calls always make a single attempt, since
//! their streamed body cannot be replayed. Failures of the request itself always surface as
//! errors; only a missing body field is turned into `None`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use courier::{HttpClient, RequestConfig};
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), courier::Error> {
//! let client = HttpClient::builder()
//!     .base_url(Url::parse("http://localhost:3000").unwrap())
//!     .build()?;
//!
//! let name = client
//!     .get_data("/test/name", Some(RequestConfig::new().param("name", "chogath")), Some("name"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use super::builder::HttpClientBuilder;
use super::extract::{extract_field, DEFAULT_DATA_KEY};
use super::form::{build_form, form_headers, FormFields};
use super::response::{ByteStream, Response};
use crate::http::client::{build_inner_client, wrap_client};
use crate::http::{HttpClientConfig, RequestBody, RequestConfig, ResponseType};
use crate::utils::{append_params, resolve_url};
use crate::{Error, Result};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::Method;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Verb-oriented HTTP client over a single transport configuration.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: ClientWithMiddleware,
    // Same pool as `client`, never retries: multipart bodies are not cloneable.
    form_client: ClientWithMiddleware,
    config: HttpClientConfig,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish()
    }
}

impl HttpClient {
    /// Creates a client from construction options.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let inner_client = build_inner_client(&config)?;
        let client = wrap_client(inner_client.clone(), config.retries);
        let form_client = wrap_client(inner_client, 0);
        Ok(Self {
            client,
            form_client,
            config,
        })
    }

    /// Creates a builder with the default options.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Gets the options this client was built from.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Gets the base URL relative paths are resolved against.
    pub fn base_url(&self) -> Option<&reqwest::Url> {
        self.config.base_url.as_ref()
    }

    /// Sends a request with an arbitrary method and returns the envelope.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: Option<RequestConfig>,
    ) -> Result<Response> {
        let config = config.unwrap_or_default();
        let response_type = config.response_type;
        let res = self.send(method, url, config, None).await?;
        Response::from_transport(res, response_type).await
    }

    /// Method GET.
    pub async fn get(&self, url: &str, config: Option<RequestConfig>) -> Result<Response> {
        self.request(Method::GET, url, config).await
    }

    /// GET, then read `key` (default `"data"`) out of the JSON body.
    pub async fn get_data(
        &self,
        url: &str,
        config: Option<RequestConfig>,
        key: Option<&str>,
    ) -> Result<Option<Value>> {
        self.request_data(Method::GET, url, config, key).await
    }

    /// GET the body as raw bytes.
    ///
    /// The response type is forced to [`ResponseType::ArrayBuffer`] whatever
    /// the caller asked for.
    pub async fn get_buffer(&self, url: &str, config: Option<RequestConfig>) -> Result<Bytes> {
        let config = config
            .unwrap_or_default()
            .response_type(ResponseType::ArrayBuffer);
        self.get(url, Some(config))
            .await?
            .into_data()
            .into_bytes()
            .ok_or_else(|| Error::Internal(format!("{} did not produce a buffered body", url)))
    }

    /// GET the body as a lazy byte stream. The stream can be read once.
    pub async fn get_stream(&self, url: &str, config: Option<RequestConfig>) -> Result<ByteStream> {
        let config = config.unwrap_or_default().response_type(ResponseType::Stream);
        self.get(url, Some(config))
            .await?
            .into_data()
            .into_stream()
            .ok_or_else(|| Error::Internal(format!("{} did not produce a body stream", url)))
    }

    /// GET the body and encode it as standard base64.
    pub async fn get_base64(&self, url: &str, config: Option<RequestConfig>) -> Result<String> {
        let buffer = self.get_buffer(url, config).await?;
        Ok(STANDARD.encode(&buffer))
    }

    /// GET the body and write it to `path`, replacing any existing file.
    ///
    /// The directory `path` lives in is checked before the request is sent,
    /// so a missing directory fails with [`Error::PathNotFound`] without any
    /// network traffic. Returns the path written.
    pub async fn get_and_download(
        &self,
        url: &str,
        path: impl AsRef<Path>,
        config: Option<RequestConfig>,
    ) -> Result<PathBuf> {
        let path = path.as_ref();
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !fs::try_exists(directory).await? {
            return Err(Error::PathNotFound(directory.to_path_buf()));
        }

        let buffer = self.get_buffer(url, config).await?;

        debug!("Writing {} bytes to {:?}", buffer.len(), path);
        fs::write(path, &buffer).await?;

        Ok(path.to_path_buf())
    }

    /// Method POST. Sends `config.data` as the body.
    pub async fn post(&self, url: &str, config: Option<RequestConfig>) -> Result<Response> {
        self.request(Method::POST, url, config).await
    }

    /// POST, then read `key` (default `"data"`) out of the JSON body.
    pub async fn post_data(
        &self,
        url: &str,
        config: Option<RequestConfig>,
        key: Option<&str>,
    ) -> Result<Option<Value>> {
        self.request_data(Method::POST, url, config, key).await
    }

    /// POST a multipart body built from `fields`. Never retried.
    pub async fn post_form(
        &self,
        url: &str,
        fields: FormFields,
        config: Option<RequestConfig>,
    ) -> Result<Response> {
        self.request_form(Method::POST, url, fields, config).await
    }

    /// Method PUT. Sends `config.data` as the body.
    pub async fn put(&self, url: &str, config: Option<RequestConfig>) -> Result<Response> {
        self.request(Method::PUT, url, config).await
    }

    /// PUT, then read `key` (default `"data"`) out of the JSON body.
    pub async fn put_data(
        &self,
        url: &str,
        config: Option<RequestConfig>,
        key: Option<&str>,
    ) -> Result<Option<Value>> {
        self.request_data(Method::PUT, url, config, key).await
    }

    /// PUT a multipart body built from `fields`. Never retried.
    pub async fn put_form(
        &self,
        url: &str,
        fields: FormFields,
        config: Option<RequestConfig>,
    ) -> Result<Response> {
        self.request_form(Method::PUT, url, fields, config).await
    }

    /// Method PATCH. Sends `config.data` as the body.
    pub async fn patch(&self, url: &str, config: Option<RequestConfig>) -> Result<Response> {
        self.request(Method::PATCH, url, config).await
    }

    /// PATCH, then read `key` (default `"data"`) out of the JSON body.
    pub async fn patch_data(
        &self,
        url: &str,
        config: Option<RequestConfig>,
        key: Option<&str>,
    ) -> Result<Option<Value>> {
        self.request_data(Method::PATCH, url, config, key).await
    }

    /// PATCH a multipart body built from `fields`. Never retried.
    pub async fn patch_form(
        &self,
        url: &str,
        fields: FormFields,
        config: Option<RequestConfig>,
    ) -> Result<Response> {
        self.request_form(Method::PATCH, url, fields, config).await
    }

    /// Method DELETE. A body in `config.data` is sent if present.
    pub async fn delete(&self, url: &str, config: Option<RequestConfig>) -> Result<Response> {
        self.request(Method::DELETE, url, config).await
    }

    /// Method OPTIONS. A body in `config.data` is sent if present.
    pub async fn options(&self, url: &str, config: Option<RequestConfig>) -> Result<Response> {
        self.request(Method::OPTIONS, url, config).await
    }

    async fn request_data(
        &self,
        method: Method,
        url: &str,
        config: Option<RequestConfig>,
        key: Option<&str>,
    ) -> Result<Option<Value>> {
        let response = self.request(method, url, config).await?;
        Ok(extract_field(&response, key.unwrap_or(DEFAULT_DATA_KEY)))
    }

    async fn request_form(
        &self,
        method: Method,
        url: &str,
        fields: FormFields,
        config: Option<RequestConfig>,
    ) -> Result<Response> {
        let mut config = config.unwrap_or_default();
        if config.data.take().is_some() {
            debug!("Dropping body payload of multipart request to {}", url);
        }

        let form = build_form(fields)?;
        let response_type = config.response_type;
        let res = self.send(method, url, config, Some(form)).await?;
        Response::from_transport(res, response_type).await
    }

    /// Resolves the URL, applies the per-call options and sends the request.
    async fn send(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
        form: Option<Form>,
    ) -> Result<reqwest::Response> {
        let mut target = resolve_url(self.config.base_url.as_ref(), url)?;
        append_params(&mut target, &config.params);

        debug!("Sending {} {}", method, target);
        let transport = if form.is_some() {
            &self.form_client
        } else {
            &self.client
        };
        let mut req = transport.request(method, target);

        if let Some(timeout) = config.timeout {
            req = req.timeout(timeout);
        }

        req = match form {
            Some(form) => req.headers(form_headers(&config.headers)).multipart(form),
            None => {
                let mut headers = config.headers;
                match config.data {
                    Some(RequestBody::Json(value)) => req.headers(headers).json(&value),
                    Some(RequestBody::Text(text)) => {
                        default_content_type(&mut headers, "text/plain; charset=utf-8");
                        req.headers(headers).body(text)
                    }
                    Some(RequestBody::Binary(bytes)) => {
                        default_content_type(&mut headers, "application/octet-stream");
                        req.headers(headers).body(bytes)
                    }
                    None => req.headers(headers),
                }
            }
        };

        let res = req.send().await?;

        if config.validate_status {
            Ok(res.error_for_status()?)
        } else {
            Ok(res)
        }
    }
}

fn default_content_type(headers: &mut HeaderMap, content_type: &'static str) {
    headers
        .entry(CONTENT_TYPE)
        .or_insert(HeaderValue::from_static(content_type));
}
