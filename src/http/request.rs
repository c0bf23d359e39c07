//! Per-call request configuration.
//!
//! A [`RequestConfig`] travels with every facade call. The facade passes it
//! through to the transport untouched, except for `response_type` on the
//! buffer/stream variants and the content type on multipart calls.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use serde_json::Value;
use std::time::Duration;

/// How the response body is decoded into the envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseType {
    /// Parse as JSON. Non-JSON text becomes a JSON string, an empty body `Null`.
    #[default]
    Json,
    /// Decode as UTF-8 text, honouring the response charset.
    Text,
    /// Buffer the raw bytes.
    ArrayBuffer,
    /// Hand back the body as a lazy byte stream.
    Stream,
}

/// Request body payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as JSON with an `application/json` content type.
    Json(Value),
    /// Sent verbatim as text.
    Text(String),
    /// Sent verbatim as bytes.
    Binary(Bytes),
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_owned())
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Binary(Bytes::from(bytes))
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        RequestBody::Binary(bytes)
    }
}

/// Options for a single request.
///
/// ```rust
/// use courier::http::{RequestConfig, ResponseType};
/// use serde_json::json;
///
/// let config = RequestConfig::new()
///     .param("name", "chogath")
///     .json(json!({ "name": "chogath" }))
///     .response_type(ResponseType::Text);
/// assert_eq!(config.params.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Query parameters appended to the URL, in order.
    pub params: Vec<(String, String)>,
    /// Headers layered on top of the client's default headers.
    pub headers: HeaderMap,
    /// Body payload. Ignored by the `*_form` calls.
    pub data: Option<RequestBody>,
    /// How to decode the response body.
    pub response_type: ResponseType,
    /// Per-request timeout, overriding the client-wide one.
    pub timeout: Option<Duration>,
    /// Reject non-2xx responses as transport errors.
    pub validate_status: bool,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            params: Vec::new(),
            headers: HeaderMap::new(),
            data: None,
            response_type: ResponseType::default(),
            timeout: None,
            validate_status: true,
        }
    }
}

impl RequestConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        RequestConfig::default()
    }

    /// Add a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add a header. A header with the same name is replaced.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Merge a set of headers, replacing the ones with the same names.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = merge_headers(self.headers, headers);
        self
    }

    /// Set the body payload.
    pub fn data(mut self, data: impl Into<RequestBody>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set a JSON body payload.
    pub fn json(self, value: Value) -> Self {
        self.data(RequestBody::Json(value))
    }

    /// Set how the response body is decoded.
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Accept any status code instead of failing on non-2xx.
    pub fn validate_status(mut self, validate: bool) -> Self {
        self.validate_status = validate;
        self
    }
}

/// Merges two header maps: `defaults` first, then `overrides` on top.
///
/// Every header name present in `overrides` replaces all values of that name
/// in `defaults`. Multi-valued headers in `overrides` are kept as a whole.
pub fn merge_headers(defaults: HeaderMap, overrides: HeaderMap) -> HeaderMap {
    let mut merged = defaults;
    for name in overrides.keys() {
        merged.remove(name);
    }
    for (name, value) in overrides.iter() {
        merged.append(name, value.clone());
    }
    merged
}
