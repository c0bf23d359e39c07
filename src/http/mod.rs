//! Transport configuration.
//!
//! - [`client`] - construction options and the middleware-wrapped reqwest client
//! - [`request`] - per-call options, body payloads and header merging

pub mod client;
pub mod request;

pub use client::{create_http_client, HttpClientConfig};
pub use request::{merge_headers, RequestBody, RequestConfig, ResponseType};
