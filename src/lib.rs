//! Courier is a thin, verb-oriented HTTP client facade over reqwest, with a
//! lifecycle provider that lets a dependency-injection container build,
//! hand out, replace and tear down a shared client.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use courier::provider::{ClientProvider, HttpClientProvider};
//! use courier::{HttpClientConfig, RequestConfig};
//! use reqwest::Url;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), courier::Error> {
//! let provider = HttpClientProvider::new(HttpClientConfig {
//!     base_url: Some(Url::parse("http://localhost:3000").unwrap()),
//!     pool_idle_timeout: Some(Duration::from_secs(15)),
//!     ..HttpClientConfig::default()
//! })?;
//!
//! if let Some(client) = provider.get_instance() {
//!     let response = client
//!         .get("/test", Some(RequestConfig::new().param("name", "chogath")))
//!         .await?;
//!     println!("{}", response.status());
//! }
//!
//! provider.close();
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`] - The `HttpClient` facade, its builder, response envelope, field extraction and multipart forms
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - Transport construction options and per-call request options
//! - [`provider`] - Lifecycle provider and adapter for DI containers
//! - [`utils`] - URL resolution and query serialization helpers

pub mod client;
pub mod error;
pub mod http;
pub mod provider;
pub mod utils;

pub use client::{
    extract_field, extract_field_as, ByteStream, FormFields, FormValue, HttpClient,
    HttpClientBuilder, Response, ResponseData, DEFAULT_DATA_KEY,
};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig, RequestBody, RequestConfig, ResponseType};
pub use provider::{ClientAdapter, ClientProvider, HttpClientAdapter, HttpClientProvider};
