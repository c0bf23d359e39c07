//! The HTTP client facade and the pieces it is built from.
//!
//! - [`client`] - the [`HttpClient`] facade with its verb and shaping calls
//! - [`builder`] - [`HttpClientBuilder`] for configuring a facade
//! - [`response`] - the [`Response`] envelope and its decoded body
//! - [`extract`] - null-safe field extraction from JSON bodies
//! - [`form`] - multipart body construction

pub mod builder;
#[allow(clippy::module_inception)]
pub mod client;
pub mod extract;
pub mod form;
pub mod response;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use extract::{extract_field, extract_field_as, DEFAULT_DATA_KEY};
pub use form::{FormFields, FormValue};
pub use response::{ByteStream, Response, ResponseData};
