//! Response field extraction.
//!
//! Pulls a single field out of a JSON response body. Every missing level
//! (non-JSON body, non-object body, absent key, explicit `null`) yields
//! `None` rather than an error.

use super::response::Response;
use crate::Result;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Field read by the `*_data` calls when no key is given.
pub const DEFAULT_DATA_KEY: &str = "data";

/// Returns `body[key]` if the body is a JSON object holding a non-null `key`.
pub fn extract_field(response: &Response, key: &str) -> Option<Value> {
    response
        .data()
        .as_json()
        .and_then(|body| body.get(key))
        .filter(|value| !value.is_null())
        .cloned()
}

/// Like [`extract_field`], deserializing the field into `T`.
///
/// Absence is still `Ok(None)`; only a present field of the wrong shape fails.
pub fn extract_field_as<T: DeserializeOwned>(response: &Response, key: &str) -> Result<Option<T>> {
    extract_field(response, key)
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| crate::Error::Internal(format!("field `{}` has an unexpected shape: {}", key, e)))
}
