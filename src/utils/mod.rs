//! Shared utility functions.
//!
//! - [`url`] - base URL resolution and query parameter serialization

pub mod url;

pub use self::url::{append_params, resolve_url};
