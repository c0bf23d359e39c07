//! Error handling for the courier library.
//!
//! Errors fall into two families: transport errors raised by the wrapped
//! HTTP stack, and filesystem errors raised while saving downloads. A missing
//! field in a response body is never an error; see [`crate::client::extract`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can happen when using courier.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Captures failures that don't fit into other categories.
    #[error("Internal error: {0}")]
    Internal(String),

    /// The request URL could not be parsed or resolved against the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The directory a download should be written into does not exist.
    ///
    /// Raised before any network traffic happens.
    #[error("The {0} does not exist")]
    PathNotFound(PathBuf),

    /// I/O Error.
    ///
    /// Wraps standard I/O errors raised while writing downloaded bytes to disk.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    ///
    /// Network failures, timeouts, non-success statuses and body decoding
    /// failures all end up here.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error raised while the request travelled through the middleware stack.
    #[error("Middleware Error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },
}

impl Error {
    /// Returns true for failures owned by the transport (network, timeout,
    /// non-success status, serialization of the request body).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Reqwest { .. } | Error::Middleware { .. } | Error::InvalidUrl(_)
        )
    }

    /// Returns true for failures raised while touching the local filesystem.
    pub fn is_filesystem(&self) -> bool {
        matches!(self, Error::IOError { .. } | Error::PathNotFound(_))
    }

    /// The HTTP status attached to the failure, if the server answered.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::Reqwest { source } => source.status(),
            Error::Middleware {
                source: reqwest_middleware::Error::Reqwest(source),
            } => source.status(),
            _ => None,
        }
    }
}

/// Result type alias for operations that can fail with a courier error.
pub type Result<T> = std::result::Result<T, Error>;
