//! Unified error types for the storefront API and admin console.

use std::path::PathBuf;
use thiserror::Error;

/// Every failure the store, the services, the HTTP layer and the console can report.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested identifier is absent from its collection.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Human readable resource name ("Product", "Order", ...)
        resource: &'static str,
        /// The identifier that was looked up
        id: String,
    },

    /// A required field is missing or malformed.
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// The persisted document exists but cannot be read as a storefront document.
    #[error("Storage file {path:?} is corrupt: {source}")]
    StorageCorrupt {
        /// Location of the document on disk
        path: PathBuf,
        /// The underlying parse failure
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem failure while reading or writing the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration file or environment override.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the bad setting
        message: String,
    },

    /// Network failure while the console talks to the API.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// The `error` field of the response body
        message: String,
    },
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
