//! Error types for the catalog client.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] used throughout the crate. Errors are implemented with `thiserror`.
//!
//! Only transport-class errors ([`CatalogError::is_transport`]) ever reach the
//! `error`/`detail_error` slots of the application state. Their `Display` output is
//! the human-readable message shown to the user, so those variants format the
//! message verbatim without a prefix.

use thiserror::Error;

/// The main error type for catalog client operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a usable response (connection refused, timeout,
    /// DNS failure, body read failure).
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    ///
    /// `message` is already derived from the response body (see
    /// [`crate::api::models::failure_message`]).
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Derived failure message.
        message: String,
    },

    /// A 2xx response body was not valid JSON for the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Background request execution failed before a response was produced.
    #[error("Worker error: {0}")]
    Worker(String),
}

impl CatalogError {
    /// Returns `true` for the error kinds that originate from the HTTP collaborator.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::Decode(_)
        )
    }

    /// HTTP status code, when the failure came from a non-2xx response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
