//! Error types for the zatlas plugin.
//!
//! This module defines the centralized error type [`AtlasError`], the
//! [`FetchError`] that is surfaced to the user as observable state, and a type
//! alias [`Result`] for convenient error handling throughout the plugin. All
//! errors are implemented using the `thiserror` crate.

use thiserror::Error;

/// The main error type for zatlas plugin operations.
///
/// Most variants carry a description of what went wrong. None of them are
/// allowed to escape the component that produced them: storage errors degrade
/// to in-memory favourites, fetch errors become banner state.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Key/value storage operation failed.
    ///
    /// Occurs when reading from or writing to the persistence backend fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetching the country dataset failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Failure fetching or decoding the remote country dataset.
///
/// Recoverable by a manual retry. Cloneable so it can live in application
/// state and travel inside events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status code.
    #[error("Request failed with status {0}")]
    Status(u16),

    /// The response body was not a valid country list.
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// A specialized `Result` type for zatlas operations.
pub type Result<T> = std::result::Result<T, AtlasError>;
