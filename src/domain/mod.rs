//! Domain layer for the zatlas plugin.
//!
//! Core domain types independent of Zellij-specific APIs: the country record
//! delivered by the remote dataset and the error types shared by every layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`country`]: Country record model and display helpers

pub mod country;
pub mod error;

pub use country::{format_population, CountryName, CountryRecord, Currency, Flags};
pub use error::{AtlasError, FetchError, Result};
