//! Storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over the
//! durable string store the favourites live in. Only two operations are needed:
//! the favourites store reads its key once at startup and overwrites it after
//! every mutation.

use crate::domain::error::Result;

/// Durable string key/value store.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): one JSON file per key with atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): process-local map, used until
///   filesystem access is granted and in tests
///
/// # Examples
///
/// ```no_run
/// use zatlas::storage::{JsonStorage, KeyValueStore};
/// use std::path::PathBuf;
///
/// let mut storage = JsonStorage::new(PathBuf::from("/tmp/zatlas"))?;
/// storage.set("favourites", "{}")?;
/// assert_eq!(storage.get("favourites")?.as_deref(), Some("{}"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. A failed write must leave the
    /// previously stored value intact.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
