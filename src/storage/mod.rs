//! Storage layer for the user's favourites and notes.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait abstraction over durable string storage
//! - `json`: one-file-per-key JSON storage with atomic writes
//! - `memory`: in-memory storage used before filesystem access is granted
//! - `favorites`: the write-through favourites/notes mapping

pub mod backend;
pub mod favorites;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use favorites::{FavoritesStore, FAVOURITES_KEY};
pub use json::JsonStorage;
pub use memory::MemoryStore;
