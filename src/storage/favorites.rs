//! Durable favourites and notes.
//!
//! The store maps a country's official name to a free-text note. An entry with
//! an empty note is a favourite without a note; a missing entry is not a
//! favourite. The whole mapping is written through to the backend after every
//! mutation as a flat JSON object under [`FAVOURITES_KEY`]:
//!
//! ```json
//! { "French Republic": "", "Japan": "visit in spring" }
//! ```
//!
//! Toggling a favourite off discards its note. Toggling it back on starts with
//! an empty note again.

use crate::domain::error::{AtlasError, Result};
use crate::storage::backend::KeyValueStore;
use std::collections::BTreeMap;

/// Storage key the favourites mapping is persisted under.
pub const FAVOURITES_KEY: &str = "favourites";

/// Owned favourites mapping with write-through persistence.
pub struct FavoritesStore {
    backend: Box<dyn KeyValueStore>,
    entries: BTreeMap<String, String>,

    /// Set once a write has failed. The in-memory mapping stays authoritative
    /// for the rest of the session.
    degraded: bool,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("entries", &self.entries)
            .field("degraded", &self.degraded)
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Loads the persisted mapping from `backend`.
    ///
    /// Never fails: a missing value, a read error, or a value that is not a JSON
    /// object of strings all start the store empty. The next successful
    /// mutation overwrites whatever was stored.
    pub fn load(backend: Box<dyn KeyValueStore>) -> Self {
        let _span = tracing::debug_span!("favorites_load").entered();

        let entries = match backend.get(FAVOURITES_KEY) {
            Ok(Some(raw)) => match parse_entries(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable favourites");
                    BTreeMap::new()
                }
            },
            Ok(None) => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read favourites, starting empty");
                BTreeMap::new()
            }
        };

        tracing::debug!(count = entries.len(), "favourites loaded");
        Self {
            backend,
            entries,
            degraded: false,
        }
    }

    #[must_use]
    pub fn is_favorite(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Flips the favourite state of `name` and returns the new state.
    ///
    /// Turning a favourite off removes its note.
    pub fn toggle_favorite(&mut self, name: &str) -> bool {
        let _span = tracing::debug_span!("toggle_favorite", name = %name).entered();

        let now_favorite = !self.entries.contains_key(name);
        self.commit(|next| {
            if now_favorite {
                next.insert(name.to_string(), String::new());
            } else {
                next.remove(name);
            }
        });

        tracing::debug!(favorite = now_favorite, "favourite toggled");
        now_favorite
    }

    /// Note attached to `name`.
    ///
    /// Empty both for non-favourites and for favourites without a note; use
    /// [`is_favorite`](Self::is_favorite) to tell them apart.
    #[must_use]
    pub fn note(&self, name: &str) -> &str {
        self.entries.get(name).map_or("", String::as_str)
    }

    /// Replaces the note of a favourite.
    ///
    /// Returns `false` without touching storage if `name` is not a favourite.
    pub fn set_note(&mut self, name: &str, text: &str) -> bool {
        let _span = tracing::debug_span!("set_note", name = %name, len = text.len()).entered();

        match self.entries.get(name) {
            None => {
                tracing::warn!("ignoring note for a country that is not a favourite");
                return false;
            }
            Some(current) if current == text => {
                tracing::trace!("note unchanged");
                return true;
            }
            Some(_) => {}
        }

        self.commit(|next| {
            next.insert(name.to_string(), text.to_string());
        });
        true
    }

    #[must_use]
    pub const fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any write since load has failed.
    #[must_use]
    pub const fn persistence_degraded(&self) -> bool {
        self.degraded
    }

    /// Flags the store as not persisting, e.g. when its backend never opened.
    pub fn mark_degraded(&mut self) {
        self.degraded = true;
    }

    #[cfg(test)]
    fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    /// Builds the next mapping, writes it through and swaps it in.
    ///
    /// The swap happens even if the write fails.
    fn commit(&mut self, mutate: impl FnOnce(&mut BTreeMap<String, String>)) {
        let mut next = self.entries.clone();
        mutate(&mut next);

        if let Err(e) = self.persist(&next) {
            tracing::error!(error = %e, "failed to persist favourites, keeping them in memory");
            self.degraded = true;
        }
        self.entries = next;
    }

    fn persist(&mut self, entries: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string(entries)
            .map_err(|e| AtlasError::Storage(format!("failed to serialize favourites: {e}")))?;
        self.backend.set(FAVOURITES_KEY, &json)
    }
}

fn parse_entries(raw: &str) -> Result<BTreeMap<String, String>> {
    serde_json::from_str(raw)
        .map_err(|e| AtlasError::Storage(format!("failed to parse favourites: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(AtlasError::Storage("disk on fire".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(AtlasError::Storage("disk on fire".into()))
        }
    }

    fn empty_store() -> FavoritesStore {
        FavoritesStore::load(Box::new(MemoryStore::new()))
    }

    fn stored(store: &FavoritesStore) -> Option<String> {
        store.backend().get(FAVOURITES_KEY).unwrap()
    }

    #[test]
    fn toggle_on_empty_store_adds_favorite_without_note() {
        let mut store = empty_store();
        assert!(store.toggle_favorite("France"));
        assert!(store.is_favorite("France"));
        assert_eq!(store.note("France"), "");
        assert_eq!(stored(&store).as_deref(), Some(r#"{"France":""}"#));
    }

    #[test]
    fn double_toggle_restores_state_but_drops_note() {
        let mut store = empty_store();
        store.toggle_favorite("Japan");
        store.set_note("Japan", "visit in spring");

        assert!(!store.toggle_favorite("Japan"));
        assert!(!store.is_favorite("Japan"));
        assert!(store.toggle_favorite("Japan"));
        assert!(store.is_favorite("Japan"));
        assert_eq!(store.note("Japan"), "");
    }

    #[test]
    fn note_round_trip() {
        let mut store = empty_store();
        store.toggle_favorite("Japan");
        assert!(store.set_note("Japan", "hello"));
        assert_eq!(store.note("Japan"), "hello");
    }

    #[test]
    fn set_note_on_non_favorite_is_ignored() {
        let mut store = empty_store();
        assert!(!store.set_note("Chile", "hello"));
        assert!(!store.is_favorite("Chile"));
        assert_eq!(store.note("Chile"), "");
        assert_eq!(stored(&store), None);
    }

    #[test]
    fn reload_from_persisted_state_matches() {
        let mut store = empty_store();
        store.toggle_favorite("French Republic");
        store.toggle_favorite("Japan");
        store.set_note("Japan", "visit in spring");
        store.toggle_favorite("Kingdom of Norway");
        store.toggle_favorite("Kingdom of Norway");

        let raw = stored(&store).unwrap();
        let reloaded = FavoritesStore::load(Box::new(
            MemoryStore::new().with_value(FAVOURITES_KEY, &raw),
        ));

        assert_eq!(reloaded.entries(), store.entries());
        for name in ["French Republic", "Japan", "Kingdom of Norway"] {
            assert_eq!(reloaded.is_favorite(name), store.is_favorite(name));
            assert_eq!(reloaded.note(name), store.note(name));
        }
    }

    #[test]
    fn corrupt_value_starts_empty_and_is_overwritten() {
        let backend = MemoryStore::new().with_value(FAVOURITES_KEY, "{not json");
        let mut store = FavoritesStore::load(Box::new(backend));
        assert!(store.is_empty());

        store.toggle_favorite("France");
        assert_eq!(stored(&store).as_deref(), Some(r#"{"France":""}"#));
    }

    #[test]
    fn non_object_values_start_empty() {
        for raw in ["[]", "42", r#"{"Japan": 1}"#, ""] {
            let backend = MemoryStore::new().with_value(FAVOURITES_KEY, raw);
            assert!(FavoritesStore::load(Box::new(backend)).is_empty(), "{raw}");
        }
    }

    #[test]
    fn failing_backend_keeps_in_memory_state() {
        let mut store = FavoritesStore::load(Box::new(FailingStore));
        assert!(store.is_empty());
        assert!(!store.persistence_degraded());

        assert!(store.toggle_favorite("Japan"));
        assert!(store.set_note("Japan", "sushi"));
        assert!(store.persistence_degraded());
        assert!(store.is_favorite("Japan"));
        assert_eq!(store.note("Japan"), "sushi");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn favorites_persist_through_json_storage() {
        use crate::storage::JsonStorage;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        {
            let backend = JsonStorage::new(dir.path().to_path_buf()).unwrap();
            let mut store = FavoritesStore::load(Box::new(backend));
            store.toggle_favorite("Japan");
            store.set_note("Japan", "ramen");
        }

        let backend = JsonStorage::new(dir.path().to_path_buf()).unwrap();
        let store = FavoritesStore::load(Box::new(backend));
        assert_eq!(store.note("Japan"), "ramen");
    }
}
