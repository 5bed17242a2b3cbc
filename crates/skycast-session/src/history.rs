// crates/skycast-session/src/history.rs

use crate::storage::KeyValueStore;

/// Upper bound on remembered searches.
pub const MAX_RECENT: usize = 6;

const STORAGE_KEY: &str = "recent_cities";

/// Bounded, de-duplicated, most-recent-first list of searched city
/// names, persisted through the injected key-value store.
///
/// The list is loaded once at construction; absent or unreadable
/// persisted data degrades to an empty history rather than failing.
pub struct RecentSearches<S: KeyValueStore> {
    store: S,
    cities: Vec<String>,
}

impl<S: KeyValueStore> RecentSearches<S> {
    pub fn load(store: S) -> Self {
        let cities = match store.get(STORAGE_KEY) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!("Discarding unreadable search history: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read search history: {}", e);
                Vec::new()
            }
        };

        Self { store, cities }
    }

    /// Record a successful city search. Trims the input; an entry equal
    /// to it ignoring case is replaced, so the list keeps the most
    /// recent casing. No-op for whitespace-only input.
    pub fn record(&mut self, city: &str) {
        let clean = city.trim();
        if clean.is_empty() {
            return;
        }

        let lowered = clean.to_lowercase();
        self.cities.retain(|c| c.to_lowercase() != lowered);
        self.cities.insert(0, clean.to_string());
        self.cities.truncate(MAX_RECENT);

        self.persist();
    }

    /// Current list, newest first.
    pub fn list(&self) -> &[String] {
        &self.cities
    }

    /// Empty the list and drop the persisted entry.
    pub fn clear(&mut self) {
        self.cities.clear();
        if let Err(e) = self.store.remove(STORAGE_KEY) {
            tracing::warn!("Failed to clear persisted search history: {}", e);
        }
    }

    fn persist(&mut self) {
        match serde_json::to_vec(&self.cities) {
            Ok(bytes) => {
                if let Err(e) = self.store.set(STORAGE_KEY, &bytes) {
                    tracing::warn!("Failed to persist search history: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to encode search history: {}", e),
        }
    }
}
