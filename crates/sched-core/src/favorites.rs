//! Favorited events and their persistence.
//!
//! Favorites live in memory as a [`FavoriteSet`] and are mirrored to a
//! [`KeyValueStore`] under a single key, as a JSON array of event ids. The
//! in-memory set is always the source of truth: unreadable stored data loads
//! as an empty set, and a failed write is logged and otherwise ignored.

use std::collections::{BTreeSet, HashMap};
use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::types::EventId;

/// Storage key holding the favorites array.
pub const FAVORITES_KEY: &str = "favorites";

/// A set of favorited event ids.
///
/// Ordered so that the persisted array is canonical for a given membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(BTreeSet<EventId>);

impl FavoriteSet {
    pub fn contains(&self, id: &EventId) -> bool {
        self.0.contains(id)
    }

    /// Adds `id` if absent, removes it if present. Returns the new membership.
    pub fn toggle(&mut self, id: &EventId) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.clone());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventId> {
        self.0.iter()
    }
}

impl FromIterator<EventId> for FavoriteSet {
    fn from_iter<T: IntoIterator<Item = EventId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A keyed string store, the persistence seam for UI state.
pub trait KeyValueStore {
    type Error: std::error::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Process-local store, used when nothing outlives the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Favorites backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct FavoritesStore<S> {
    store: S,
    favorites: FavoriteSet,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Loads favorites from `store`.
    ///
    /// Missing, unreadable or malformed data yields an empty set.
    pub fn load(store: S) -> Self {
        let favorites = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "stored favorites are corrupt, starting empty");
                FavoriteSet::default()
            }),
            Ok(None) => FavoriteSet::default(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read favorites, starting empty");
                FavoriteSet::default()
            }
        };
        tracing::debug!(count = favorites.len(), "loaded favorites");
        Self { store, favorites }
    }

    /// Toggles `id` and persists the resulting set. Returns the new membership.
    pub fn toggle(&mut self, id: &EventId) -> bool {
        let now_favorite = self.favorites.toggle(id);
        self.persist();
        now_favorite
    }

    pub fn is_favorite(&self, id: &EventId) -> bool {
        self.favorites.contains(id)
    }

    pub const fn set(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.favorites) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize favorites");
                return;
            }
        };
        if let Err(err) = self.store.set(FAVORITES_KEY, &json) {
            tracing::warn!(error = %err, "failed to persist favorites, keeping them in memory");
        }
    }
}
