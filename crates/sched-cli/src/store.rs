//! Favorites storage for the CLI.

use std::path::Path;

use chrono::{DateTime, Utc};
use sched_core::{KeyValueStore, MemoryStore};
use sched_db::{Database, DbError};

/// Where favorites are kept for this run.
///
/// Falls back to an in-memory store when the database cannot be opened, so a
/// damaged file never keeps the schedule from showing.
#[derive(Debug)]
pub enum FavoritesBackend {
    Database(Database),
    Memory(MemoryStore),
}

impl FavoritesBackend {
    /// Opens the database at `path`, creating its directory if needed.
    pub fn open(path: &Path) -> Self {
        match Self::open_database(path) {
            Ok(db) => Self::Database(db),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "favorites database unavailable, changes will not be saved"
                );
                Self::Memory(MemoryStore::default())
            }
        }
    }

    fn open_database(path: &Path) -> anyhow::Result<Database> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Database::open(path)?)
    }

    pub const fn is_persistent(&self) -> bool {
        matches!(self, Self::Database(_))
    }

    /// When `key` was last written. Always `None` for the in-memory store.
    pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, DbError> {
        match self {
            Self::Database(db) => db.updated_at(key),
            Self::Memory(_) => Ok(None),
        }
    }
}

impl KeyValueStore for FavoritesBackend {
    type Error = DbError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        match self {
            Self::Database(db) => db.get_value(key),
            Self::Memory(store) => Ok(store.get(key).unwrap_or_else(|never| match never {})),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        match self {
            Self::Database(db) => db.set_value(key, value),
            Self::Memory(store) => {
                store.set(key, value).unwrap_or_else(|never| match never {});
                Ok(())
            }
        }
    }
}
