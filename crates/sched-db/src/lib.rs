//! Storage layer for the conference schedule.
//!
//! Persists small pieces of UI state (currently the favorites set) in a
//! `rusqlite` key/value table.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! The schedule front end is single-threaded, so a `Database` is owned by the
//! one UI thread that mutates it.
//!
//! # Schema
//!
//! ```text
//! kv(key TEXT PRIMARY KEY, value TEXT NOT NULL, updated_at TEXT NOT NULL)
//! ```
//!
//! Values are opaque strings; callers own their encoding (favorites are a
//! JSON array). `updated_at` is an ISO 8601 UTC timestamp
//! (e.g., `2025-07-03T09:30:00Z`). Writes replace the whole value.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use sched_core::KeyValueStore;
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored timestamp could not be parsed.
    #[error("invalid timestamp for key {key}: {timestamp}")]
    TimestampParse {
        key: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- Key/value entries for persisted UI state
            -- value: caller-encoded payload (e.g. JSON array of favorited event ids)
            -- updated_at: ISO 8601 format (e.g., '2025-07-03T09:30:00Z')
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Reads the value stored under `key`.
    pub fn get_value(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_value(&self, key: &str, value: &str) -> Result<(), DbError> {
        self.set_value_at(key, value, Utc::now())
    }

    fn set_value_at(&self, key: &str, value: &str, at: DateTime<Utc>) -> Result<(), DbError> {
        let updated_at = at.to_rfc3339_opts(SecondsFormat::Secs, true);
        self.conn.execute(
            "
            INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, updated_at],
        )?;
        Ok(())
    }

    /// When the value under `key` was last written.
    pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, DbError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        raw.map(|timestamp| {
            DateTime::parse_from_rfc3339(&timestamp)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|source| DbError::TimestampParse {
                    key: key.to_string(),
                    timestamp,
                    source,
                })
        })
        .transpose()
    }
}

impl KeyValueStore for Database {
    type Error = DbError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.get_value(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.set_value(key, value)
    }
}
