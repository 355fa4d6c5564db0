//! SQLite-backed key-value store.
//!
//! A single `kv` table holds every key the application uses: the medicine
//! list, one intake list per medicine, and UI flags.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{data_dir, KvStore};
use crate::error::{CoreError, StoreError};

/// SQLite database holding the `kv` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at `<data dir>/medicat.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("medicat.db");
        Ok(Self::open_at(path)?)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref()).map_err(|e| {
            StoreError::unavailable("", format!("open {}: {e}", path.as_ref().display()))
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(|e| StoreError::unavailable(key, e.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(|e| StoreError::unavailable(key, e.to_string()))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(|e| StoreError::unavailable(key, e.to_string()))?;
        Ok(())
    }
}
