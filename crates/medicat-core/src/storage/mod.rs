//! Durable key-value storage.
//!
//! The core only needs three operations from its store: get, set and an
//! idempotent delete of a string value under a string key. [`KvStore`] is that
//! contract; [`SqliteStore`] is the on-disk backend and [`MemoryStore`] the
//! in-process one used by tests and embedders.

mod config;
pub mod memory;
pub mod sqlite;

pub use config::Config;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::{ConfigError, StoreError};

/// Key holding the JSON array of all medicines.
pub const MEDICINES_KEY: &str = "medicines";

/// Key holding the onboarding flag. Owned by the UI; the core never touches it.
pub const WELCOME_SEEN_KEY: &str = "hasSeenWelcome";

/// Key holding the JSON array of intakes for one medicine.
pub fn intakes_key(medicine_id: &str) -> String {
    format!("intakes_{medicine_id}")
}

/// A durable string-to-string store.
pub trait KvStore {
    /// Read the value under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}

/// Read and decode a JSON array under `key`. An absent key is an empty list.
pub(crate) fn read_list<T, S>(store: &S, key: &str) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        }),
        None => Ok(Vec::new()),
    }
}

/// Encode `items` as a JSON array and write it under `key` in one `set`.
pub(crate) fn write_list<T, S>(store: &S, key: &str, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: KvStore + ?Sized,
{
    let raw = serde_json::to_string(items).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// Returns the MediCat data directory, creating it if needed.
///
/// `MEDICAT_DATA_DIR` overrides the location. Otherwise it is
/// `~/.config/medicat/`, or `~/.config/medicat-dev/` when `MEDICAT_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("MEDICAT_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("MEDICAT_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("medicat-dev")
            } else {
                base_dir.join("medicat")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
