//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::KvStore;
use crate::error::StoreError;

/// A [`KvStore`] backed by a `HashMap`.
///
/// Writes can be switched off with [`MemoryStore::fail_writes`] to simulate an
/// unavailable store; reads keep working so callers can check that nothing
/// was partially applied.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`delete` fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `get` fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of stored keys. Still counts the entries if a writer panicked
    /// while holding the lock.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_write(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(key, "writes disabled"));
        }
        Ok(())
    }

    fn lock(&self, key: &str) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::unavailable(key, "store mutex poisoned"))
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(key, "reads disabled"));
        }
        Ok(self.lock(key)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_write(key)?;
        self.lock(key)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.check_write(key)?;
        self.lock(key)?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_delete() {
        let store = MemoryStore::new();
        assert!(store.get("a").unwrap().is_none());
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.delete("a").unwrap();
        store.delete("a").unwrap();
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn failing_writes_leave_contents_untouched() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.fail_writes(true);
        assert!(store.set("a", "2").is_err());
        assert!(store.delete("a").is_err());
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn len_survives_poisoned_lock() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.entries.lock().unwrap();
            panic!("writer panicked");
        }));
        assert!(result.is_err());

        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
        assert!(matches!(store.get("a"), Err(StoreError::Unavailable { .. })));
    }

    #[test]
    fn failing_reads() {
        let store = MemoryStore::new();
        store.fail_reads(true);
        assert!(matches!(store.get("a"), Err(StoreError::Unavailable { .. })));
    }
}
