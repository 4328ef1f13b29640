//! Per-collection lock table.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Result, StoreError};

/// Exclusive lock guarding one collection.
pub type CollectionLock = Arc<Mutex<()>>;

/// Maps collection names to their exclusive locks.
///
/// The outer mutex only guards the lookup-or-create step; it is released
/// before the caller locks the returned collection lock, so it is never
/// held during I/O.
///
/// Collection locks guard no data, so a poisoned one is still safe to take.
///
/// Entries are never evicted. A lock outlives its collection directory and
/// is reused if the collection is recreated.
#[derive(Debug, Default)]
pub struct MutexRegistry {
    locks: Mutex<HashMap<String, CollectionLock>>,
}

impl MutexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `collection`, creating it on first use.
    pub fn acquire(&self, collection: &str) -> Result<CollectionLock> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;

        let lock = locks
            .entry(collection.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())));
        Ok(Arc::clone(lock))
    }

    /// Number of collection locks created so far.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_same_name_same_lock() {
        let registry = MutexRegistry::new();
        let a = registry.acquire("users").unwrap();
        let b = registry.acquire("users").unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_names_distinct_locks() {
        let registry = MutexRegistry::new();
        let a = registry.acquire("users").unwrap();
        let b = registry.acquire("orders").unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_concurrent_first_use_creates_one_lock() {
        let registry = Arc::new(MutexRegistry::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.acquire("users").unwrap())
            })
            .collect();

        let locks: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(registry.len(), 1);
        assert!(locks.iter().all(|l| Arc::ptr_eq(l, &locks[0])));
    }

    #[test]
    fn test_len_survives_poisoned_registry() {
        let registry = Arc::new(MutexRegistry::new());
        registry.acquire("users").unwrap();

        let poisoner = Arc::clone(&registry);
        let _ = thread::spawn(move || {
            let _held = poisoner.locks.lock().unwrap();
            panic!("poison the registry");
        })
        .join();

        assert!(matches!(
            registry.acquire("orders"),
            Err(StoreError::LockPoisoned(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_not_held_while_collection_locked() {
        let registry = MutexRegistry::new();
        let users = registry.acquire("users").unwrap();
        let _guard = users.lock().unwrap();

        // Another collection can still be looked up and locked.
        let orders = registry.acquire("orders").unwrap();
        assert!(orders.try_lock().is_ok());
    }
}
