//! MemoryStorage - In-Memory Key/Value Storage

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashMap;

use super::KeyValueStorage;
use crate::error::Result;

/// In-memory storage.
///
/// Cloning yields another handle to the same entries, so a caller can keep a
/// handle while the store owns another one.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<AHashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with entries
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Rc::new(RefCell::new(map)),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if no entries are stored
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.set_item("lang", "fr").ok();

        assert_eq!(handle.get_item("lang").ok().flatten().as_deref(), Some("fr"));
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn test_missing_key_is_none() {
        let storage = MemoryStorage::with_entries([("theme", "dark")]);
        assert_eq!(storage.get_item("lang").ok().flatten(), None);
        assert_eq!(storage.get_item("theme").ok().flatten().as_deref(), Some("dark"));
        assert!(!storage.is_empty());
    }
}
