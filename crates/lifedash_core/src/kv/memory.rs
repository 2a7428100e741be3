//! In-memory key-value store.
//!
//! Used by tests and by hosts that keep state only for the process lifetime.
//! Not `Sync`: the store assumes one logical actor at a time.

use super::{KeyValueStore, KvError, KvResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// `BTreeMap`-backed store with an optional byte quota.
///
/// The quota counts UTF-8 bytes of every key plus its value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    /// Creates an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once `quota_bytes` would be exceeded.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: RefCell::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Returns all keys in lexical order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    /// Returns the number of bytes currently accounted against the quota.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        if let Some(quota_bytes) = self.quota_bytes {
            let replaced = self
                .entries
                .borrow()
                .get(key)
                .map_or(0, |previous| key.len() + previous.len());
            let required_bytes = self.used_bytes() - replaced + key.len() + value.len();
            if required_bytes > quota_bytes {
                return Err(KvError::QuotaExceeded {
                    key: key.to_string(),
                    required_bytes,
                    quota_bytes,
                });
            }
        }

        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::kv::{KeyValueStore, KvError};

    #[test]
    fn get_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("users").unwrap(), None);
    }

    #[test]
    fn set_overwrites_and_remove_is_idempotent() {
        let store = MemoryStore::new();
        store.set("currentUser", "a").unwrap();
        store.set("currentUser", "b").unwrap();
        assert_eq!(store.get("currentUser").unwrap().as_deref(), Some("b"));

        store.remove("currentUser").unwrap();
        store.remove("currentUser").unwrap();
        assert_eq!(store.get("currentUser").unwrap(), None);
    }

    #[test]
    fn quota_rejection_keeps_previous_value() {
        let store = MemoryStore::with_quota(16);
        store.set("k", "0123456789").unwrap();

        let err = store.set("k", "0123456789abcdef").unwrap_err();
        assert!(matches!(
            err,
            KvError::QuotaExceeded {
                required_bytes: 17,
                quota_bytes: 16,
                ..
            }
        ));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("0123456789"));
    }

    #[test]
    fn quota_accounts_for_replaced_value() {
        let store = MemoryStore::with_quota(12);
        store.set("k", "0123456789").unwrap();
        store.set("k", "abcdefghij").unwrap();
        assert_eq!(store.used_bytes(), 11);
    }
}
