//! Cache Store Module
//!
//! Key/value storage with TTL expiration and an optional capacity limit.

use std::collections::HashMap;

use crate::cache::CacheEntry;
use crate::error::{CacheError, CacheResult};
use crate::value::CacheValue;

// == Cache Store ==
/// Main cache storage with TTL support.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Maximum number of entries allowed, None = unbounded
    max_entries: Option<usize>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore. With `Some(n)` it holds at most `n` live
    /// entries; `None` never rejects a write.
    pub fn new(max_entries: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
        }
    }

    // == Set ==
    /// Stores a key-value pair, overwriting any existing entry and its TTL.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - TTL in seconds, 0 = no expiration
    pub fn set(&mut self, key: String, value: CacheValue, ttl: u64) -> CacheResult<()> {
        if let Some(max_entries) = self.max_entries {
            self.ensure_room(&key, max_entries)?;
        }

        self.entries.insert(key, CacheEntry::new(value, ttl));
        Ok(())
    }

    fn ensure_room(&mut self, key: &str, max_entries: usize) -> CacheResult<()> {
        if !self.entries.contains_key(key) && self.entries.len() >= max_entries {
            // Expired entries do not count against capacity
            self.cleanup_expired();
            if self.entries.len() >= max_entries {
                return Err(CacheError::CacheFull(format!(
                    "Cache holds {} entries, cannot store '{}'",
                    self.entries.len(),
                    key
                )));
            }
        }
        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Expired entries are removed and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<CacheValue> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    // == Contains ==
    /// Returns true if a live entry exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included until
    /// they are swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
