//! In-memory cache backend.
//!
//! Wraps a [`CacheStore`] behind a lock so one instance can be shared by
//! every test in the process.

use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use crate::cache::{CacheBackend, CacheStore, EngineStatus};
use crate::config::Config;
use crate::error::{CacheError, CacheResult};
use crate::value::CacheValue;

static GLOBAL: OnceLock<Arc<MemoryCache>> = OnceLock::new();

// == Memory Cache ==
/// Thread-safe in-memory cache engine.
#[derive(Debug)]
pub struct MemoryCache {
    store: RwLock<CacheStore>,
    status: RwLock<EngineStatus>,
}

impl MemoryCache {
    /// Creates an enabled, unbounded cache.
    pub fn new() -> Self {
        Self::with_status(EngineStatus::available())
    }

    /// Creates an enabled cache holding at most `max_entries` entries.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self::build(Some(max_entries), EngineStatus::available())
    }

    /// Creates an unbounded cache reporting the given availability.
    pub fn with_status(status: EngineStatus) -> Self {
        Self::build(None, status)
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::build(
            config.max_entries,
            EngineStatus {
                loaded: true,
                enabled: config.enabled,
                enable_cli: config.enable_cli,
            },
        )
    }

    fn build(max_entries: Option<usize>, status: EngineStatus) -> Self {
        Self {
            store: RwLock::new(CacheStore::new(max_entries)),
            status: RwLock::new(status),
        }
    }

    /// The process-wide instance, built from the environment on first use.
    pub fn global() -> Arc<MemoryCache> {
        GLOBAL
            .get_or_init(|| Arc::new(Self::from_config(&Config::from_env())))
            .clone()
    }

    /// Replaces the reported availability.
    pub fn set_status(&self, status: EngineStatus) {
        match self.status.write() {
            Ok(mut guard) => *guard = status,
            Err(poisoned) => *poisoned.into_inner() = status,
        }
    }

    // == Maintenance ==
    /// Drops expired entries. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        match self.write() {
            Ok(mut store) => store.cleanup_expired(),
            Err(e) => {
                warn!("TTL cleanup skipped: {}", e);
                0
            }
        }
    }

    /// Number of entries currently held, expired ones included until swept.
    pub fn len(&self) -> usize {
        self.read().map(|store| store.len()).unwrap_or(0)
    }

    /// True when no entries are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> CacheResult<RwLockReadGuard<'_, CacheStore>> {
        self.store
            .read()
            .map_err(|_| CacheError::Internal("cache lock poisoned".to_string()))
    }

    fn write(&self) -> CacheResult<RwLockWriteGuard<'_, CacheStore>> {
        self.store
            .write()
            .map_err(|_| CacheError::Internal("cache lock poisoned".to_string()))
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

// == Backend Implementation ==
impl CacheBackend for MemoryCache {
    fn clear(&self) -> bool {
        match self.write() {
            Ok(mut store) => {
                store.clear();
                true
            }
            Err(e) => {
                warn!("Cache clear failed: {}", e);
                false
            }
        }
    }

    fn exists(&self, key: &str) -> bool {
        self.read().map(|store| store.contains(key)).unwrap_or(false)
    }

    fn fetch(&self, key: &str) -> Option<CacheValue> {
        self.write().ok().and_then(|mut store| store.get(key))
    }

    fn store(&self, key: &str, value: CacheValue, ttl: u64) -> bool {
        let result = self
            .write()
            .and_then(|mut store| store.set(key.to_string(), value, ttl));
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, "Cache store failed: {}", e);
                false
            }
        }
    }

    fn status(&self) -> EngineStatus {
        match self.status.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
