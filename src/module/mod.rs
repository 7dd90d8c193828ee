//! Cache Test Module
//!
//! Verbs a test body uses to inspect and seed the shared cache.
//!
//! # Verbs
//! - `grab_from_cache` - Read a value for further test logic
//! - `see_in_cache` - Assert a key exists, optionally with a value
//! - `dont_see_in_cache` - Assert a key is absent, or holds a false-like value
//! - `have_in_cache` - Seed an entry
//! - `flush_cache` - Empty the store

mod lifecycle;

pub use lifecycle::TestContext;

use std::sync::Arc;

use tracing::debug;

use crate::cache::{MemoryCache, SharedBackend};
use crate::config::{Config, ExecutionMode};
use crate::error::{ModuleError, Result};
use crate::value::CacheValue;

// == Cache Module ==
/// Test-facing adapter over a shared cache backend.
///
/// Cloning is cheap; clones talk to the same backend.
#[derive(Clone)]
pub struct CacheModule {
    backend: SharedBackend,
    mode: ExecutionMode,
}

impl std::fmt::Debug for CacheModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheModule")
            .field("mode", &self.mode)
            .field("status", &self.backend.status())
            .finish()
    }
}

impl CacheModule {
    /// Identity reported in setup errors.
    pub const NAME: &'static str = "CacheModule";

    /// Creates a module for a command-line test run.
    pub fn new(backend: SharedBackend) -> Self {
        Self::with_mode(backend, ExecutionMode::Cli)
    }

    /// Creates a module checking the backend against `mode`.
    pub fn with_mode(backend: SharedBackend, mode: ExecutionMode) -> Self {
        Self { backend, mode }
    }

    /// Creates a module using the mode from `config`.
    pub fn from_config(backend: SharedBackend, config: &Config) -> Self {
        Self::with_mode(backend, config.execution_mode)
    }

    /// Module bound to the process-wide [`MemoryCache`].
    pub fn global() -> Self {
        let backend: Arc<MemoryCache> = MemoryCache::global();
        Self::from_config(backend, &Config::from_env())
    }

    /// Execution mode the pre-test check runs against.
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    // == Primitives ==
    fn clear(&self) -> bool {
        self.backend.clear()
    }

    fn exists(&self, key: &str) -> bool {
        self.backend.exists(key)
    }

    fn fetch(&self, key: &str) -> Option<CacheValue> {
        let value = self.backend.fetch(key);
        let outcome = if value.is_some() { "OK" } else { "FAILED" };
        debug!(key = %key, outcome = outcome, "Fetching cache key");
        value
    }

    fn store(&self, key: &str, value: CacheValue, ttl: u64) -> bool {
        self.backend.store(key, value, ttl)
    }

    // == Verbs ==
    /// Returns the value stored under `key`, or `CacheValue::Null` if there
    /// is none.
    ///
    /// ```ignore
    /// let users_count = module.grab_from_cache("users_count");
    /// ```
    pub fn grab_from_cache(&self, key: &str) -> CacheValue {
        let value = self.fetch(key).unwrap_or_default();
        debug!(key = %key, value = %value, "Grabbed value from cache");
        value
    }

    /// Asserts that `key` is present.
    ///
    /// With `expected`, asserts the stored value equals it instead.
    pub fn see_in_cache(&self, key: &str, expected: Option<CacheValue>) -> Result<()> {
        match expected {
            None => ensure(self.exists(key), || {
                format!("Cache key '{}' was not found", key)
            }),
            Some(expected) => {
                let actual = self.grab_from_cache(key);
                ensure(actual == expected, || {
                    format!(
                        "Cache key '{}' does not hold the expected value: expected {}, got {}",
                        key, expected, actual
                    )
                })
            }
        }
    }

    /// Asserts that `key` is absent.
    ///
    /// With `expected`, asserts the stored value is false-like (see
    /// [`CacheValue::is_falsy`]). The expected value itself is not compared.
    pub fn dont_see_in_cache(&self, key: &str, expected: Option<CacheValue>) -> Result<()> {
        match expected {
            None => ensure(!self.exists(key), || {
                format!("Cache key '{}' was found but should be absent", key)
            }),
            Some(_) => {
                let actual = self.grab_from_cache(key);
                ensure(actual.is_falsy(), || {
                    format!(
                        "Cache key '{}' holds {}, expected a false-like value",
                        key, actual
                    )
                })
            }
        }
    }

    /// Stores `value` under `key` for `ttl` seconds (0 = no expiry) and
    /// returns the key.
    pub fn have_in_cache(&self, key: &str, value: impl Into<CacheValue>, ttl: u64) -> String {
        // Engine failures are not surfaced here; a later `see_in_cache` catches them.
        self.store(key, value.into(), ttl);
        key.to_string()
    }

    /// [`have_in_cache`](Self::have_in_cache) without expiry.
    pub fn have_in_cache_forever(&self, key: &str, value: impl Into<CacheValue>) -> String {
        self.have_in_cache(key, value, 0)
    }

    /// Removes every entry from the store.
    pub fn flush_cache(&self) {
        self.clear();
    }
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ModuleError::Assertion(message()))
    }
}
