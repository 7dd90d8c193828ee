//! Backend seam between the test module and a cache engine.

use std::sync::Arc;

use crate::value::CacheValue;

// == Engine Status ==
/// Runtime availability of a cache engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatus {
    /// Engine is present in this process
    pub loaded: bool,
    /// General enable switch
    pub enabled: bool,
    /// Enable switch for command-line execution
    pub enable_cli: bool,
}

impl EngineStatus {
    /// Loaded and enabled in every mode.
    pub fn available() -> Self {
        Self {
            loaded: true,
            enabled: true,
            enable_cli: true,
        }
    }

    /// No engine present.
    pub fn missing() -> Self {
        Self {
            loaded: false,
            enabled: false,
            enable_cli: false,
        }
    }
}

// == Cache Backend ==
/// Primitive operations a cache engine offers.
///
/// Calls are synchronous and individually atomic. Failures are reported as
/// `false`, never as errors, and `fetch` signals a missing key with `None`.
pub trait CacheBackend: Send + Sync {
    /// Removes every entry.
    fn clear(&self) -> bool;

    /// True if `key` holds a live entry, whatever its value.
    fn exists(&self, key: &str) -> bool;

    /// Reads `key`.
    fn fetch(&self, key: &str) -> Option<CacheValue>;

    /// Writes `key`, replacing any previous entry. `ttl` is in seconds,
    /// 0 = no expiry.
    fn store(&self, key: &str, value: CacheValue, ttl: u64) -> bool;

    /// Whether the engine is loaded and enabled.
    fn status(&self) -> EngineStatus;
}

/// Shared handle injected into a [`CacheModule`](crate::CacheModule).
pub type SharedBackend = Arc<dyn CacheBackend>;
