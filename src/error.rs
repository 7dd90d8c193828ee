//! Error types for the cache engine and the test module
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised inside the in-memory cache engine.
///
/// These never reach a test body directly: the backend boundary reports them
/// as a `false` result, the same way a host cache extension does.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Store is at capacity and the key is new
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Lock poisoned or other engine fault
    #[error("Internal error: {0}")]
    Internal(String),
}

// == Module Error Enum ==
/// Errors surfaced to a test by [`CacheModule`](crate::CacheModule).
#[derive(Error, Debug)]
pub enum ModuleError {
    /// Setup failure raised by the pre-test hook. Aborts the test before its
    /// body runs.
    #[error("[{module}] {reason}")]
    Module {
        /// Identity of the module that refused to start
        module: &'static str,
        /// Human-readable reason
        reason: String,
    },

    /// An expectation about the cache was not met
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// A structured value could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModuleError {
    /// Returns true for the setup (infrastructure) variant.
    pub fn is_setup(&self) -> bool {
        matches!(self, ModuleError::Module { .. })
    }

    /// Returns true for a plain assertion failure.
    pub fn is_assertion(&self) -> bool {
        matches!(self, ModuleError::Assertion(_))
    }
}

// == Result Type Aliases ==
/// Result type for engine operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Result type for module verbs and hooks.
pub type Result<T> = std::result::Result<T, ModuleError>;
