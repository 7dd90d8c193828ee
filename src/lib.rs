//! Cache Assert - test helpers for a shared in-memory cache
//!
//! Lets a test suite seed, inspect and assert on entries of a process-wide
//! key/value cache, and guarantees the cache is empty again after every test.

pub mod cache;
pub mod config;
pub mod error;
pub mod module;
pub mod tasks;
pub mod telemetry;
pub mod value;

pub use cache::{CacheBackend, EngineStatus, MemoryCache, SharedBackend};
pub use config::{Config, ExecutionMode};
pub use error::{ModuleError, Result};
pub use module::{CacheModule, TestContext};
pub use tasks::{spawn_cleanup_task, spawn_cleanup_task_from_config};
pub use telemetry::init_tracing;
pub use value::CacheValue;
