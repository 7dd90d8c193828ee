//! Cache Module
//!
//! The cache engine: storage with TTL expiration, the backend seam the test
//! module talks through, and the in-memory backend.

mod backend;
mod entry;
mod memory;
mod store;


// Re-export public types
pub use backend::{CacheBackend, EngineStatus, SharedBackend};
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use store::CacheStore;
