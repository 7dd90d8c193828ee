//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;
use crate::config::Config;

/// Spawns a background task that periodically sweeps expired entries out of
/// `cache`.
///
/// Lookups already ignore expired entries; the sweep only reclaims memory
/// and capacity. Abort the returned handle to stop it.
///
/// # Example
/// ```ignore
/// let cache = MemoryCache::global();
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 1);
/// // Later:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: Arc<MemoryCache>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

/// [`spawn_cleanup_task`] using `config.cleanup_interval`.
pub fn spawn_cleanup_task_from_config(cache: Arc<MemoryCache>, config: &Config) -> JoinHandle<()> {
    spawn_cleanup_task(cache, config.cleanup_interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheBackend;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let cache = Arc::new(MemoryCache::new());
        cache.store("expire_soon", "value".into(), 1);
        cache.store("long_lived", "value".into(), 3600);

        let handle = spawn_cleanup_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(cache.len(), 1, "Expired entry should have been swept");
        assert!(cache.exists("long_lived"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_from_config_uses_interval() {
        let cache = Arc::new(MemoryCache::new());
        cache.store("expire_soon", "value".into(), 1);
        let config = Config {
            cleanup_interval: 1,
            ..Config::default()
        };

        let handle = spawn_cleanup_task_from_config(cache.clone(), &config);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert!(cache.is_empty(), "Sweep should run on the configured interval");

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = Arc::new(MemoryCache::new());

        let handle = spawn_cleanup_task(cache, 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
