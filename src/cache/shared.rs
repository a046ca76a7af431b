//! SharedCache - a [`Cache`] usable from several threads.

use parking_lot::Mutex;

use crate::cache::cache_engine::Cache;
use crate::cache::replacer::Policy;
use crate::cache::stats::StatsSnapshot;
use crate::common::{ItemId, Result};
use crate::storage::BackingStore;

/// Serializes `access` calls on one cache instance.
///
/// The entry table, its order and the statistics are mutated together on
/// every access; holding the mutex for the whole call means no thread ever
/// observes them half-updated. The simulated latencies sleep while the lock
/// is held, so accesses queue up exactly as they would single-threaded.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use textcache::{Cache, ItemId, Policy, SharedCache};
/// use textcache::storage::SyntheticStore;
///
/// let cache = Arc::new(SharedCache::new(Cache::with_hit_latency(
///     4,
///     Duration::ZERO,
///     SyntheticStore::instant(),
/// )));
/// cache.access(ItemId::new(1).unwrap(), Policy::Lru).unwrap();
/// assert_eq!(cache.len(), 1);
/// ```
pub struct SharedCache<S> {
    inner: Mutex<Cache<S>>,
}

impl<S: BackingStore> SharedCache<S> {
    pub fn new(cache: Cache<S>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    /// See [`Cache::access`].
    pub fn access(&self, item_id: ItemId, policy: Policy) -> Result<String> {
        self.inner.lock().access(item_id, policy)
    }

    /// Get a snapshot of the statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats().snapshot()
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if nothing is resident.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` with exclusive access to the underlying cache.
    pub fn with<R>(&self, f: impl FnOnce(&mut Cache<S>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Unwrap into the underlying cache.
    pub fn into_inner(self) -> Cache<S> {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SyntheticStore;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn create_shared(capacity: usize) -> Arc<SharedCache<SyntheticStore>> {
        Arc::new(SharedCache::new(Cache::with_hit_latency(
            capacity,
            Duration::ZERO,
            SyntheticStore::instant(),
        )))
    }

    #[test]
    fn test_concurrent_accesses_are_all_counted() {
        let cache = create_shared(5);
        let mut handles = vec![];

        for t in 0..8u32 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..100u32 {
                    let id = ItemId::new((t * 7 + i) % 20 + 1).unwrap();
                    let content = cache.access(id, Policy::Lru).unwrap();
                    assert!(content.contains(&format!("TEXT {}", id)));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = cache.stats();
        assert_eq!(snapshot.requests(), 800);
        assert!(cache.len() <= 5);
        cache.with(|c| c.debug_validate_invariants());
    }

    #[test]
    fn test_into_inner() {
        let cache = create_shared(2);
        cache.access(ItemId::MIN, Policy::Fifo).unwrap();

        let cache = Arc::try_unwrap(cache).ok().unwrap().into_inner();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.store().reads(), 1);
    }
}
