//! Cache Engine - the bounded cache in front of a backing store.
//!
//! The [`Cache`] provides:
//! - O(1) residency lookup by item id
//! - Policy-driven reordering on hit and victim selection on miss
//! - Hit/miss/latency accounting
//! - Copy-out reads: callers never borrow cache storage

use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::cache::entry::CacheEntry;
use crate::cache::entry_table::EntryTable;
use crate::cache::replacer::Policy;
use crate::cache::stats::CacheStats;
use crate::common::config::CACHE_READ_LATENCY;
use crate::common::{ItemId, Result};
use crate::storage::BackingStore;

/// A fixed-capacity text cache.
///
/// # Architecture
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │                          Cache<S>                           │
/// │  ┌──────────────────────────────┐   ┌──────────────────┐    │
/// │  │          EntryTable          │   │    CacheStats    │    │
/// │  │ arena[id] + front..back order│   │ hits/misses/lat  │    │
/// │  └──────────────────────────────┘   └──────────────────┘    │
/// │  ┌──────────────────────────────┐   ┌──────────────────┐    │
/// │  │  Policy → &dyn Replacer      │   │   store: S       │    │
/// │  │  record_hit / victim         │   │  BackingStore    │    │
/// │  └──────────────────────────────┘   └──────────────────┘    │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// # Thread Safety
/// `Cache` is single-owner: `access` takes `&mut self`, so the table and
/// the statistics are always updated together. Wrap it in a
/// [`SharedCache`](crate::cache::SharedCache) to share it between threads.
///
/// # Usage
/// ```
/// use textcache::{Cache, ItemId, Policy};
/// use textcache::storage::SyntheticStore;
/// use std::time::Duration;
///
/// let mut cache = Cache::with_hit_latency(2, Duration::ZERO, SyntheticStore::instant());
/// let id = ItemId::new(7).unwrap();
///
/// let first = cache.access(id, Policy::Lru).unwrap();
/// let second = cache.access(id, Policy::Lru).unwrap();
/// assert_eq!(first, second);
///
/// let stats = cache.stats().snapshot();
/// assert_eq!((stats.hits, stats.misses), (1, 1));
/// ```
pub struct Cache<S> {
    /// Resident entries and their eviction order.
    entries: EntryTable,

    /// Maximum number of resident entries (immutable after construction).
    capacity: usize,

    /// Simulated cost of serving a hit.
    hit_latency: Duration,

    /// Source of content on a miss.
    store: S,

    /// Accounting for this cache only.
    stats: CacheStats,
}

impl<S: BackingStore> Cache<S> {
    /// Create a cache with the default hit latency.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize, store: S) -> Self {
        Self::with_hit_latency(capacity, CACHE_READ_LATENCY, store)
    }

    /// Create a cache with a custom hit latency.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn with_hit_latency(capacity: usize, hit_latency: Duration, store: S) -> Self {
        assert!(capacity > 0, "capacity must be > 0");

        Self {
            entries: EntryTable::new(),
            capacity,
            hit_latency,
            store,
            stats: CacheStats::new(),
        }
    }

    // ========================================================================
    // Public API: Access
    // ========================================================================

    /// Return a copy of the item's content, loading it on a miss.
    ///
    /// On a hit the policy reorders the entry. On a miss the content is
    /// fetched, a victim is evicted if the cache is full, and the new entry
    /// goes to the front. The elapsed time of the whole call is added to
    /// the statistics either way.
    ///
    /// # Errors
    /// - `Error::Allocation` / `Error::Io` if the store read fails. The miss
    ///   is still counted, but nothing is inserted or evicted.
    pub fn access(&mut self, item_id: ItemId, policy: Policy) -> Result<String> {
        let start = Instant::now();

        let result = match self.entries.get(item_id).map(CacheEntry::content_copy) {
            Some(content) => {
                self.handle_hit(item_id, policy);
                Ok(content)
            }
            None => self.handle_miss(item_id, policy),
        };

        self.stats.add_latency(start.elapsed());
        result
    }

    // ========================================================================
    // Public API: Stats and info
    // ========================================================================

    /// Maximum number of resident entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of resident entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is resident.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `item_id` is resident.
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.entries.contains(item_id)
    }

    /// The resident entry for `item_id`, if any.
    pub fn entry(&self, item_id: ItemId) -> Option<&CacheEntry> {
        self.entries.get(item_id)
    }

    /// Resident ids in eviction order, front (newest) to back (victim end).
    pub fn resident_ids(&self) -> Vec<ItemId> {
        self.entries.ids()
    }

    /// Get cache statistics.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drop every resident entry and reset the statistics.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.reset();
    }

    /// Panics if the capacity bound or the table's internal links are broken.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.entries.len() <= self.capacity, "over capacity");
        self.entries.debug_validate_invariants();
    }

    // ========================================================================
    // Internal: Hit and miss paths
    // ========================================================================

    fn handle_hit(&mut self, item_id: ItemId, policy: Policy) {
        self.stats.record_hit();

        if !self.hit_latency.is_zero() {
            thread::sleep(self.hit_latency);
        }

        policy.replacer().record_hit(&mut self.entries, item_id);
    }

    fn handle_miss(&mut self, item_id: ItemId, policy: Policy) -> Result<String> {
        self.stats.record_miss(item_id);

        let read = self.store.read(item_id)?;
        debug!(
            "miss on item {} served in {:?} (synthetic: {})",
            item_id, read.elapsed, read.synthetic
        );

        while self.entries.len() >= self.capacity {
            if !self.evict(policy) {
                break;
            }
        }

        self.entries
            .push_front(CacheEntry::new(item_id, read.content.clone()));

        Ok(read.content)
    }

    /// Evict one entry chosen by `policy`. Returns `false` if none was.
    fn evict(&mut self, policy: Policy) -> bool {
        let Some(victim) = policy.replacer().victim(&self.entries) else {
            return false;
        };

        match self.entries.remove(victim) {
            Some(entry) => {
                self.stats.record_eviction();
                debug!(
                    "{} evicted item {} (frequency {})",
                    policy,
                    victim,
                    entry.access_frequency()
                );
                true
            }
            None => false,
        }
    }
}
