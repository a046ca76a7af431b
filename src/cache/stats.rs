//! Cache statistics tracking.

use std::fmt;
use std::time::Duration;

use crate::common::config::NUM_ITEMS;
use crate::common::ItemId;

/// Statistics accumulated by one cache.
///
/// A pure accumulator: the engine records into it, reporting reads from
/// it, and nothing in it feeds back into eviction. Counters only grow until
/// [`CacheStats::reset`].
///
/// # Example
/// ```
/// use textcache::{CacheStats, ItemId};
/// use std::time::Duration;
///
/// let mut stats = CacheStats::new();
/// stats.record_hit();
/// stats.record_miss(ItemId::new(4).unwrap());
/// stats.add_latency(Duration::from_millis(10));
///
/// let snapshot = stats.snapshot();
/// assert_eq!(snapshot.requests(), 2);
/// assert_eq!(snapshot.misses_for(ItemId::new(4).unwrap()), 1);
/// assert_eq!(snapshot.mean_latency(), Duration::from_millis(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    evictions: u64,
    total_latency: Duration,
    /// Indexed by `ItemId::index()`.
    per_item_misses: Vec<u64>,
}

impl CacheStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            hits: 0,
            misses: 0,
            evictions: 0,
            total_latency: Duration::ZERO,
            per_item_misses: vec![0; NUM_ITEMS as usize],
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self, item_id: ItemId) {
        self.misses += 1;
        self.per_item_misses[item_id.index()] += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn add_latency(&mut self, elapsed: Duration) {
        self.total_latency += elapsed;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Calculate cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.hits + self.misses)
    }

    /// Get a point-in-time copy of the counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            total_latency: self.total_latency,
            per_item_misses: self.per_item_misses.clone(),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for CacheStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of cache statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_latency: Duration,
    per_item_misses: Vec<u64>,
}

impl StatsSnapshot {
    /// Total accesses served.
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// Calculate cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.requests())
    }

    /// Cumulative latency divided by requests; zero before any request.
    pub fn mean_latency(&self) -> Duration {
        match self.requests() {
            0 => Duration::ZERO,
            n => {
                let nanos = self.total_latency.as_nanos() / u128::from(n);
                Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
            }
        }
    }

    /// Misses recorded for one item.
    pub fn misses_for(&self, item_id: ItemId) -> u64 {
        self.per_item_misses[item_id.index()]
    }

    /// `(item, misses)` for every item, ascending by id.
    pub fn miss_histogram(&self) -> impl Iterator<Item = (ItemId, u64)> + '_ {
        self.per_item_misses
            .iter()
            .enumerate()
            .map(|(index, &count)| (ItemId::from_index(index), count))
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} avg_latency_ms={:.3}",
            self.hits,
            self.misses,
            self.mean_latency().as_secs_f64() * 1000.0
        )
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> ItemId {
        ItemId::new(n).unwrap()
    }

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.misses(), 0);
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.snapshot().mean_latency(), Duration::ZERO);
    }

    #[test]
    fn test_stats_increment() {
        let mut stats = CacheStats::new();
        for _ in 0..7 {
            stats.record_hit();
        }
        for n in [1, 1, 2] {
            stats.record_miss(id(n));
        }

        assert_eq!(stats.hit_rate(), 0.7);
    }

    #[test]
    fn test_per_item_histogram() {
        let mut stats = CacheStats::new();
        stats.record_miss(id(1));
        stats.record_miss(id(100));
        stats.record_miss(id(100));

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.misses_for(id(1)), 1);
        assert_eq!(snapshot.misses_for(id(100)), 2);
        assert_eq!(snapshot.misses_for(id(50)), 0);

        let histogram: Vec<(ItemId, u64)> = snapshot.miss_histogram().collect();
        assert_eq!(histogram.len(), NUM_ITEMS as usize);
        assert_eq!(histogram[0], (id(1), 1));
        assert_eq!(histogram[99], (id(100), 2));
        assert_eq!(histogram.iter().map(|(_, c)| c).sum::<u64>(), snapshot.misses);
    }

    #[test]
    fn test_mean_latency() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss(id(3));
        stats.record_hit();
        stats.record_hit();
        stats.add_latency(Duration::from_millis(8));

        assert_eq!(stats.snapshot().mean_latency(), Duration::from_millis(2));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        let snapshot = stats.snapshot();
        stats.record_hit();

        assert_eq!(snapshot.hits, 1);
        assert_eq!(stats.hits(), 2);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = CacheStats::new();
        stats.record_miss(id(9));
        stats.record_eviction();
        stats.add_latency(Duration::from_secs(1));

        stats.reset();

        assert_eq!(stats, CacheStats::new());
    }

    #[test]
    fn test_stats_display() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss(id(2));
        stats.add_latency(Duration::from_millis(3));

        let display = format!("{}", stats.snapshot());
        assert_eq!(display, "hits=1 misses=1 avg_latency_ms=1.500");
    }
}
