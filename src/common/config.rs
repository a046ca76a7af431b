//! Configuration constants for textcache.

use std::ops::RangeInclusive;
use std::time::Duration;

/// Number of items held by the backing store.
///
/// Valid item identifiers are `1..=NUM_ITEMS`.
pub const NUM_ITEMS: u32 = 100;

/// Default number of resident entries in a cache.
pub const CACHE_CAPACITY: usize = 10;

/// Simulated delay for serving a cache hit.
pub const CACHE_READ_LATENCY: Duration = Duration::from_millis(5);

/// Fixed cost of reading an item that exists on disk.
pub const DISK_BASE_LATENCY: Duration = Duration::from_millis(20);

/// Size component of a disk read: one extra microsecond per this many bytes.
pub const DISK_BYTES_PER_MICRO: u64 = 50;

/// Delay for an item with no backing file (slow fallback path).
pub const FALLBACK_LATENCY: Duration = Duration::from_millis(120);

/// Simulated users per experiment.
pub const SIM_USERS: usize = 3;

/// Requests issued by each simulated user.
pub const SIM_REQUESTS_PER_USER: usize = 200;

/// Mean of the clustered (Poisson) workload.
pub const POISSON_LAMBDA: f64 = 30.0;

/// Largest Poisson sample accepted before folding into the id range.
pub const POISSON_SAMPLE_CAP: u64 = 999;

/// Probability that the weighted workload picks from [`HOT_RANGE`].
pub const HOT_PROBABILITY: f64 = 0.43;

/// Hot sub-range of the weighted workload.
pub const HOT_RANGE: RangeInclusive<u32> = 30..=40;

/// Maximum number of bytes shown when printing an item.
pub const EXCERPT_LIMIT: usize = 1000;

/// Latency model of a backing store.
///
/// # Example
/// ```
/// use textcache::common::config::StoreLatency;
/// use std::time::Duration;
///
/// let latency = StoreLatency::default();
/// assert_eq!(latency.disk_read(100), Duration::from_micros(20_002));
/// assert!(StoreLatency::instant().disk_read(1 << 20).is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLatency {
    /// Fixed part of a real read.
    pub base: Duration,
    /// Bytes per extra microsecond. Zero disables the size component.
    pub bytes_per_micro: u64,
    /// Delay of the synthetic fallback path.
    pub fallback: Duration,
}

impl StoreLatency {
    /// A model that never sleeps. Used by tests and `--no-latency`.
    pub const fn instant() -> Self {
        Self {
            base: Duration::ZERO,
            bytes_per_micro: 0,
            fallback: Duration::ZERO,
        }
    }

    /// Delay charged for reading `len` bytes of real content.
    pub fn disk_read(&self, len: usize) -> Duration {
        let size_part = match self.bytes_per_micro {
            0 => Duration::ZERO,
            per => Duration::from_micros(len as u64 / per),
        };
        self.base + size_part
    }
}

impl Default for StoreLatency {
    fn default() -> Self {
        Self {
            base: DISK_BASE_LATENCY,
            bytes_per_micro: DISK_BYTES_PER_MICRO,
            fallback: FALLBACK_LATENCY,
        }
    }
}

/// Parameters of one simulation experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Cache capacity (entries).
    pub capacity: usize,
    /// Delay charged on each cache hit.
    pub hit_latency: Duration,
    /// Number of simulated users.
    pub users: usize,
    /// Requests per simulated user.
    pub requests_per_user: usize,
    /// Base seed; each experiment derives its own generator from it.
    pub seed: u64,
}

impl SimulationConfig {
    /// Same shape as the default but with every simulated delay removed.
    pub fn instant() -> Self {
        Self {
            hit_latency: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Total requests served by one experiment.
    pub fn total_requests(&self) -> usize {
        self.users * self.requests_per_user
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            capacity: CACHE_CAPACITY,
            hit_latency: CACHE_READ_LATENCY,
            users: SIM_USERS,
            requests_per_user: SIM_REQUESTS_PER_USER,
            seed: 0x5EED,
        }
    }
}
