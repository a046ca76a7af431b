//! Synthetic store - placeholder content behind an injected delay.

use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use crate::common::config::FALLBACK_LATENCY;
use crate::common::{ItemId, Result};
use crate::storage::backing_store::{placeholder_content, BackingStore, StoreRead};

/// A backing store with no data at all.
///
/// Every read sleeps for the configured delay and returns placeholder
/// content. With a zero delay it is fully deterministic, which makes it the
/// store of choice for tests.
///
/// # Example
/// ```
/// use textcache::storage::{BackingStore, SyntheticStore};
/// use textcache::ItemId;
///
/// let mut store = SyntheticStore::instant();
/// let read = store.read(ItemId::new(3).unwrap()).unwrap();
/// assert!(read.synthetic);
/// assert_eq!(store.reads(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticStore {
    delay: Duration,
    reads: u64,
}

impl SyntheticStore {
    /// Create a store that sleeps `delay` on every read.
    pub fn new(delay: Duration) -> Self {
        Self { delay, reads: 0 }
    }

    /// Create a store that never sleeps.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Number of reads served so far.
    pub fn reads(&self) -> u64 {
        self.reads
    }

    /// The injected delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SyntheticStore {
    fn default() -> Self {
        Self::new(FALLBACK_LATENCY)
    }
}

impl BackingStore for SyntheticStore {
    fn read(&mut self, item_id: ItemId) -> Result<StoreRead> {
        let start = Instant::now();
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.reads += 1;
        debug!("synthetic read of item {} ({:?} delay)", item_id, self.delay);

        Ok(StoreRead {
            content: placeholder_content(item_id),
            elapsed: start.elapsed(),
            synthetic: true,
        })
    }
}
