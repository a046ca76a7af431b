//! Cache engine.
//!
//! The cache is the bounded in-memory layer between readers and the slow
//! backing store. It holds a fixed number of entries, each one item.
//!
//! # Components
//! - [`Cache`] - The engine: `access(id, policy) -> content`
//! - [`CacheEntry`] - A resident item plus its LFU frequency
//! - [`EntryTable`] - Arena of entries linked in eviction order
//! - [`CacheStats`] - Hit/miss/latency accounting
//! - [`SharedCache`] - Mutex-serialized cache for multi-threaded callers
//! - [`replacer`] - Eviction policy implementations

mod cache_engine;
mod entry;
mod entry_table;
pub mod replacer;
mod shared;
mod stats;

pub use cache_engine::Cache;
pub use entry::CacheEntry;
pub use entry_table::{EntryTable, Iter};
pub use replacer::Policy;
pub use shared::SharedCache;
pub use stats::{CacheStats, StatsSnapshot};
