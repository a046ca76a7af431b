//! textcache - a bounded text cache comparing FIFO, LRU and LFU eviction.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           textcache                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        Session / Simulation (session, simulation)        │   │
//! │  │   prompt loop · 3×3 experiment suite · CSV miss reports  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │          ↓ ids                                  ↑ ids           │
//! │  ┌──────────────────────────────┐   ┌───────────────────────┐  │
//! │  │     Cache Engine (cache/)    │   │  Workload (workload/)  │  │
//! │  │  ┌────────────────────────┐  │   │ uniform · poisson ·    │  │
//! │  │  │ Policies: FIFO|LRU|LFU │  │   │ weighted hot-range     │  │
//! │  │  └────────────────────────┘  │   └───────────────────────┘  │
//! │  │  EntryTable + CacheStats     │                               │
//! │  └──────────────────────────────┘                               │
//! │                              ↓ miss                             │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │             Backing Store (storage/)                     │   │
//! │  │      FileStore (texts/<id>.txt) · SyntheticStore         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (ItemId, Error, config)
//! - [`cache`] - The cache engine and eviction policies
//! - [`storage`] - The slow backing store
//! - [`workload`] - Id streams for simulations
//! - [`simulation`] - The policy × distribution experiment suite
//! - [`report`] - Per-item miss CSV output
//! - [`session`] - The interactive prompt loop
//!
//! # Quick Start
//! ```no_run
//! use textcache::{Cache, ItemId, Policy};
//! use textcache::storage::FileStore;
//!
//! let mut cache = Cache::new(10, FileStore::new("texts"));
//! let text = cache.access(ItemId::new(42).unwrap(), Policy::Lfu).unwrap();
//! println!("{}", cache.stats().snapshot());
//! ```

pub mod cache;
pub mod common;
pub mod report;
pub mod session;
pub mod simulation;
pub mod storage;
pub mod workload;

// Re-export commonly used items at crate root for convenience
pub use common::config::{CACHE_CAPACITY, NUM_ITEMS};
pub use common::{Error, ItemId, Result};

pub use cache::{Cache, CacheEntry, CacheStats, Policy, SharedCache, StatsSnapshot};
pub use storage::{BackingStore, FileStore, SyntheticStore};
