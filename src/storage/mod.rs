//! Storage layer - the slow backing store behind the cache.
//!
//! This module provides:
//! - [`BackingStore`] - The store interface consulted on a miss
//! - [`FileStore`] - One text file per item, with a synthetic fallback
//! - [`SyntheticStore`] - Placeholder content behind an injected delay

mod backing_store;
mod file_store;
mod synthetic_store;

pub use backing_store::{placeholder_content, BackingStore, StoreRead};
pub use file_store::FileStore;
pub use synthetic_store::SyntheticStore;
