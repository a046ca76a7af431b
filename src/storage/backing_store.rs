//! The backing store interface consulted on a cache miss.

use std::time::Duration;

use crate::common::{ItemId, Result};

/// Content fetched from a backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRead {
    /// Full text of the item.
    pub content: String,
    /// Wall time the read took, simulated delay included.
    pub elapsed: Duration,
    /// Whether the content is a placeholder rather than stored data.
    pub synthetic: bool,
}

/// A slow source of truth for item content.
///
/// Implementations must treat a missing item as a normal outcome and serve
/// placeholder content for it. Errors are reserved for genuine read
/// failures (I/O, allocation).
pub trait BackingStore {
    /// Read the content of `item_id`.
    fn read(&mut self, item_id: ItemId) -> Result<StoreRead>;
}

impl<S: BackingStore + ?Sized> BackingStore for Box<S> {
    fn read(&mut self, item_id: ItemId) -> Result<StoreRead> {
        (**self).read(item_id)
    }
}

/// Placeholder text served for items without stored content.
pub fn placeholder_content(item_id: ItemId) -> String {
    format!("SIMULATED CONTENT FOR TEXT {} (file not found)\n", item_id)
}
