//! CacheEntry - one resident item.
//!
//! A [`CacheEntry`] owns its copy of the item's text plus the metadata the
//! replacers need:
//! - Which item it holds (fixed at creation)
//! - How often it was hit while resident (LFU only)

use crate::common::ItemId;

/// A resident item in the cache.
///
/// The content is owned by the entry and never lent out past a single
/// borrow of the cache: callers get [`CacheEntry::content_copy`], so
/// eviction can drop the entry without affecting anything a caller holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    item_id: ItemId,
    content: String,
    access_frequency: u64,
}

impl CacheEntry {
    /// Create an entry for a freshly fetched item (frequency 1).
    pub fn new(item_id: ItemId, content: String) -> Self {
        Self {
            item_id,
            content,
            access_frequency: 1,
        }
    }

    /// The item this entry holds.
    #[inline]
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    /// Borrow the cached text.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// An independent copy of the cached text for handing to callers.
    pub fn content_copy(&self) -> String {
        self.content.clone()
    }

    /// Accesses recorded while resident, counting the insertion.
    #[inline]
    pub fn access_frequency(&self) -> u64 {
        self.access_frequency
    }

    /// Count one more access. Returns the new frequency.
    #[inline]
    pub fn bump_frequency(&mut self) -> u64 {
        self.access_frequency = self.access_frequency.saturating_add(1);
        self.access_frequency
    }
}
