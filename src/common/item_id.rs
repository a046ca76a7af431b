//! Item identifier type.

use std::fmt;

use crate::common::config::NUM_ITEMS;
use crate::common::{Error, Result};

/// Identifies a text item in the backing store and in the cache.
///
/// Only values in `1..=NUM_ITEMS` can be constructed, so every `ItemId`
/// that reaches the cache engine is already range-checked.
///
/// # Example
/// ```
/// use textcache::ItemId;
///
/// let id = ItemId::new(42).unwrap();
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.index(), 41);
/// assert!(ItemId::new(0).is_err());
/// assert!(ItemId::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    /// Smallest valid identifier.
    pub const MIN: ItemId = ItemId(1);

    /// Largest valid identifier.
    pub const MAX: ItemId = ItemId(NUM_ITEMS);

    /// Create an ItemId, rejecting values outside `1..=NUM_ITEMS`.
    pub fn new(id: u32) -> Result<Self> {
        if (1..=NUM_ITEMS).contains(&id) {
            Ok(ItemId(id))
        } else {
            Err(Error::InvalidItemId(i64::from(id)))
        }
    }

    /// The raw identifier.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Zero-based slot for dense per-item tables.
    #[inline]
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Inverse of [`ItemId::index`].
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_ITEMS as usize);
        ItemId(index as u32 + 1)
    }

    /// Every valid identifier, ascending.
    pub fn all() -> impl Iterator<Item = ItemId> {
        (1..=NUM_ITEMS).map(ItemId)
    }
}

impl TryFrom<i64> for ItemId {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        u32::try_from(value)
            .map_err(|_| Error::InvalidItemId(value))
            .and_then(ItemId::new)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
