//! Eviction policy implementations (replacers).
//!
//! Implements:
//! - [`FifoReplacer`] - Insertion order, hits ignored
//! - [`LruReplacer`] - Recency order, hits move to front
//! - [`LfuReplacer`] - Minimum frequency, recency as tie-break
//!
//! [`Policy`] is the runtime selector that maps to one of them.

mod fifo;
mod lfu;
mod lru;

use std::fmt;
use std::str::FromStr;

pub use fifo::FifoReplacer;
pub use lfu::LfuReplacer;
pub use lru::LruReplacer;

use crate::cache::entry_table::EntryTable;
use crate::common::{Error, ItemId, Result};

/// Decides how hits reorder entries and which entry to evict.
///
/// Replacers are stateless: all state they consult lives in the
/// [`EntryTable`] (order and frequency).
pub trait Replacer {
    /// Update the table after a hit on a resident `item_id`.
    fn record_hit(&self, entries: &mut EntryTable, item_id: ItemId);

    /// Pick the entry to evict, or `None` if the table is empty.
    fn victim(&self, entries: &EntryTable) -> Option<ItemId>;
}

/// The eviction policy in effect for an access.
///
/// # Example
/// ```
/// use textcache::Policy;
///
/// assert_eq!("1".parse::<Policy>().unwrap(), Policy::Lru);
/// assert_eq!("lfu".parse::<Policy>().unwrap(), Policy::Lfu);
/// assert_eq!(Policy::Fifo.to_string(), "FIFO");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Fifo,
    Lru,
    Lfu,
}

impl Policy {
    /// Every policy, in selector order.
    pub const ALL: [Policy; 3] = [Policy::Fifo, Policy::Lru, Policy::Lfu];

    /// Numeric selector used by the session prompt.
    pub fn selector(self) -> u8 {
        match self {
            Policy::Fifo => 0,
            Policy::Lru => 1,
            Policy::Lfu => 2,
        }
    }

    /// Inverse of [`Policy::selector`].
    pub fn from_selector(selector: i64) -> Result<Self> {
        match selector {
            0 => Ok(Policy::Fifo),
            1 => Ok(Policy::Lru),
            2 => Ok(Policy::Lfu),
            other => Err(Error::InvalidPolicy(other.to_string())),
        }
    }

    /// Upper-case name, as used in report file names.
    pub fn name(self) -> &'static str {
        match self {
            Policy::Fifo => "FIFO",
            Policy::Lru => "LRU",
            Policy::Lfu => "LFU",
        }
    }

    /// The replacer implementing this policy.
    pub fn replacer(self) -> &'static dyn Replacer {
        match self {
            Policy::Fifo => &FifoReplacer,
            Policy::Lru => &LruReplacer,
            Policy::Lfu => &LfuReplacer,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = Error;

    /// Accepts the numeric selector or the policy name, case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(selector) = s.parse::<i64>() {
            return Policy::from_selector(selector);
        }
        Policy::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidPolicy(s.to_string()))
    }
}
