//! Error types for textcache.

use thiserror::Error;

use crate::common::config::NUM_ITEMS;
use crate::common::ItemId;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in textcache.
///
/// A missing backing file is not an error: the store serves placeholder
/// content instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Identifier outside `1..=NUM_ITEMS`.
    #[error("invalid item id {0}: must be in 1..={max}", max = NUM_ITEMS)]
    InvalidItemId(i64),

    /// Algorithm selector that does not name a policy.
    #[error("invalid policy selector {0:?}: expected 0 (FIFO), 1 (LRU) or 2 (LFU)")]
    InvalidPolicy(String),

    /// Session input that could not be parsed.
    #[error("invalid input {0:?}")]
    InvalidCommand(String),

    /// The content buffer for an item could not be allocated.
    #[error("could not allocate {bytes} bytes for item {item}")]
    Allocation { item: ItemId, bytes: usize },

    /// I/O error from the backing store or the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure persisting a miss report.
    #[error("report error: {0}")]
    Report(#[from] csv::Error),
}
