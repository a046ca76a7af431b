//! FIFO (First-In-First-Out) replacement policy.

use crate::cache::entry_table::EntryTable;
use crate::cache::replacer::Replacer;
use crate::common::ItemId;

/// Evicts entries in the order they were inserted.
///
/// Hits leave the order untouched, so the back of the table is always the
/// oldest insertion still resident.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoReplacer;

impl Replacer for FifoReplacer {
    fn record_hit(&self, _entries: &mut EntryTable, _item_id: ItemId) {}

    fn victim(&self, entries: &EntryTable) -> Option<ItemId> {
        entries.back_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::entry::CacheEntry;

    fn id(n: u32) -> ItemId {
        ItemId::new(n).unwrap()
    }

    fn table_of(ids: &[u32]) -> EntryTable {
        let mut table = EntryTable::new();
        for &n in ids {
            table.push_front(CacheEntry::new(id(n), String::new()));
        }
        table
    }

    #[test]
    fn test_fifo_basic() {
        let mut table = table_of(&[1, 2, 3]);
        let replacer = FifoReplacer;

        // Should evict in FIFO order
        for expected in 1..=3 {
            let victim = replacer.victim(&table).unwrap();
            assert_eq!(victim, id(expected));
            table.remove(victim);
        }
        assert_eq!(replacer.victim(&table), None);
    }

    #[test]
    fn test_fifo_reaccess_no_reorder() {
        let mut table = table_of(&[1, 2]);
        let replacer = FifoReplacer;

        replacer.record_hit(&mut table, id(1)); // Access again - should NOT reorder

        assert_eq!(replacer.victim(&table), Some(id(1)));
        assert_eq!(table.get(id(1)).unwrap().access_frequency(), 1);
    }
}
