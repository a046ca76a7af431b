//! LRU (Least Recently Used) replacement policy.

use crate::cache::entry_table::EntryTable;
use crate::cache::replacer::Replacer;
use crate::common::ItemId;

/// Evicts the entry that was inserted or hit longest ago.
///
/// Every hit moves the entry to the front, so the back of the table is the
/// least recently used resident.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruReplacer;

impl Replacer for LruReplacer {
    fn record_hit(&self, entries: &mut EntryTable, item_id: ItemId) {
        entries.move_to_front(item_id);
    }

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

    #[test]
    fn test_lru_hit_protects_entry() {
        let mut table = EntryTable::new();
        for n in 1..=3 {
            table.push_front(CacheEntry::new(id(n), String::new()));
        }
        let replacer = LruReplacer;

        assert_eq!(replacer.victim(&table), Some(id(1)));

        replacer.record_hit(&mut table, id(1));
        assert_eq!(replacer.victim(&table), Some(id(2)));
        assert_eq!(table.front_id(), Some(id(1)));
    }

    #[test]
    fn test_lru_empty() {
        assert_eq!(LruReplacer.victim(&EntryTable::new()), None);
    }
}
