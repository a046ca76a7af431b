//! LFU (Least Frequently Used) replacement policy.

use crate::cache::entry::CacheEntry;
use crate::cache::entry_table::EntryTable;
use crate::cache::replacer::Replacer;
use crate::common::ItemId;

/// Evicts the entry with the lowest access frequency.
///
/// Hits bump the frequency and also move the entry to the front. Among
/// entries tied at the minimum frequency the one nearest the back, i.e.
/// least recently touched, is chosen.
///
/// # Victim Selection
/// Two passes over at most `capacity` entries:
/// 1. Front to back, find the minimum frequency.
/// 2. Back to front, take the first entry at that frequency.
#[derive(Debug, Clone, Copy, Default)]
pub struct LfuReplacer;

impl Replacer for LfuReplacer {
    fn record_hit(&self, entries: &mut EntryTable, item_id: ItemId) {
        if let Some(entry) = entries.get_mut(item_id) {
            entry.bump_frequency();
        }
        entries.move_to_front(item_id);
    }

    fn victim(&self, entries: &EntryTable) -> Option<ItemId> {
        let min = entries.iter().map(CacheEntry::access_frequency).min()?;
        entries
            .iter()
            .rev()
            .find(|entry| entry.access_frequency() == min)
            .map(CacheEntry::item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_lfu_evicts_min_frequency() {
        let mut table = table_of(&[5, 6]);
        let replacer = LfuReplacer;

        replacer.record_hit(&mut table, id(5));

        assert_eq!(table.get(id(5)).unwrap().access_frequency(), 2);
        assert_eq!(replacer.victim(&table), Some(id(6)));
    }

    #[test]
    fn test_lfu_tie_breaks_by_recency() {
        // Order front→back after inserts: 3, 2, 1. All at frequency 1.
        let mut table = table_of(&[1, 2, 3]);
        let replacer = LfuReplacer;

        assert_eq!(replacer.victim(&table), Some(id(1)));

        // 1 and 2 reach frequency 2; 2 is touched last.
        replacer.record_hit(&mut table, id(1));
        replacer.record_hit(&mut table, id(2));
        // 3 is now the only entry at frequency 1.
        assert_eq!(replacer.victim(&table), Some(id(3)));

        replacer.record_hit(&mut table, id(3));
        // All at 2; order front→back: 3, 2, 1. Back-most wins.
        assert_eq!(replacer.victim(&table), Some(id(1)));
    }

    #[test]
    fn test_lfu_hit_moves_to_front() {
        let mut table = table_of(&[1, 2, 3]);
        LfuReplacer.record_hit(&mut table, id(1));

        assert_eq!(table.front_id(), Some(id(1)));
    }

    #[test]
    fn test_lfu_empty() {
        assert_eq!(LfuReplacer.victim(&EntryTable::new()), None);
    }
}
