//! EntryTable - resident entries plus their eviction order.
//!
//! Entries live in a dense arena indexed by [`ItemId`], and are linked into
//! a doubly linked order by id rather than by pointer:
//!
//! ```text
//!   slots (Vec<Option<Slot>>, one per item id)
//!   ┌──────┬──────────────────────────────────────────┐
//!   │ id 3 │ Slot { entry, prev: None,    next: 7 }   │
//!   │ id 7 │ Slot { entry, prev: 3,       next: 1 }   │
//!   │ id 1 │ Slot { entry, prev: 7,       next: None } │
//!   └──────┴──────────────────────────────────────────┘
//!
//!   head ─► [3] ◄──► [7] ◄──► [1] ◄── tail
//!   front (newest / most recent)       back (victim end)
//! ```
//!
//! The arena doubles as the id → entry mapping, so the mapping and the
//! order can never disagree about which items are resident.
//!
//! ## Performance
//! - `contains` / `get`: O(1)
//! - `push_front` / `remove` / `move_to_front`: O(1)
//! - `iter` / `iter().rev()`: O(n)

use crate::cache::entry::CacheEntry;
use crate::common::config::NUM_ITEMS;
use crate::common::ItemId;

#[derive(Debug)]
struct Slot {
    entry: CacheEntry,
    prev: Option<ItemId>,
    next: Option<ItemId>,
}

/// Arena of resident entries linked in eviction order.
#[derive(Debug)]
pub struct EntryTable {
    slots: Vec<Option<Slot>>,
    head: Option<ItemId>,
    tail: Option<ItemId>,
    len: usize,
}

impl EntryTable {
    /// Create an empty table with one slot per possible item.
    pub fn new() -> Self {
        Self {
            slots: (0..NUM_ITEMS).map(|_| None).collect(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `item_id` is resident.
    #[inline]
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.slots[item_id.index()].is_some()
    }

    /// The entry for `item_id`, if resident.
    pub fn get(&self, item_id: ItemId) -> Option<&CacheEntry> {
        self.slot(item_id).map(|slot| &slot.entry)
    }

    /// Mutable access to the entry for `item_id`, if resident.
    pub fn get_mut(&mut self, item_id: ItemId) -> Option<&mut CacheEntry> {
        self.slot_mut(item_id).map(|slot| &mut slot.entry)
    }

    /// Id at the front of the order (most recently inserted or touched).
    pub fn front_id(&self) -> Option<ItemId> {
        self.head
    }

    /// Id at the back of the order (the FIFO/LRU victim).
    pub fn back_id(&self) -> Option<ItemId> {
        self.tail
    }

    /// Iterate entries front to back. Use `.rev()` for back to front.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            table: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Resident ids, front to back.
    pub fn ids(&self) -> Vec<ItemId> {
        self.iter().map(CacheEntry::item_id).collect()
    }

    /// Insert `entry` at the front of the order.
    ///
    /// If an entry for the same item is already resident it is unlinked
    /// first and returned.
    pub fn push_front(&mut self, entry: CacheEntry) -> Option<CacheEntry> {
        let item_id = entry.item_id();
        let displaced = self.remove(item_id);

        self.slots[item_id.index()] = Some(Slot {
            entry,
            prev: None,
            next: None,
        });
        self.attach_front(item_id);
        self.len += 1;

        displaced
    }

    /// Remove `item_id` from the table, returning its entry.
    pub fn remove(&mut self, item_id: ItemId) -> Option<CacheEntry> {
        if !self.contains(item_id) {
            return None;
        }
        self.detach(item_id);
        self.len -= 1;
        self.slots[item_id.index()].take().map(|slot| slot.entry)
    }

    /// Move a resident entry to the front. Returns `false` if not resident.
    pub fn move_to_front(&mut self, item_id: ItemId) -> bool {
        if !self.contains(item_id) {
            return false;
        }
        if self.head != Some(item_id) {
            self.detach(item_id);
            self.attach_front(item_id);
        }
        true
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // ========================================================================
    // Internal: link maintenance
    // ========================================================================

    fn slot(&self, item_id: ItemId) -> Option<&Slot> {
        self.slots[item_id.index()].as_ref()
    }

    fn slot_mut(&mut self, item_id: ItemId) -> Option<&mut Slot> {
        self.slots[item_id.index()].as_mut()
    }

    /// Unlink a resident slot from its neighbours. The slot itself stays.
    fn detach(&mut self, item_id: ItemId) {
        let (prev, next) = match self.slot(item_id) {
            Some(slot) => (slot.prev, slot.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(slot) = self.slot_mut(p) {
                    slot.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(slot) = self.slot_mut(n) {
                    slot.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(slot) = self.slot_mut(item_id) {
            slot.prev = None;
            slot.next = None;
        }
    }

    /// Link a resident, currently unlinked slot in at the head.
    fn attach_front(&mut self, item_id: ItemId) {
        let old_head = self.head;
        if let Some(slot) = self.slot_mut(item_id) {
            slot.prev = None;
            slot.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(slot) = self.slot_mut(h) {
                    slot.prev = Some(item_id);
                }
            }
            None => self.tail = Some(item_id),
        }
        self.head = Some(item_id);
    }

    /// Panics if the arena and the linked order disagree.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let occupied = self.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(occupied, self.len, "arena occupancy != len");

        let mut forward = Vec::with_capacity(self.len);
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let slot = self.slot(id).expect("linked id is not resident");
            assert_eq!(slot.prev, prev, "broken prev link at {}", id);
            assert_eq!(slot.entry.item_id(), id, "entry stored under wrong id");
            forward.push(id);
            assert!(forward.len() <= self.len, "cycle in order");
            prev = Some(id);
            cursor = slot.next;
        }
        assert_eq!(prev, self.tail, "tail does not end the order");
        assert_eq!(forward.len(), self.len, "order length != len");

        let mut backward: Vec<ItemId> = self.iter().rev().map(CacheEntry::item_id).collect();
        backward.reverse();
        assert_eq!(forward, backward, "forward and backward walks differ");
    }
}

impl Default for EntryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Double-ended iterator over resident entries in eviction order.
pub struct Iter<'a> {
    table: &'a EntryTable,
    front: Option<ItemId>,
    back: Option<ItemId>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CacheEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.table.slot(self.front?)?;
        self.front = slot.next;
        self.remaining -= 1;
        Some(&slot.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.table.slot(self.back?)?;
        self.back = slot.prev;
        self.remaining -= 1;
        Some(&slot.entry)
    }
}

impl ExactSizeIterator for Iter<'_> {}
