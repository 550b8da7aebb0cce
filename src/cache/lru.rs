//! LRU Ordered Index Module
//!
//! Implements the recency list used for LRU eviction as a doubly linked list
//! stored in a slab of slots addressed by stable `usize` handles.

use crate::cache::Entry;

// == Ordered Index ==
/// Tracks access order for LRU eviction strategy.
///
/// Entries live in a slab; links between them are slot handles:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Vacated slots are recycled through a free list, so a handle stays valid
/// until its entry is removed and may then be reused for a later insert.
#[derive(Debug)]
pub struct OrderedIndex<K, V> {
    /// Entry storage, None = vacant slot
    slots: Vec<Option<Entry<K, V>>>,
    /// Vacant slots available for reuse
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> Default for OrderedIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> OrderedIndex<K, V> {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty index with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts an entry at the most recently used end and returns its handle.
    ///
    /// Any link state carried by `entry` is discarded.
    pub fn push_front(&mut self, mut entry: Entry<K, V>) -> usize {
        entry.prev = None;
        entry.next = None;

        let handle = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };

        self.link_front(handle);
        handle
    }

    // == Remove ==
    /// Detaches the entry at `handle` and returns it.
    ///
    /// Returns None without touching the list if the slot is vacant or out
    /// of range, so removing an already removed entry is a no-op.
    pub fn remove(&mut self, handle: usize) -> Option<Entry<K, V>> {
        if !self.unlink(handle) {
            return None;
        }
        let entry = self.slots[handle].take();
        self.free.push(handle);
        entry
    }

    // == Move To Front ==
    /// Marks the entry at `handle` as most recently used.
    ///
    /// No-op if it is already the head or the slot is vacant.
    pub fn move_to_front(&mut self, handle: usize) {
        if self.head == Some(handle) {
            return;
        }
        if self.unlink(handle) {
            self.link_front(handle);
        }
    }

    // == Pop Back ==
    /// Detaches and returns the least recently used entry.
    ///
    /// Returns None if the index is empty.
    pub fn pop_back(&mut self) -> Option<Entry<K, V>> {
        let tail = self.tail?;
        self.remove(tail)
    }

    // == Accessors ==
    /// Returns the entry at `handle`, if the slot is occupied.
    pub fn get(&self, handle: usize) -> Option<&Entry<K, V>> {
        self.slots.get(handle).and_then(Option::as_ref)
    }

    /// Returns a mutable reference to the entry at `handle`.
    ///
    /// Link fields are crate-private, so callers cannot corrupt the list.
    pub fn get_mut(&mut self, handle: usize) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(handle).and_then(Option::as_mut)
    }

    /// Handle of the most recently used entry.
    pub fn front(&self) -> Option<usize> {
        self.head
    }

    /// Handle of the least recently used entry.
    pub fn back(&self) -> Option<usize> {
        self.tail
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iter ==
    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            index: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    // == Keys ==
    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|entry| &entry.key)
    }

    // == Clear ==
    /// Drops every entry and releases all slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // Links an occupied, currently detached slot in as the new head.
    fn link_front(&mut self, handle: usize) {
        let old_head = self.head;
        if let Some(entry) = self.get_mut(handle) {
            entry.prev = None;
            entry.next = old_head;
        }

        match old_head.and_then(|h| self.get_mut(h)) {
            Some(head) => head.prev = Some(handle),
            None => self.tail = Some(handle),
        }

        self.head = Some(handle);
        self.len += 1;
    }

    // Re-links the neighbours of `handle` around it. Returns false for a
    // vacant slot. Every occupied slot is linked.
    fn unlink(&mut self, handle: usize) -> bool {
        let (prev, next) = match self.get(handle) {
            Some(entry) => (entry.prev, entry.next),
            None => return false,
        };

        match prev.and_then(|p| self.get_mut(p)) {
            Some(entry) => entry.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.get_mut(n)) {
            Some(entry) => entry.prev = prev,
            None => self.tail = prev,
        }

        if let Some(entry) = self.get_mut(handle) {
            entry.prev = None;
            entry.next = None;
        }

        self.len -= 1;
        true
    }
}

// == Iterator ==
/// Front-to-back iterator over an [`OrderedIndex`].
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    index: &'a OrderedIndex<K, V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.index.get(self.cursor?)?;
        self.cursor = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
