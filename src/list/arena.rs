//! Slot arena backing the linked list.
//!
//! Nodes live in a `Vec` and refer to each other by `SlotIdx`, never by
//! pointer. Released slots go on a free list and are reused by later
//! allocations. A key table maps each live key to its slot:
//! - Lookup by key: O(1) average (hash map)
//! - Node by slot: O(1) (array index)
//!
//! A vacant slot is `None`, so a stale index can never be mistaken for a
//! live node.

use rustc_hash::FxHashMap;

use super::ListKey;

/// Index of a node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct SlotIdx(u32);

impl SlotIdx {
    #[inline]
    fn index(self) -> usize {
        return self.0 as usize;
    }
}

/// A live list element.
#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub key: K,
    /// Neighbour toward the tail (smaller values).
    pub prev: Option<SlotIdx>,
    /// Neighbour toward the head (larger values).
    pub next: Option<SlotIdx>,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<K: ListKey> {
    slots: Vec<Option<Node<K>>>,
    free: Vec<SlotIdx>,
    key_to_slot: FxHashMap<K, SlotIdx>,
}

impl<K: ListKey> Arena<K> {
    pub fn with_capacity(capacity: usize) -> Arena<K> {
        let mut key_to_slot = FxHashMap::default();
        key_to_slot.reserve(capacity);
        return Arena {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            key_to_slot,
        };
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        return self.key_to_slot.len();
    }

    #[inline]
    pub fn slot_of(&self, key: &K) -> Option<SlotIdx> {
        return self.key_to_slot.get(key).copied();
    }

    #[inline]
    pub fn node(&self, idx: SlotIdx) -> &Node<K> {
        match &self.slots[idx.index()] {
            Some(node) => return node,
            None => panic!("slot {} is vacant", idx.0),
        }
    }

    #[inline]
    pub fn node_mut(&mut self, idx: SlotIdx) -> &mut Node<K> {
        match &mut self.slots[idx.index()] {
            Some(node) => return node,
            None => panic!("slot {} is vacant", idx.0),
        }
    }

    /// Store a new unlinked node for `key`, reusing a free slot if any.
    ///
    /// The caller guarantees `key` is not already live.
    pub fn alloc(&mut self, key: K) -> SlotIdx {
        debug_assert!(!self.key_to_slot.contains_key(&key), "{:?} is already live", key);
        let node = Node { key, prev: None, next: None };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx.index()] = Some(node);
                idx
            }
            None => {
                assert!(self.slots.len() < u32::MAX as usize, "arena is full");
                self.slots.push(Some(node));
                SlotIdx(self.slots.len() as u32 - 1)
            }
        };
        self.key_to_slot.insert(key, idx);
        return idx;
    }

    /// Vacate a slot, returning the node that occupied it.
    pub fn release(&mut self, idx: SlotIdx) -> Node<K> {
        let node = match self.slots[idx.index()].take() {
            Some(node) => node,
            None => panic!("slot {} released twice", idx.0),
        };
        self.key_to_slot.remove(&node.key);
        self.free.push(idx);
        return node;
    }

    /// Slots ever allocated, live or free.
    #[cfg(test)]
    pub fn slot_count(&self) -> usize {
        return self.slots.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_arena() {
        let arena: Arena<u64> = Arena::with_capacity(4);
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.slot_of(&1), None);
    }

    #[test]
    fn alloc_and_lookup() {
        let mut arena: Arena<u64> = Arena::with_capacity(4);
        let a = arena.alloc(10);
        let b = arena.alloc(20);

        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.slot_of(&10), Some(a));
        assert_eq!(arena.node(b).key, 20);
        assert_eq!(arena.node(b).prev, None);
    }

    #[test]
    fn release_reuses_slot() {
        let mut arena: Arena<u64> = Arena::with_capacity(4);
        let a = arena.alloc(10);
        arena.alloc(20);

        let node = arena.release(a);
        assert_eq!(node.key, 10);
        assert_eq!(arena.slot_of(&10), None);
        assert_eq!(arena.len(), 1);

        // Freed slot is handed out again
        let c = arena.alloc(30);
        assert_eq!(c, a);
        assert_eq!(arena.slot_count(), 2);
    }

    #[test]
    #[should_panic(expected = "vacant")]
    fn vacant_slot_is_never_read() {
        let mut arena: Arena<u64> = Arena::with_capacity(4);
        let a = arena.alloc(10);
        arena.release(a);
        arena.node(a);
    }
}
