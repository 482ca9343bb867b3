//! Doubly-linked list of unique keys.
//!
//! This layer never searches. The caller names the two neighbours a key is
//! linked between and the list checks that they really are adjacent:
//! - insert / remove: O(1)
//! - head_n / keys: O(n) in the number of keys returned
//!
//! `previous` points toward the tail, `next` toward the head.

use tracing::debug;

use super::arena::Arena;
use super::arena::SlotIdx;
use super::ListConfig;
use super::ListError;
use super::ListKey;
use super::Result;

/// A doubly-linked list of unique keys stored in a slot arena.
#[derive(Clone, Debug)]
pub struct LinkedList<K: ListKey> {
    arena: Arena<K>,
    head: Option<SlotIdx>,
    tail: Option<SlotIdx>,
    capacity: Option<usize>,
}

impl<K: ListKey> Default for LinkedList<K> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<K: ListKey> LinkedList<K> {
    /// Create a new empty, unbounded list.
    pub fn new() -> LinkedList<K> {
        return Self::with_config(&ListConfig::default());
    }

    /// Create a new empty list. Only the capacity fields of `config` apply
    /// at this layer.
    pub fn with_config(config: &ListConfig) -> LinkedList<K> {
        return LinkedList {
            arena: Arena::with_capacity(config.reserve()),
            head: None,
            tail: None,
            capacity: config.capacity,
        };
    }

    /// Number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        return self.arena.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.arena.len() == 0;
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        return self.arena.slot_of(&key).is_some();
    }

    /// The key at the head (largest end), if any.
    pub fn head(&self) -> Option<K> {
        return self.head.map(|idx| self.arena.node(idx).key);
    }

    /// The key at the tail (smallest end), if any.
    pub fn tail(&self) -> Option<K> {
        return self.tail.map(|idx| self.arena.node(idx).key);
    }

    /// The neighbour of `key` toward the tail.
    ///
    /// `None` if `key` is the tail or not present.
    pub fn previous(&self, key: K) -> Option<K> {
        let idx = self.arena.slot_of(&key)?;
        return self.arena.node(idx).prev.map(|p| self.arena.node(p).key);
    }

    /// The neighbour of `key` toward the head.
    ///
    /// `None` if `key` is the head or not present.
    pub fn next(&self, key: K) -> Option<K> {
        let idx = self.arena.slot_of(&key)?;
        return self.arena.node(idx).next.map(|n| self.arena.node(n).key);
    }

    /// Link `key` between `previous` (tail side) and `next` (head side).
    ///
    /// On an empty list both neighbours must be `None`. On a non-empty list
    /// at least one must be given, and the two must currently be adjacent;
    /// a `None` side means `key` becomes the new tail or head.
    pub fn insert(&mut self, key: K, previous: Option<K>, next: Option<K>) -> Result<()> {
        self.check_new_key(key, previous, next)?;
        let (prev_idx, next_idx) = self.slots_of(previous, next)?;
        self.check_adjacent(prev_idx, next_idx)?;
        self.link(key, prev_idx, next_idx);
        return Ok(());
    }

    /// Insert `key` as the new tail.
    pub fn push(&mut self, key: K) -> Result<()> {
        return self.insert(key, None, self.tail());
    }

    /// Unlink `key`.
    pub fn remove(&mut self, key: K) -> Result<()> {
        let idx = self.arena.slot_of(&key).ok_or(ListError::NotFound)?;
        self.unlink(idx);
        return Ok(());
    }

    /// Move `key` to sit between `previous` and `next`.
    ///
    /// Adjacency is judged on the list without `key`. If the new position
    /// is rejected, `key` stays where it was.
    pub fn update(&mut self, key: K, previous: Option<K>, next: Option<K>) -> Result<()> {
        if !self.contains(key) {
            return Err(ListError::NotFound);
        }
        self.check_hints(key, previous, next)?;

        let old_prev = self.previous(key);
        let old_next = self.next(key);
        self.remove(key)?;

        if let Err(err) = self.insert(key, previous, next) {
            let restored = self.insert(key, old_prev, old_next);
            debug_assert!(restored.is_ok(), "failed to restore {:?}", key);
            return Err(err);
        }
        return Ok(());
    }

    /// The `n` keys nearest the head, head first.
    pub fn head_n(&self, n: usize) -> Result<Vec<K>> {
        if n > self.len() {
            return Err(ListError::InsufficientElements {
                requested: n,
                available: self.len(),
            });
        }
        return Ok(self.iter().rev().take(n).collect());
    }

    /// All keys, tail first (ascending order in a sorted list).
    pub fn keys(&self) -> Vec<K> {
        return self.iter().collect();
    }

    /// Iterate tail to head. Reverse with `.rev()` to walk from the head.
    pub fn iter(&self) -> Iter<'_, K> {
        return Iter {
            arena: &self.arena,
            front: self.tail,
            back: self.head,
            remaining: self.len(),
        };
    }

    /// Panic if the links are inconsistent. For tests and fuzzing.
    pub fn assert_consistent(&self) {
        assert_eq!(self.head.is_none(), self.is_empty(), "head set iff non-empty");
        assert_eq!(self.tail.is_none(), self.is_empty(), "tail set iff non-empty");

        let mut count = 0;
        let mut prev: Option<SlotIdx> = None;
        let mut cursor = self.tail;
        while let Some(idx) = cursor {
            count += 1;
            assert!(count <= self.len(), "cycle in list");
            let node = self.arena.node(idx);
            assert_eq!(node.prev, prev, "back link of {:?}", node.key);
            assert_eq!(self.arena.slot_of(&node.key), Some(idx), "key table entry of {:?}", node.key);
            prev = Some(idx);
            cursor = node.next;
        }
        assert_eq!(prev, self.head, "walk from tail ends at head");
        assert_eq!(count, self.len(), "walk visits every key");
    }

    /// Reject a key that is already present or names itself as a neighbour,
    /// a full list, and neighbours that are not present.
    pub(crate) fn check_new_key(&self, key: K, previous: Option<K>, next: Option<K>) -> Result<()> {
        if self.contains(key) || previous == Some(key) || next == Some(key) {
            return Err(ListError::InvalidKey);
        }
        if let Some(capacity) = self.capacity {
            if self.len() >= capacity {
                debug!(?key, capacity, "insert rejected, list is full");
                return Err(ListError::CapacityExceeded { capacity });
            }
        }
        self.slots_of(previous, next)?;
        return Ok(());
    }

    /// Reject neighbour arguments for an existing `key`.
    pub(crate) fn check_hints(&self, key: K, previous: Option<K>, next: Option<K>) -> Result<()> {
        if previous == Some(key) || next == Some(key) {
            return Err(ListError::InvalidKey);
        }
        self.slots_of(previous, next)?;
        return Ok(());
    }

    fn slots_of(&self, previous: Option<K>, next: Option<K>) -> Result<(Option<SlotIdx>, Option<SlotIdx>)> {
        let prev_idx = match previous {
            Some(key) => Some(self.arena.slot_of(&key).ok_or(ListError::DanglingNeighbor)?),
            None => None,
        };
        let next_idx = match next {
            Some(key) => Some(self.arena.slot_of(&key).ok_or(ListError::DanglingNeighbor)?),
            None => None,
        };
        return Ok((prev_idx, next_idx));
    }

    /// A `None` side stands for the end of the list, so (None, None) is only
    /// adjacent when the list is empty.
    fn check_adjacent(&self, prev: Option<SlotIdx>, next: Option<SlotIdx>) -> Result<()> {
        let forward = match prev {
            Some(p) => self.arena.node(p).next == next,
            None => self.tail == next,
        };
        let backward = match next {
            Some(n) => self.arena.node(n).prev == prev,
            None => self.head == prev,
        };
        if forward && backward {
            return Ok(());
        }
        return Err(ListError::BrokenAdjacency);
    }

    fn link(&mut self, key: K, prev: Option<SlotIdx>, next: Option<SlotIdx>) {
        let idx = self.arena.alloc(key);
        let node = self.arena.node_mut(idx);
        node.prev = prev;
        node.next = next;

        match prev {
            Some(p) => self.arena.node_mut(p).next = Some(idx),
            None => self.tail = Some(idx),
        }
        match next {
            Some(n) => self.arena.node_mut(n).prev = Some(idx),
            None => self.head = Some(idx),
        }
    }

    fn unlink(&mut self, idx: SlotIdx) {
        let node = self.arena.release(idx);
        match node.prev {
            Some(p) => self.arena.node_mut(p).next = node.next,
            None => self.tail = node.next,
        }
        match node.next {
            Some(n) => self.arena.node_mut(n).prev = node.prev,
            None => self.head = node.prev,
        }
    }
}

/// Iterator over a list's keys, tail to head.
pub struct Iter<'a, K: ListKey> {
    arena: &'a Arena<K>,
    front: Option<SlotIdx>,
    back: Option<SlotIdx>,
    remaining: usize,
}

impl<K: ListKey> Iterator for Iter<'_, K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.arena.node(self.front?);
        self.front = node.next;
        self.remaining -= 1;
        return Some(node.key);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<K: ListKey> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<K> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.arena.node(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        return Some(node.key);
    }
}

impl<K: ListKey> ExactSizeIterator for Iter<'_, K> {}
