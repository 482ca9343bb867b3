//! Linked list kept in ascending value order.
//!
//! Callers pass a lesser and a greater hint with each insert: keys they
//! believe will end up next to the new one. Hints are never trusted. Up to
//! four candidate neighbour pairs are derived from them and the first pair
//! whose values bracket the new value is used:
//!
//! 1. (none, tail)            when there is no lesser hint
//! 2. (head, none)            when there is no greater hint
//! 3. (lesser, lesser.next)   when there is a lesser hint
//! 4. (greater.prev, greater) when there is a greater hint
//!
//! Accurate hints make an insert O(1). Stale hints either still land on a
//! valid pair or the insert fails with `NoValidPosition`; a key is never
//! placed out of order. `insert_unhinted` scans instead, O(n).

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use super::HintPolicy;
use super::LinkedList;
use super::ListConfig;
use super::ListError;
use super::ListKey;
use super::ListValue;
use super::Result;

/// Candidate (lesser, greater) neighbour pairs, at most four.
type Candidates<K> = SmallVec<[(Option<K>, Option<K>); 4]>;

/// A list of keys sorted by an associated value, smallest at the tail.
#[derive(Clone, Debug)]
pub struct SortedList<K: ListKey, V: ListValue> {
    list: LinkedList<K>,
    values: FxHashMap<K, V>,
    hint_policy: HintPolicy,
}

impl<K: ListKey, V: ListValue> Default for SortedList<K, V> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<K: ListKey, V: ListValue> SortedList<K, V> {
    /// Create a new empty list with the default configuration.
    pub fn new() -> SortedList<K, V> {
        return Self::with_config(&ListConfig::default());
    }

    pub fn with_config(config: &ListConfig) -> SortedList<K, V> {
        let mut values = FxHashMap::default();
        values.reserve(config.reserve());
        return SortedList {
            list: LinkedList::with_config(config),
            values,
            hint_policy: config.hint_policy,
        };
    }

    /// Insert `key` with `value`, using the hints to find its position.
    pub fn insert(&mut self, key: K, value: V, lesser: Option<K>, greater: Option<K>) -> Result<()> {
        self.list.check_new_key(key, lesser, greater)?;

        let (lo, hi) = match self.resolve_hints(value, lesser, greater) {
            Some(pair) => pair,
            None => match self.hint_policy {
                HintPolicy::Strict => return Err(ListError::NoValidPosition),
                HintPolicy::ScanOnMiss => {
                    debug!(?key, ?value, ?lesser, ?greater, "hints missed, scanning");
                    self.locate(value)
                }
            },
        };

        self.list.insert(key, lo, hi)?;
        self.values.insert(key, value);
        return Ok(());
    }

    /// Insert `key` with `value` at the position found by a linear scan.
    pub fn insert_unhinted(&mut self, key: K, value: V) -> Result<()> {
        self.list.check_new_key(key, None, None)?;
        let (lo, hi) = self.locate(value);
        self.list.insert(key, lo, hi)?;
        self.values.insert(key, value);
        return Ok(());
    }

    /// Insert `key` with the default value as the new tail.
    pub fn push(&mut self, key: K) -> Result<()> {
        return self.insert(key, V::default(), None, self.list.tail());
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: K) -> Result<V> {
        self.list.remove(key)?;
        return self.values.remove(&key).ok_or(ListError::NotFound);
    }

    /// Give `key` a new value and reposition it.
    ///
    /// Hints are resolved against the list without `key`. If the insert
    /// at the new position is rejected, `key` keeps its old value and
    /// position.
    pub fn update(&mut self, key: K, value: V, lesser: Option<K>, greater: Option<K>) -> Result<()> {
        let old_value = self.value(key).ok_or(ListError::NotFound)?;
        self.list.check_hints(key, lesser, greater)?;

        let old_prev = self.list.previous(key);
        let old_next = self.list.next(key);
        self.remove(key)?;

        if let Err(err) = self.insert(key, value, lesser, greater) {
            self.restore(key, old_value, old_prev, old_next);
            return Err(err);
        }
        return Ok(());
    }

    /// Remove the `n` smallest keys, returned in ascending order.
    pub fn pop_n(&mut self, n: usize) -> Result<Vec<K>> {
        if n > self.len() {
            return Err(ListError::InsufficientElements {
                requested: n,
                available: self.len(),
            });
        }
        let mut keys = Vec::with_capacity(n);
        for _ in 0..n {
            let Some(key) = self.list.tail() else {
                break;
            };
            self.remove(key)?;
            keys.push(key);
        }
        return Ok(keys);
    }

    /// The neighbours a key with `value` would be linked between by
    /// `insert_unhinted`: (lesser, greater).
    ///
    /// Equal values go above existing ones. Useful for computing hints.
    pub fn locate(&self, value: V) -> (Option<K>, Option<K>) {
        let mut greater = None;
        for key in self.list.iter().rev() {
            if self.value_of(key) <= value {
                return (Some(key), greater);
            }
            greater = Some(key);
        }
        return (None, greater);
    }

    #[inline]
    pub fn len(&self) -> usize {
        return self.list.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.list.is_empty();
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        return self.list.contains(key);
    }

    /// The value of `key`, or `None` if absent.
    pub fn value(&self, key: K) -> Option<V> {
        return self.values.get(&key).copied();
    }

    /// Key with the largest value.
    pub fn head(&self) -> Option<K> {
        return self.list.head();
    }

    /// Key with the smallest value.
    pub fn tail(&self) -> Option<K> {
        return self.list.tail();
    }

    pub fn previous(&self, key: K) -> Option<K> {
        return self.list.previous(key);
    }

    pub fn next(&self, key: K) -> Option<K> {
        return self.list.next(key);
    }

    /// Keys in ascending value order.
    pub fn keys(&self) -> Vec<K> {
        return self.list.keys();
    }

    /// (key, value) pairs in ascending value order.
    pub fn elements(&self) -> Vec<(K, V)> {
        return self.list.iter().map(|key| (key, self.value_of(key))).collect();
    }

    /// The `n` keys with the largest values, largest first.
    pub fn head_n(&self, n: usize) -> Result<Vec<K>> {
        return self.list.head_n(n);
    }

    /// The underlying linked list.
    pub fn linked(&self) -> &LinkedList<K> {
        return &self.list;
    }

    /// Panic if links or ordering are inconsistent. For tests and fuzzing.
    pub fn assert_consistent(&self) {
        self.list.assert_consistent();
        assert_eq!(self.values.len(), self.list.len(), "one value per key");
        let values: Vec<V> = self.list.iter().map(|key| self.value_of(key)).collect();
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1], "out of order: {:?} > {:?}", pair[0], pair[1]);
        }
    }

    /// Relink a key that was just removed at its former position.
    pub(crate) fn restore(&mut self, key: K, value: V, prev: Option<K>, next: Option<K>) {
        let restored = self.list.insert(key, prev, next);
        debug_assert!(restored.is_ok(), "failed to restore {:?}", key);
        self.values.insert(key, value);
    }

    fn resolve_hints(&self, value: V, lesser: Option<K>, greater: Option<K>) -> Option<(Option<K>, Option<K>)> {
        let mut candidates: Candidates<K> = SmallVec::new();
        if lesser.is_none() {
            candidates.push((None, self.list.tail()));
        }
        if greater.is_none() {
            candidates.push((self.list.head(), None));
        }
        if let Some(lesser) = lesser {
            candidates.push((Some(lesser), self.list.next(lesser)));
        }
        if let Some(greater) = greater {
            candidates.push((self.list.previous(greater), Some(greater)));
        }
        return candidates
            .into_iter()
            .find(|&(lo, hi)| self.is_value_between(value, lo, hi));
    }

    /// A missing bound is unbounded.
    fn is_value_between(&self, value: V, lo: Option<K>, hi: Option<K>) -> bool {
        let above_lo = lo.map_or(true, |key| self.value_of(key) <= value);
        let below_hi = hi.map_or(true, |key| value <= self.value_of(key));
        return above_lo && below_hi;
    }

    /// Value of a key known to be present.
    #[inline]
    fn value_of(&self, key: K) -> V {
        return self.values.get(&key).copied().unwrap_or_default();
    }
}
