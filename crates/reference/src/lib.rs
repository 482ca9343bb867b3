//! Naive median index.
//!
//! Keeps entries in a sorted `Vec` and answers every query by position.
//! Inserts and removes shift the vector, O(n); the median is read by rank.
//! It has no hints, no links and no incremental state, which is what makes
//! it a useful oracle: tests replay the same operations against it and the
//! linked implementation and compare.
//!
//! The median convention matches the linked list: rank ceil(N/2) from the
//! smallest, the lower middle for even N. Equal values are ordered by
//! insertion, newest highest.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// A sorted-vector median index.
#[derive(Clone, Debug)]
pub struct NaiveMedian<K: Copy + Eq + Hash, V: Copy + Ord> {
    /// Entries in ascending value order.
    entries: Vec<(K, V)>,
    values: FxHashMap<K, V>,
}

impl<K: Copy + Eq + Hash, V: Copy + Ord> Default for NaiveMedian<K, V> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<K: Copy + Eq + Hash, V: Copy + Ord> NaiveMedian<K, V> {
    pub fn new() -> NaiveMedian<K, V> {
        return NaiveMedian {
            entries: Vec::new(),
            values: FxHashMap::default(),
        };
    }

    /// Insert `key` above every entry with a value <= `value`.
    ///
    /// Returns false if `key` is already present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.values.contains_key(&key) {
            return false;
        }
        let pos = self.entries.partition_point(|&(_, v)| v <= value);
        self.entries.insert(pos, (key, value));
        self.values.insert(key, value);
        return true;
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: K) -> Option<V> {
        let value = self.values.remove(&key)?;
        let pos = self.entries.iter().position(|&(k, _)| k == key)?;
        self.entries.remove(pos);
        return Some(value);
    }

    /// Remove the `n` smallest entries, smallest first.
    pub fn pop_n(&mut self, n: usize) -> Option<Vec<K>> {
        if n > self.entries.len() {
            return None;
        }
        let popped: Vec<K> = self.entries.drain(..n).map(|(k, _)| k).collect();
        for key in &popped {
            self.values.remove(key);
        }
        return Some(popped);
    }

    /// Values of the `n` smallest entries, smallest first.
    ///
    /// Which keys hold them is left open, since equal values at the cut can
    /// be split either way.
    pub fn smallest_values(&self, n: usize) -> Vec<V> {
        return self.entries.iter().take(n).map(|&(_, v)| v).collect();
    }

    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }

    pub fn contains(&self, key: K) -> bool {
        return self.values.contains_key(&key);
    }

    pub fn value(&self, key: K) -> Option<V> {
        return self.values.get(&key).copied();
    }

    /// Value at rank ceil(N/2).
    pub fn median_value(&self) -> Option<V> {
        if self.entries.is_empty() {
            return None;
        }
        return Some(self.entries[self.entries.len().div_ceil(2) - 1].1);
    }

    /// Values in ascending order.
    pub fn values(&self) -> Vec<V> {
        return self.entries.iter().map(|&(_, v)| v).collect();
    }

    /// Keys in ascending value order.
    pub fn keys(&self) -> Vec<K> {
        return self.entries.iter().map(|&(k, _)| k).collect();
    }
}

/// Median of a slice of values by sorting a copy, the slowest way there is.
pub fn median_by_sort<V: Copy + Ord>(values: &[V]) -> Option<V> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort();
    return Some(sorted[sorted.len().div_ceil(2) - 1]);
}
