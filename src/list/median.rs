//! Sorted list with an incrementally tracked median.
//!
//! With N elements the median is the element at rank ceil(N/2) counted from
//! the tail, so for even N it is the lower of the two middle elements. Every
//! key carries a `Relation` to the median: exactly ceil(N/2) - 1 keys are
//! `Lesser`, floor(N/2) are `Greater`, and the median itself is `Equal`.
//!
//! An insert or remove changes one side's count by one. When that breaks
//! the balance above, the median pointer steps one link toward the tail or
//! head and the old median is reclassified. Each mutation touches O(1)
//! relation state on top of the sorted insert itself.
//!
//! Insert, after linking (`p` = new key's tail-side neighbour):
//!
//! | new N | p absent or `Lesser` | otherwise           |
//! |-------|----------------------|---------------------|
//! | 1     | becomes the median   | -                   |
//! | odd   | `Lesser`, no shift   | `Greater`, shift up |
//! | even  | `Lesser`, shift down | `Greater`, no shift |
//!
//! Remove, before unlinking (decided on the resulting N):
//!
//! | resulting N | removed key          | shift |
//! |-------------|----------------------|-------|
//! | 0           | -                    | median cleared |
//! | even        | `Greater` or `Equal` | down  |
//! | odd         | `Lesser` or `Equal`  | up    |

use rustc_hash::FxHashMap;
use tracing::trace;

use super::ListConfig;
use super::ListError;
use super::ListKey;
use super::ListValue;
use super::Result;
use super::SortedList;

/// Where a key sits relative to the median.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    /// Not in the list.
    #[default]
    Undefined,
    /// Ranked below the median.
    Lesser,
    /// Ranked above the median.
    Greater,
    /// The median.
    Equal,
}

/// Direction the median pointer moves after a mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MedianAction {
    None,
    /// One link toward the tail.
    Lesser,
    /// One link toward the head.
    Greater,
}

/// A sorted list that tracks its median.
#[derive(Clone, Debug)]
pub struct MedianList<K: ListKey, V: ListValue> {
    list: SortedList<K, V>,
    median: Option<K>,
    relations: FxHashMap<K, Relation>,
}

impl<K: ListKey, V: ListValue> Default for MedianList<K, V> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<K: ListKey, V: ListValue> MedianList<K, V> {
    /// Create a new empty list with the default configuration.
    pub fn new() -> MedianList<K, V> {
        return Self::with_config(&ListConfig::default());
    }

    pub fn with_config(config: &ListConfig) -> MedianList<K, V> {
        let mut relations = FxHashMap::default();
        relations.reserve(config.reserve());
        return MedianList {
            list: SortedList::with_config(config),
            median: None,
            relations,
        };
    }

    /// Insert `key` with `value`. See `SortedList::insert` for the hints.
    pub fn insert(&mut self, key: K, value: V, lesser: Option<K>, greater: Option<K>) -> Result<()> {
        self.list.insert(key, value, lesser, greater)?;
        self.classify_inserted(key);
        return Ok(());
    }

    /// Insert `key` with `value` at the position found by a linear scan.
    pub fn insert_unhinted(&mut self, key: K, value: V) -> Result<()> {
        self.list.insert_unhinted(key, value)?;
        self.classify_inserted(key);
        return Ok(());
    }

    /// Insert `key` with the default value as the new tail.
    pub fn push(&mut self, key: K) -> Result<()> {
        return self.insert(key, V::default(), None, self.list.tail());
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: K) -> Result<V> {
        if !self.list.contains(key) {
            return Err(ListError::NotFound);
        }

        let remaining = self.list.len() - 1;
        let relation = self.relation(key);
        if remaining == 0 {
            self.median = None;
        } else if remaining % 2 == 0 && matches!(relation, Relation::Greater | Relation::Equal) {
            self.shift_median(MedianAction::Lesser);
        } else if remaining % 2 == 1 && matches!(relation, Relation::Lesser | Relation::Equal) {
            self.shift_median(MedianAction::Greater);
        }

        self.relations.remove(&key);
        return self.list.remove(key);
    }

    /// Give `key` a new value and reposition it.
    ///
    /// Implemented as remove then insert, so the median is recomputed by
    /// the same rules. A rejected update leaves the list, the median and
    /// every relation as they were.
    pub fn update(&mut self, key: K, value: V, lesser: Option<K>, greater: Option<K>) -> Result<()> {
        let old_value = self.value(key).ok_or(ListError::NotFound)?;
        self.list.linked().check_hints(key, lesser, greater)?;

        let old_prev = self.list.previous(key);
        let old_next = self.list.next(key);
        self.remove(key)?;

        if let Err(err) = self.insert(key, value, lesser, greater) {
            self.list.restore(key, old_value, old_prev, old_next);
            self.classify_inserted(key);
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

    /// The median key, `None` when empty.
    pub fn median(&self) -> Option<K> {
        return self.median;
    }

    /// The median key's value, `None` when empty.
    pub fn median_value(&self) -> Option<V> {
        return self.median.and_then(|key| self.list.value(key));
    }

    /// Where `key` sits relative to the median; `Undefined` if absent.
    pub fn relation(&self, key: K) -> Relation {
        return self.relations.get(&key).copied().unwrap_or_default();
    }

    pub fn locate(&self, value: V) -> (Option<K>, Option<K>) {
        return self.list.locate(value);
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

    pub fn value(&self, key: K) -> Option<V> {
        return self.list.value(key);
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
        return self.list.elements();
    }

    /// The `n` keys with the largest values, largest first.
    pub fn head_n(&self, n: usize) -> Result<Vec<K>> {
        return self.list.head_n(n);
    }

    /// The underlying sorted list.
    pub fn sorted(&self) -> &SortedList<K, V> {
        return &self.list;
    }

    /// Panic if links, ordering, the median or any relation is
    /// inconsistent. For tests and fuzzing.
    pub fn assert_consistent(&self) {
        self.list.assert_consistent();
        assert_eq!(self.relations.len(), self.len(), "one relation per key");

        let keys = self.keys();
        if keys.is_empty() {
            assert_eq!(self.median, None, "empty list has no median");
            return;
        }

        let rank = keys.len().div_ceil(2) - 1;
        assert_eq!(self.median, Some(keys[rank]), "median at rank ceil(N/2)");
        for (i, &key) in keys.iter().enumerate() {
            let expected = match i.cmp(&rank) {
                std::cmp::Ordering::Less => Relation::Lesser,
                std::cmp::Ordering::Equal => Relation::Equal,
                std::cmp::Ordering::Greater => Relation::Greater,
            };
            assert_eq!(self.relation(key), expected, "relation of {:?} at rank {}", key, i + 1);
        }
    }

    /// Assign a relation to a freshly linked key and rebalance.
    fn classify_inserted(&mut self, key: K) {
        let len = self.list.len();
        if len == 1 {
            self.median = Some(key);
            self.relations.insert(key, Relation::Equal);
            return;
        }

        let below = match self.list.previous(key) {
            None => true,
            Some(prev) => self.relation(prev) == Relation::Lesser,
        };
        let action = if below {
            self.relations.insert(key, Relation::Lesser);
            if len % 2 == 0 { MedianAction::Lesser } else { MedianAction::None }
        } else {
            self.relations.insert(key, Relation::Greater);
            if len % 2 == 1 { MedianAction::Greater } else { MedianAction::None }
        };
        self.shift_median(action);
    }

    /// Step the median one link in the given direction, reclassifying the
    /// old median as the side it now falls on.
    fn shift_median(&mut self, action: MedianAction) {
        let Some(current) = self.median else {
            return;
        };
        let target = match action {
            MedianAction::None => return,
            MedianAction::Lesser => {
                self.relations.insert(current, Relation::Greater);
                self.list.previous(current)
            }
            MedianAction::Greater => {
                self.relations.insert(current, Relation::Lesser);
                self.list.next(current)
            }
        };
        trace!(from = ?current, to = ?target, ?action, len = self.list.len(), "median shifted");
        self.median = target;
        if let Some(target) = target {
            self.relations.insert(target, Relation::Equal);
        }
    }
}
