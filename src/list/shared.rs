//! A median list behind a single lock.
//!
//! Every operation takes the lock once and runs to completion under it, so
//! callers on different threads observe operations one at a time, never a
//! half-applied one. Reads share the lock; mutations hold it exclusively.
//! Use `read`/`write` to run several operations as one step.

use parking_lot::RwLock;

use super::ListConfig;
use super::ListKey;
use super::ListValue;
use super::MedianList;
use super::Relation;
use super::Result;

/// A `MedianList` that can be shared between threads.
pub struct SharedMedianList<K: ListKey, V: ListValue> {
    inner: RwLock<MedianList<K, V>>,
}

impl<K: ListKey, V: ListValue> Default for SharedMedianList<K, V> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<K: ListKey, V: ListValue> From<MedianList<K, V>> for SharedMedianList<K, V> {
    fn from(list: MedianList<K, V>) -> Self {
        return SharedMedianList { inner: RwLock::new(list) };
    }
}

impl<K: ListKey, V: ListValue> SharedMedianList<K, V> {
    pub fn new() -> SharedMedianList<K, V> {
        return Self::from(MedianList::new());
    }

    pub fn with_config(config: &ListConfig) -> SharedMedianList<K, V> {
        return Self::from(MedianList::with_config(config));
    }

    /// Run `f` with shared access.
    pub fn read<R>(&self, f: impl FnOnce(&MedianList<K, V>) -> R) -> R {
        let guard = self.inner.read();
        return f(&guard);
    }

    /// Run `f` with exclusive access.
    pub fn write<R>(&self, f: impl FnOnce(&mut MedianList<K, V>) -> R) -> R {
        let mut guard = self.inner.write();
        return f(&mut guard);
    }

    pub fn insert(&self, key: K, value: V, lesser: Option<K>, greater: Option<K>) -> Result<()> {
        return self.inner.write().insert(key, value, lesser, greater);
    }

    pub fn insert_unhinted(&self, key: K, value: V) -> Result<()> {
        return self.inner.write().insert_unhinted(key, value);
    }

    pub fn push(&self, key: K) -> Result<()> {
        return self.inner.write().push(key);
    }

    pub fn remove(&self, key: K) -> Result<V> {
        return self.inner.write().remove(key);
    }

    pub fn update(&self, key: K, value: V, lesser: Option<K>, greater: Option<K>) -> Result<()> {
        return self.inner.write().update(key, value, lesser, greater);
    }

    pub fn pop_n(&self, n: usize) -> Result<Vec<K>> {
        return self.inner.write().pop_n(n);
    }

    pub fn median(&self) -> Option<K> {
        return self.inner.read().median();
    }

    pub fn median_value(&self) -> Option<V> {
        return self.inner.read().median_value();
    }

    pub fn relation(&self, key: K) -> Relation {
        return self.inner.read().relation(key);
    }

    pub fn contains(&self, key: K) -> bool {
        return self.inner.read().contains(key);
    }

    pub fn value(&self, key: K) -> Option<V> {
        return self.inner.read().value(key);
    }

    pub fn len(&self) -> usize {
        return self.inner.read().len();
    }

    pub fn is_empty(&self) -> bool {
        return self.inner.read().is_empty();
    }

    pub fn head(&self) -> Option<K> {
        return self.inner.read().head();
    }

    pub fn tail(&self) -> Option<K> {
        return self.inner.read().tail();
    }

    pub fn keys(&self) -> Vec<K> {
        return self.inner.read().keys();
    }

    pub fn elements(&self) -> Vec<(K, V)> {
        return self.inner.read().elements();
    }

    pub fn head_n(&self, n: usize) -> Result<Vec<K>> {
        return self.inner.read().head_n(n);
    }

    /// A copy of the current list.
    pub fn snapshot(&self) -> MedianList<K, V> {
        return self.inner.read().clone();
    }

    pub fn into_inner(self) -> MedianList<K, V> {
        return self.inner.into_inner();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn mirrors_list_operations() {
        let shared = SharedMedianList::new();
        shared.insert(1u64, 10u64, None, None).unwrap();
        shared.insert(2, 20, None, None).unwrap();
        shared.insert_unhinted(3, 15).unwrap();

        assert_eq!(shared.keys(), vec![1, 3, 2]);
        assert_eq!(shared.median(), Some(3));
        assert_eq!(shared.median_value(), Some(15));
        assert_eq!(shared.relation(2), Relation::Greater);
        assert_eq!(shared.remove(3), Ok(15));
        assert_eq!(shared.len(), 2);
    }

    #[test]
    fn write_closure_is_one_step() {
        let shared = SharedMedianList::new();
        shared.insert(1u64, 10u64, None, None).unwrap();

        // Compute hints and insert under the same lock
        shared.write(|list| {
            let (lesser, greater) = list.locate(12);
            list.insert(2, 12, lesser, greater)
        }).unwrap();

        assert_eq!(shared.read(|list| list.elements()), vec![(1, 10), (2, 12)]);
    }

    #[test]
    fn concurrent_writers_leave_a_consistent_list() {
        let shared = Arc::new(SharedMedianList::<u64, u64>::new());
        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for i in 0..100u64 {
                        let key = t * 1000 + i;
                        shared.insert_unhinted(key, (key * 7919) % 1000).unwrap();
                        if i % 3 == 0 {
                            shared.remove(key).unwrap();
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let list = Arc::try_unwrap(shared).ok().unwrap().into_inner();
        list.assert_consistent();
        assert_eq!(list.len(), 4 * 66);
    }
}
