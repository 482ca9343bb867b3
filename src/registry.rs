//! Independent median lists keyed by group.
//!
//! Each group (a token being priced, a validator group being elected) owns
//! its own `SharedMedianList`. Groups never share a list lock, so
//! mutations in different groups proceed in parallel; the registry lock is
//! only held long enough to look a group up or add one.

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::list::ListConfig;
use crate::list::ListKey;
use crate::list::ListValue;
use crate::list::SharedMedianList;

/// A set of independent median lists, one per group.
pub struct ListRegistry<G, K: ListKey, V: ListValue> {
    lists: RwLock<FxHashMap<G, Arc<SharedMedianList<K, V>>>>,
    config: ListConfig,
}

impl<G: Clone + Eq + Hash, K: ListKey, V: ListValue> Default for ListRegistry<G, K, V> {
    fn default() -> Self {
        return Self::new(ListConfig::default());
    }
}

impl<G: Clone + Eq + Hash, K: ListKey, V: ListValue> ListRegistry<G, K, V> {
    /// Create an empty registry. New lists are built with `config`.
    pub fn new(config: ListConfig) -> ListRegistry<G, K, V> {
        return ListRegistry {
            lists: RwLock::new(FxHashMap::default()),
            config,
        };
    }

    pub fn config(&self) -> &ListConfig {
        return &self.config;
    }

    /// The list for `group`, created empty if it does not exist yet.
    pub fn get_or_create(&self, group: &G) -> Arc<SharedMedianList<K, V>> {
        if let Some(list) = self.lists.read().get(group) {
            return Arc::clone(list);
        }
        let mut lists = self.lists.write();
        let list = lists
            .entry(group.clone())
            .or_insert_with(|| Arc::new(SharedMedianList::with_config(&self.config)));
        return Arc::clone(list);
    }

    /// The list for `group`, if it exists.
    pub fn get(&self, group: &G) -> Option<Arc<SharedMedianList<K, V>>> {
        return self.lists.read().get(group).cloned();
    }

    /// Detach the list for `group`. Holders of the `Arc` keep a working list.
    pub fn remove(&self, group: &G) -> Option<Arc<SharedMedianList<K, V>>> {
        return self.lists.write().remove(group);
    }

    /// All groups, in no particular order.
    pub fn groups(&self) -> Vec<G> {
        return self.lists.read().keys().cloned().collect();
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        return self.lists.read().len();
    }

    pub fn is_empty(&self) -> bool {
        return self.lists.read().is_empty();
    }

    /// The current median value of every group.
    ///
    /// Lists are read one after another, not as one atomic snapshot.
    pub fn medians(&self) -> Vec<(G, Option<V>)> {
        let lists: Vec<(G, Arc<SharedMedianList<K, V>>)> = self
            .lists
            .read()
            .iter()
            .map(|(group, list)| (group.clone(), Arc::clone(list)))
            .collect();
        return lists
            .into_iter()
            .map(|(group, list)| (group, list.median_value()))
            .collect();
    }
}
