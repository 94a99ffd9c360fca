//! Multi-value form mapping
//!
//! Form encoding allows repeated keys, so each field name maps to a list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormData<V> {
    lists: BTreeMap<String, Vec<V>>,
}

impl<V> Default for FormData<V> {
    fn default() -> Self {
        Self {
            lists: BTreeMap::new(),
        }
    }
}

impl<V> FormData<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one value under `key`, after any existing ones
    pub fn append(&mut self, key: impl Into<String>, value: V) {
        self.lists.entry(key.into()).or_default().push(value);
    }

    /// Replace the whole list under `key`
    pub fn set_list(&mut self, key: impl Into<String>, values: Vec<V>) {
        self.lists.insert(key.into(), values);
    }

    /// Last value under `key`
    pub fn get(&self, key: &str) -> Option<&V> {
        self.lists.get(key).and_then(|values| values.last())
    }

    /// Every value under `key`, empty if absent
    pub fn get_list(&self, key: &str) -> &[V] {
        self.lists.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lists.contains_key(key)
    }

    pub fn iter_lists(&self) -> impl Iterator<Item = (&str, &[V])> {
        self.lists.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for FormData<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (key, value) in iter {
            form.append(key, value);
        }
        form
    }
}
