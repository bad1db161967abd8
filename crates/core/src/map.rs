//! Insertion-ordered map with integer or string keys.

use indexmap::IndexMap;

use crate::{Key, Value};

/// An insertion-ordered map from [`Key`] to [`Value`].
///
/// Appending with [`OrderedMap::push`] assigns the next free integer key:
/// one past the greatest non-negative integer key ever inserted, starting
/// at `0`.
///
/// Equality ignores order: two maps are equal when they hold the same keys
/// with equal values. Compare `keys()` when order matters.
#[derive(Debug, Clone, Default)]
pub struct OrderedMap {
    entries: IndexMap<Key, Value>,
    next_index: i64,
}

impl OrderedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            next_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// The key the next [`push`](Self::push) will use.
    pub fn next_index(&self) -> i64 {
        self.next_index
    }

    /// Appends `value` under the next free integer key and returns that key.
    pub fn push(&mut self, value: Value) -> Key {
        let key = Key::Int(self.next_index);
        self.insert(key.clone(), value);
        key
    }

    /// Inserts or replaces the value under `key`.
    ///
    /// A replaced entry keeps its position. Returns the previous value.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        if let Key::Int(i) = key {
            if i >= self.next_index {
                self.next_index = i.saturating_add(1);
            }
        }
        self.entries.insert(key, value)
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// The entry at insertion position `index`.
    pub fn get_index(&self, index: usize) -> Option<(&Key, &Value)> {
        self.entries.get_index(index)
    }

    /// The entry at insertion position `index`, with its value mutable.
    pub fn get_index_mut(&mut self, index: usize) -> Option<(&Key, &mut Value)> {
        self.entries.get_index_mut(index)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.entries.values()
    }

    /// Copies this map and every nested map.
    ///
    /// Replacing or inserting entries in the copy never touches `self`.
    /// Entries holding a [`SharedCell`](crate::SharedCell) still share the
    /// cell, the same way a by-reference slot survives copying an array.
    pub fn deep_copy(&self) -> OrderedMap {
        OrderedMap {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.deep_copy()))
                .collect(),
            next_index: self.next_index,
        }
    }

    /// Same key set and equal values per key, regardless of order.
    pub fn same_entries(&self, other: &OrderedMap) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|w| v == w))
    }

    /// True when the keys are exactly `0..len` in order.
    pub fn is_list(&self) -> bool {
        self.keys()
            .enumerate()
            .all(|(i, k)| k.as_int() == i64::try_from(i).ok())
    }
}

impl PartialEq for OrderedMap {
    fn eq(&self, other: &Self) -> bool {
        self.same_entries(other)
    }
}

impl<'a> IntoIterator for &'a OrderedMap {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Value> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = OrderedMap::with_capacity(iter.size_hint().0);
        for value in iter {
            map.push(value);
        }
        map
    }
}

impl FromIterator<(Key, Value)> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = OrderedMap::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
