//! Naive reference LRU
//!
//! [`ReferenceLru`] keeps entries in a `VecDeque` and scans it on every call.
//! It is slow but obviously correct, so tests can run the same operations on
//! it and on a real cache and compare the results.

use std::collections::VecDeque;

/// Linear-time LRU used as a test oracle
#[derive(Debug, Clone)]
pub struct ReferenceLru<K, V> {
    capacity: usize,
    /// Least recently used at the front
    entries: VecDeque<(K, V)>,
}

impl<K: PartialEq + Clone, V: Clone> ReferenceLru<K, V> {
    /// Create an empty model holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self { capacity, entries: VecDeque::with_capacity(capacity + 1) }
    }

    /// Look up `key`, moving it to the most recent end on a hit
    pub fn get(&mut self, key: &K) -> Option<V> {
        let position = self.position(key)?;
        let entry = self.entries.remove(position)?;
        let value = entry.1.clone();
        self.entries.push_back(entry);
        Some(value)
    }

    /// Insert or update `key`, returning the evicted entry if any
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(position) = self.position(&key) {
            self.entries.remove(position);
            self.entries.push_back((key, value));
            return None;
        }

        self.entries.push_back((key, value));
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    /// Remove `key`
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let position = self.position(key)?;
        self.entries.remove(position).map(|(_, value)| value)
    }

    /// Number of entries held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the model is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys from least to most recently used
    pub fn keys(&self) -> Vec<K> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|(candidate, _)| candidate == key)
    }
}
