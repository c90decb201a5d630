//! Key index for the LRU cache
//!
//! Maps keys to the [`Handle`] of their entry in the recency order. The index
//! never owns entries; it only records where they live.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use super::recency_list::Handle;

/// Key to entry-handle mapping
#[derive(Debug, Clone)]
pub struct Index<K>
where
    K: Eq + Hash,
{
    map: HashMap<K, Handle>,
}

impl<K: Eq + Hash> Index<K> {
    /// Create an empty index
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    /// Create an empty index sized for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self { map: HashMap::with_capacity(capacity) }
    }

    /// Look up the handle for `key` without side effects
    pub fn get<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    /// Insert or replace the mapping for `key`
    ///
    /// Returns the handle previously mapped to `key`. The caller owns the
    /// entry behind it and must have detached or updated it already.
    pub fn put(&mut self, key: K, handle: Handle) -> Option<Handle> {
        self.map.insert(key, handle)
    }

    /// Remove the mapping for `key`
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    /// Check if `key` is mapped
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Number of mapped keys
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove every mapping
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K: Eq + Hash> Default for Index<K> {
    fn default() -> Self {
        Self::new()
    }
}
