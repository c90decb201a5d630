#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

//! An in-memory Least Recently Used (LRU) cache with predictable `O(1)` APIs.
//!
//! # Structure
//! - [`Index`]: key to entry handle.
//! - [`RecencyList`]: entries ordered least to most recently used.
//! - Eviction controller: after an insertion pushes `len` past `capacity`, the
//!   least recently used entry is popped, unmapped, reported to the eviction
//!   listener, and dropped.
//!
//! # Complexity
//! - `new`, `capacity`, `len`, `is_empty`: `O(1)`.
//! - `put`, `get`, `get_mut`, `peek`, `contains`, `remove`: `O(1)` amortized.
//! - `clear`, `iter`: `O(n)` in the number of live entries.
//!
//! # Panic Safety
//! - Construction requires a `NonZeroUsize`; [`LruCache::try_new`] reports a
//!   zero capacity as [`CacheError::InvalidArgument`].
//! - No operation panics on valid input; an eviction listener that panics
//!   unwinds through the evicting `put` after the entry was unmapped.
//!
//! # Thread Safety
//! - `LruCache` takes `&mut self` for every recency-changing call, including
//!   `get`. Wrap it in a lock to share it, or use [`crate::cache::Cache`].
//!
//! # Eviction Policy
//! - A successful `put`, `get`, or `get_mut` promotes the entry to most
//!   recently used. `peek` and `contains` do not.
//! - Capacity is fixed at construction. Inserting a new key into a full cache
//!   evicts exactly one entry, the least recently used one.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::num::NonZeroUsize;

use super::index::Index;
use super::recency_list::{self, RecencyList};
use crate::error::{CacheError, CacheResult};

/// Callback invoked with each entry the cache evicts for capacity, right
/// before the entry is dropped.
pub type EvictionListener<K, V> = Box<dyn FnMut(&K, &V) + Send>;

/// Result of [`LruCache::put_with_outcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOutcome<V> {
    /// Value replaced by the put, `None` when the key was new
    pub previous: Option<V>,
    /// Number of entries evicted to make room
    pub evicted: usize,
}

impl<V> PutOutcome<V> {
    /// Returns `true` when the put created a new entry.
    #[must_use]
    pub const fn inserted(&self) -> bool {
        self.previous.is_none()
    }
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity LRU cache built from an [`Index`] and a [`RecencyList`].
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use recency_cache::collections::LruCache;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(3).unwrap());
/// cache.put("one", 1);
/// cache.put("two", 2);
/// cache.put("three", 3);
///
/// assert_eq!(cache.get(&"one"), Some(&1)); // order: two, three, one
/// cache.put("four", 4); // evicts "two"
///
/// assert!(!cache.contains(&"two"));
/// assert_eq!(cache.to_string(), "{three=3, one=1, four=4}");
/// ```
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    capacity: NonZeroUsize,
    index: Index<K>,
    order: RecencyList<Entry<K, V>>,
    on_evict: Option<EvictionListener<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with the provided non-zero capacity.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            index: Index::with_capacity(capacity.get()),
            order: RecencyList::with_capacity(capacity.get()),
            capacity,
            on_evict: None,
        }
    }

    /// Attempts to construct a cache from a plain integer capacity.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] when `capacity` is zero.
    pub fn try_new(capacity: usize) -> CacheResult<Self> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or_else(|| CacheError::non_positive_capacity(capacity))
    }

    /// Installs a listener that observes every capacity eviction.
    ///
    /// The listener runs synchronously inside the evicting `put`, after the
    /// key has been unmapped and before the entry is dropped. It is not called
    /// for `remove` or `clear`.
    #[must_use]
    pub fn with_eviction_listener<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&K, &V) + Send + 'static,
    {
        self.on_evict = Some(Box::new(listener));
        self
    }

    /// Replaces the eviction listener, returning the previous one.
    pub fn set_eviction_listener(
        &mut self,
        listener: Option<EvictionListener<K, V>>,
    ) -> Option<EvictionListener<K, V>> {
        std::mem::replace(&mut self.on_evict, listener)
    }

    /// Returns the maximum number of entries kept without evicting.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the number of entries currently stored.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when the cache has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Retrieves a value by key, promoting the entry to most recently used.
    ///
    /// A miss returns `None` and leaves the cache untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.get(key)?;
        self.order.move_to_most_recent(handle);
        self.order.get(handle).map(|entry| &entry.value)
    }

    /// Retrieves a mutable value by key, promoting the entry to most recently
    /// used.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.get(key)?;
        self.order.move_to_most_recent(handle);
        self.order.get_mut(handle).map(|entry| &mut entry.value)
    }

    /// Reads a value by key without altering the recency order.
    #[must_use]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).and_then(|handle| self.order.get(handle)).map(|entry| &entry.value)
    }

    /// Returns `true` when `key` is present. Does not promote.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(key)
    }

    /// Inserts or updates a key-value pair, returning the previous value when
    /// the key was present.
    ///
    /// Updating replaces the value in place and promotes the entry; the size is
    /// unchanged and nothing is evicted. Inserting a new key places it at the
    /// most recent end and then evicts the least recently used entry if the
    /// cache grew past capacity.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.put_with_outcome(key, value).previous
    }

    /// Same as [`LruCache::put`], also reporting how many entries the call
    /// evicted.
    pub fn put_with_outcome(&mut self, key: K, value: V) -> PutOutcome<V> {
        if let Some(handle) = self.index.get(&key) {
            let previous = self
                .order
                .get_mut(handle)
                .map(|entry| std::mem::replace(&mut entry.value, value));
            self.order.move_to_most_recent(handle);
            return PutOutcome { previous, evicted: 0 };
        }

        let handle = self.order.push_most_recent(Entry { key: key.clone(), value });
        self.index.put(key, handle);
        PutOutcome { previous: None, evicted: self.enforce_capacity() }
    }

    /// Removes and returns the value associated with `key`, if present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.remove(key)?;
        self.order.remove(handle).map(|entry| entry.value)
    }

    /// Removes all entries, keeping the configured capacity.
    ///
    /// The eviction listener is not notified.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    /// Returns an iterator over entries from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { inner: self.order.iter() }
    }

    /// Returns the entries from least to most recently used.
    ///
    /// Equivalent to [`LruCache::iter`]; the borrow guarantees no mutation
    /// interleaves with the walk.
    pub fn entries_in_recency_order(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    /// Returns the least recently used entry, the next eviction candidate.
    #[must_use]
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.peek_least_recent().map(|entry| (&entry.key, &entry.value))
    }

    /// Checks that the index and the recency order describe the same entries.
    ///
    /// Verifies the list links, that both structures have the same size, that
    /// the size is within capacity, and that every entry's key maps back to
    /// that same entry.
    #[must_use]
    pub fn check_consistency(&self) -> bool {
        self.order.links_consistent()
            && self.index.len() == self.order.len()
            && self.order.len() <= self.capacity.get()
            && self.order.iter().all(|entry| {
                self.index
                    .get(&entry.key)
                    .and_then(|handle| self.order.get(handle))
                    .is_some_and(|mapped| std::ptr::eq(mapped, entry))
            })
    }

    /// Evicts least recently used entries until the size fits the capacity.
    ///
    /// Returns the number of evicted entries.
    fn enforce_capacity(&mut self) -> usize {
        let mut evicted = 0;
        while self.order.len() > self.capacity.get() {
            // len > capacity >= 1, so the list cannot be empty here.
            let Ok(entry) = self.order.pop_least_recent() else {
                break;
            };
            self.index.remove(&entry.key);
            if let Some(listener) = self.on_evict.as_mut() {
                listener(&entry.key, &entry.value);
            }
            evicted += 1;
        }
        evicted
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("has_eviction_listener", &self.on_evict.is_some())
            .finish()
    }
}

/// Renders entries as `{key=value, ...}` from least to most recently used.
impl<K, V> fmt::Display for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over cache entries from least to most recently used.
pub struct Iter<'a, K, V> {
    inner: recency_list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
