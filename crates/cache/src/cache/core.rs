//! Thread-safe LRU cache
//!
//! [`Cache`] wraps a [`LruCache`] in a single exclusive lock so it can be
//! shared across threads. Every operation, including `get` (which changes
//! recency) and snapshotting, holds the lock for its full duration.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::Mutex;
#[cfg(feature = "observability")]
use tracing::{debug, trace};

use super::config::CacheConfig;
use super::stats::{CacheStats, MetricsCollector};
use crate::collections::{LruCache, PutOutcome};
use crate::error::{CacheError, CacheResult};

/// Generic thread-safe LRU cache
///
/// Cloning a `Cache` is cheap and yields a handle to the same storage and
/// statistics.
///
/// # Type Parameters
/// - `K`: Key type (must be `Eq + Hash + Clone`)
/// - `V`: Value type (must be `Clone`; reads return owned copies)
///
/// # Reentrancy
///
/// Eviction listeners and the `get_or_insert_with` generator run while the
/// lock is held. Calling back into the same `Cache` from either deadlocks.
///
/// # Example
/// ```
/// use recency_cache::cache::{Cache, CacheConfig};
///
/// let cache: Cache<String, i32> = Cache::new(CacheConfig::lru(100))?;
/// cache.put("key".to_string(), 42);
/// assert_eq!(cache.get("key"), Some(42));
/// # Ok::<(), recency_cache::error::CacheError>(())
/// ```
pub struct Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    storage: Arc<Mutex<LruCache<K, V>>>,
    config: CacheConfig,
    metrics: MetricsCollector,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new cache with the given configuration
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] when the configured capacity is
    /// zero.
    pub fn new(config: CacheConfig) -> CacheResult<Self> {
        config.validate()?;
        let capacity = NonZeroUsize::new(config.capacity)
            .ok_or_else(|| CacheError::non_positive_capacity(config.capacity))?;

        #[cfg(feature = "observability")]
        debug!(
            cache = %config.name,
            capacity = config.capacity,
            track_metrics = config.track_metrics,
            "created LRU cache"
        );

        Ok(Self {
            storage: Arc::new(Mutex::new(LruCache::new(capacity))),
            config,
            metrics: MetricsCollector::new(),
        })
    }

    /// Create an unnamed cache holding at most `capacity` entries
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> CacheResult<Self> {
        Self::new(CacheConfig::lru(capacity))
    }

    /// Create a cache that reports every capacity eviction to `listener`
    ///
    /// The listener runs under the cache lock, right before the evicted
    /// entry is dropped. It is not called for `remove` or `clear`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] when the configured capacity is
    /// zero.
    pub fn with_eviction_listener<F>(config: CacheConfig, listener: F) -> CacheResult<Self>
    where
        F: FnMut(&K, &V) + Send + 'static,
    {
        let cache = Self::new(config)?;
        cache.storage.lock().set_eviction_listener(Some(Box::new(listener)));
        Ok(cache)
    }

    /// Get a value from the cache
    ///
    /// A hit promotes the entry to most recently used and returns a clone of
    /// its value. A miss returns `None` and changes nothing.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.storage.lock().get(key).cloned();

        if self.config.track_metrics {
            if value.is_some() {
                self.metrics.record_hit();
            } else {
                self.metrics.record_miss();
            }
        }

        value
    }

    /// Insert or update a value, returning the previous value for the key
    ///
    /// Inserting a new key into a full cache evicts the least recently used
    /// entry and reports it to the eviction listener, if one is installed.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        let outcome = self.storage.lock().put_with_outcome(key, value);
        self.record_put(&outcome);
        outcome.previous
    }

    /// Get or insert with a generator function
    ///
    /// Looks up `key` and, on a miss, stores the value produced by `f`, all
    /// within one lock acquisition. `f` must not use this cache.
    ///
    /// # Example
    /// ```
    /// use recency_cache::cache::Cache;
    ///
    /// let cache: Cache<String, i32> = Cache::with_capacity(100)?;
    /// let value = cache.get_or_insert_with("key".to_string(), || 42);
    /// assert_eq!(value, 42);
    /// assert_eq!(cache.get_or_insert_with("key".to_string(), || 7), 42);
    /// # Ok::<(), recency_cache::error::CacheError>(())
    /// ```
    pub fn get_or_insert_with<F>(&self, key: K, f: F) -> V
    where
        F: FnOnce() -> V,
    {
        let mut storage = self.storage.lock();

        if let Some(value) = storage.get(&key).cloned() {
            drop(storage);
            if self.config.track_metrics {
                self.metrics.record_hit();
            }
            return value;
        }

        let value = f();
        let outcome = storage.put_with_outcome(key, value.clone());
        drop(storage);

        if self.config.track_metrics {
            self.metrics.record_miss();
        }
        self.record_put(&outcome);
        value
    }

    /// Remove a value from the cache
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.storage.lock().remove(key);
        if removed.is_some() && self.config.track_metrics {
            self.metrics.record_removal();
        }
        removed
    }

    /// Read a value without changing recency or statistics
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.storage.lock().peek(key).cloned()
    }

    /// Check whether `key` is present without changing recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.storage.lock().contains(key)
    }

    /// Clear all entries from the cache
    ///
    /// Capacity is kept. Statistics are reset when metrics are tracked.
    pub fn clear(&self) {
        self.storage.lock().clear();

        if self.config.track_metrics {
            self.metrics.reset();
        }
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.storage.lock().len()
    }

    /// Alias of [`Cache::len`]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries held without evicting
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Name used in logs and health reports
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Configuration this cache was built from
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Point-in-time copy of every entry, least to most recently used
    ///
    /// The copy is taken in one pass under the lock; later operations on the
    /// cache do not affect it.
    pub fn entries_in_recency_order(&self) -> Snapshot<K, V> {
        let entries: Vec<(K, V)> = self
            .storage
            .lock()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Snapshot { entries: entries.into_iter() }
    }

    /// Get cache statistics
    ///
    /// Counters stay at zero unless the configuration enables
    /// `track_metrics`.
    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.len(), self.config.capacity)
    }

    /// Verify the internal structure is consistent
    ///
    /// Intended for tests and debugging; walks every entry under the lock.
    pub fn check_consistency(&self) -> bool {
        self.storage.lock().check_consistency()
    }

    fn record_put(&self, outcome: &PutOutcome<V>) {
        #[cfg(feature = "observability")]
        if outcome.evicted > 0 {
            trace!(
                cache = %self.config.name,
                capacity = self.config.capacity,
                evicted = outcome.evicted,
                "evicted least recently used entry"
            );
        }

        if !self.config.track_metrics {
            return;
        }

        if outcome.inserted() {
            self.metrics.record_insert();
        } else {
            self.metrics.record_update();
        }
        for _ in 0..outcome.evicted {
            self.metrics.record_eviction();
        }
    }
}

impl<K, V> Clone for Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: self.config.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.config.name)
            .field("len", &self.len())
            .field("capacity", &self.config.capacity)
            .finish()
    }
}

/// Owned entries copied out of a [`Cache`], least to most recently used
#[derive(Debug, Clone)]
pub struct Snapshot<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for Snapshot<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Snapshot<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for Snapshot<K, V> {}

impl<K, V> FusedIterator for Snapshot<K, V> {}

#[cfg(test)]
mod tests {
    //! Unit tests for cache::core.
    use std::thread;

    use super::*;

    fn keys(cache: &Cache<String, i32>) -> Vec<String> {
        cache.entries_in_recency_order().map(|(key, _)| key).collect()
    }

    fn tracked(capacity: usize) -> Cache<String, i32> {
        let config =
            CacheConfig::builder().name("test").capacity(capacity).track_metrics(true).build();
        Cache::new(config).unwrap()
    }

    /// Validates `Cache::new` behavior for the cache new scenario.
    ///
    /// Assertions:
    /// - Confirms `cache.len()` equals `0`.
    /// - Ensures `cache.is_empty()` evaluates to true.
    #[test]
    fn test_cache_new() {
        let cache: Cache<String, i32> = Cache::new(CacheConfig::default()).unwrap();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 128);
        assert_eq!(cache.name(), "default");
    }

    /// Validates a zero capacity is rejected for both constructors.
    #[test]
    fn test_cache_zero_capacity() {
        let err = Cache::<String, i32>::with_capacity(0).unwrap_err();
        assert!(matches!(err, CacheError::InvalidArgument { .. }));

        let err = Cache::<String, i32>::new(CacheConfig::lru(0)).unwrap_err();
        assert!(matches!(err, CacheError::InvalidArgument { .. }));
    }

    /// Validates `Cache::put` behavior for the cache insert and get scenario.
    ///
    /// Assertions:
    /// - Confirms `cache.get("key1")` equals `Some(42)`.
    /// - Confirms `cache.get("key3")` equals `None`.
    /// - Confirms `cache.size()` equals `2`.
    #[test]
    fn test_cache_insert_and_get() {
        let cache: Cache<String, i32> = Cache::with_capacity(10).unwrap();

        assert_eq!(cache.put("key1".to_string(), 42), None);
        assert_eq!(cache.put("key2".to_string(), 84), None);

        assert_eq!(cache.get("key1"), Some(42));
        assert_eq!(cache.get("key2"), Some(84));
        assert_eq!(cache.get("key3"), None);
        assert_eq!(cache.size(), 2);
    }

    /// Validates `Cache::put` behavior for the cache update existing scenario.
    #[test]
    fn test_cache_update_existing() {
        let cache: Cache<String, i32> = Cache::with_capacity(10).unwrap();

        cache.put("key".to_string(), 42);
        assert_eq!(cache.put("key".to_string(), 84), Some(42));
        assert_eq!(cache.get("key"), Some(84));
        assert_eq!(cache.len(), 1);
    }

    /// Validates `Cache::remove` behavior for the cache remove scenario.
    #[test]
    fn test_cache_remove() {
        let cache: Cache<String, i32> = Cache::with_capacity(10).unwrap();
        cache.put("key".to_string(), 42);

        assert_eq!(cache.remove("key"), Some(42));
        assert_eq!(cache.remove("key"), None);
        assert!(cache.is_empty());
        assert!(cache.check_consistency());
    }

    /// Validates the capacity-three walkthrough from one to four.
    ///
    /// Assertions:
    /// - Confirms the order after `get("one")` is two, three, one.
    /// - Confirms `put("four")` evicts `two`.
    #[test]
    fn test_cache_lru_walkthrough() {
        let cache: Cache<String, i32> = Cache::with_capacity(3).unwrap();
        cache.put("one".to_string(), 1);
        cache.put("two".to_string(), 2);
        cache.put("three".to_string(), 3);

        assert_eq!(cache.get("one"), Some(1));
        assert_eq!(keys(&cache), vec!["two", "three", "one"]);

        cache.put("four".to_string(), 4);
        assert!(!cache.contains("two"));
        assert_eq!(keys(&cache), vec!["three", "one", "four"]);
    }

    /// Validates `peek` and `contains` leave recency untouched.
    #[test]
    fn test_cache_peek_does_not_promote() {
        let cache: Cache<String, i32> = Cache::with_capacity(2).unwrap();
        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);

        assert_eq!(cache.peek("a"), Some(1));
        assert!(cache.contains("a"));
        cache.put("c".to_string(), 3);

        assert_eq!(cache.peek("a"), None);
        assert_eq!(keys(&cache), vec!["b", "c"]);
    }

    /// Validates `clear` empties the cache and keeps the capacity.
    #[test]
    fn test_cache_clear() {
        let cache = tracked(2);
        cache.put("a".to_string(), 1);
        cache.get("a");

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.stats(), CacheStats { capacity: 2, ..Default::default() });
    }

    /// Validates `get_or_insert_with` for the existing and new scenarios.
    ///
    /// Assertions:
    /// - Confirms the generator is not called on a hit.
    /// - Confirms the generated value is stored on a miss.
    #[test]
    fn test_cache_get_or_insert_with() {
        let cache = tracked(4);
        cache.put("hit".to_string(), 1);

        let value = cache.get_or_insert_with("hit".to_string(), || panic!("generator called"));
        assert_eq!(value, 1);

        let value = cache.get_or_insert_with("miss".to_string(), || 42);
        assert_eq!(value, 42);
        assert_eq!(cache.peek("miss"), Some(42));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.inserts, 2);
    }

    /// Validates `CacheConfig::builder` behavior for the cache stats tracking
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms `stats.size` equals `2`.
    /// - Confirms `stats.hits` equals `2` and `stats.misses` equals `1`.
    /// - Confirms one update, one eviction and one removal were counted.
    #[test]
    fn test_cache_stats_tracking() {
        let cache = tracked(2);

        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        cache.put("a".to_string(), 10);
        cache.get("a");
        cache.get("b");
        cache.get("missing");
        cache.put("c".to_string(), 3);
        cache.remove("b");
        cache.put("b".to_string(), 2);

        let stats = cache.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.capacity, 2);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.inserts, 4);
        assert_eq!(stats.updates, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.removals, 1);
        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < 1e-10);
    }

    /// Validates counters stay at zero when metrics are disabled.
    #[test]
    fn test_cache_stats_disabled() {
        let cache: Cache<String, i32> = Cache::with_capacity(1).unwrap();
        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        cache.get("b");

        let stats = cache.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.total_accesses(), 0);
        assert_eq!(stats.evictions, 0);
    }

    /// Validates the eviction listener sees capacity evictions only.
    #[test]
    fn test_cache_eviction_listener() {
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&evicted);
        let cache =
            Cache::with_eviction_listener(CacheConfig::lru(2), move |key: &String, value: &i32| {
                sink.lock().push((key.clone(), *value));
            })
            .unwrap();

        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);
        cache.put("c".to_string(), 3);
        cache.remove("b");
        cache.clear();

        assert_eq!(*evicted.lock(), vec![("a".to_string(), 1)]);
    }

    /// Validates the snapshot is detached from later mutations.
    #[test]
    fn test_cache_snapshot_is_point_in_time() {
        let cache: Cache<String, i32> = Cache::with_capacity(3).unwrap();
        cache.put("a".to_string(), 1);
        cache.put("b".to_string(), 2);

        let snapshot = cache.entries_in_recency_order();
        cache.put("c".to_string(), 3);
        cache.remove("a");

        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.rev().collect::<Vec<_>>(),
            vec![("b".to_string(), 2), ("a".to_string(), 1)]
        );
    }

    /// Validates clones share storage and statistics.
    #[test]
    fn test_cache_clone_shares_storage() {
        let cache = tracked(4);
        let other = cache.clone();

        other.put("shared".to_string(), 7);
        assert_eq!(cache.get("shared"), Some(7));
        assert_eq!(other.stats().hits, 1);
    }

    /// Validates `Arc::new` behavior for the cache thread safety scenario.
    ///
    /// Assertions:
    /// - Confirms `cache.len()` never exceeds the capacity.
    /// - Ensures `cache.check_consistency()` evaluates to true.
    #[test]
    fn test_cache_thread_safety() {
        let cache = tracked(50);
        let mut handles = vec![];

        for t in 0..8 {
            let cache = cache.clone();
            handles.push(thread::spawn(move || {
                for i in 0..200 {
                    let key = format!("{t}-{i}");
                    cache.put(key.clone(), i);
                    cache.get(&key);
                    cache.get(&format!("{}-{i}", (t + 1) % 8));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = cache.stats();
        assert_eq!(cache.len(), 50);
        assert!(cache.check_consistency());
        assert_eq!(stats.inserts, 1600);
        assert_eq!(stats.evictions, 1600 - 50);
        assert_eq!(stats.total_accesses(), 3200);
    }

    /// Validates the debug rendering reports name, length and capacity.
    #[test]
    fn test_cache_debug() {
        let cache = tracked(3);
        cache.put("a".to_string(), 1);
        assert_eq!(format!("{cache:?}"), "Cache { name: \"test\", len: 1, capacity: 3 }");
    }
}
