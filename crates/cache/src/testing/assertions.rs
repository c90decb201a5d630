//! Custom assertions for testing
//!
//! Provides assertion macros and functions for checking cache state.

// Assertions panic on failure by design
#![allow(clippy::missing_panics_doc)]

use std::fmt::Debug;
use std::hash::Hash;

use crate::cache::Cache;
use crate::collections::LruCache;

/// Assert the keys of a cache in recency order, least recently used first
///
/// Works with both [`LruCache`] and [`Cache`].
///
/// # Examples
///
/// ```
/// use recency_cache::assert_recency_order;
/// use recency_cache::collections::LruCache;
///
/// let mut cache = LruCache::try_new(3)?;
/// cache.put("one", 1);
/// cache.put("two", 2);
/// cache.get(&"one");
///
/// assert_recency_order!(cache, ["two", "one"]);
/// # Ok::<(), recency_cache::error::CacheError>(())
/// ```
#[macro_export]
macro_rules! assert_recency_order {
    ($cache:expr, []) => {{
        let remaining = $cache.entries_in_recency_order().count();
        assert_eq!(remaining, 0, "expected an empty recency order");
    }};
    ($cache:expr, [$($key:expr),+ $(,)?]) => {{
        let actual: ::std::vec::Vec<_> =
            $cache.entries_in_recency_order().map(|(key, _)| key.clone()).collect();
        let expected: ::std::vec::Vec<_> = ::std::vec![$($key),+];
        assert_eq!(actual, expected, "recency order (least to most recently used)");
    }};
}

/// Assert the structural invariants of a shared cache
///
/// Checks the index and recency order agree, `len() <= capacity()`, and a
/// snapshot sees exactly `len()` distinct entries.
pub fn assert_cache_invariants<K, V>(cache: &Cache<K, V>)
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    assert!(cache.check_consistency(), "index and recency order disagree: {cache:?}");

    let snapshot: Vec<K> = cache.entries_in_recency_order().map(|(key, _)| key).collect();
    assert_distinct_within_capacity(&snapshot, cache.capacity());
}

/// Assert the structural invariants of a single-owner cache
pub fn assert_lru_invariants<K, V>(cache: &LruCache<K, V>)
where
    K: Eq + Hash + Clone + Debug,
{
    assert!(cache.check_consistency(), "index and recency order disagree: {cache:?}");

    let keys: Vec<K> = cache.iter().map(|(key, _)| key.clone()).collect();
    assert_eq!(keys.len(), cache.len(), "iteration length differs from len()");
    assert_distinct_within_capacity(&keys, cache.capacity());
}

fn assert_distinct_within_capacity<K>(keys: &[K], capacity: usize)
where
    K: Eq + Hash + Debug,
{
    assert!(keys.len() <= capacity, "{} entries exceed capacity {capacity}", keys.len());

    let mut seen = std::collections::HashSet::with_capacity(keys.len());
    for key in keys {
        assert!(seen.insert(key), "key {key:?} appears twice in recency order");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates `assert_recency_order!` for the single-owner cache scenario.
    #[test]
    fn test_assert_recency_order_lru() {
        let mut cache = LruCache::try_new(2).unwrap();
        assert_recency_order!(cache, []);

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        assert_recency_order!(cache, ["b", "c"]);
        assert_lru_invariants(&cache);
    }

    /// Validates `assert_recency_order!` with owned keys on a shared cache.
    #[test]
    fn test_assert_recency_order_shared() {
        let cache: Cache<String, i32> = Cache::with_capacity(3).unwrap();
        cache.put("x".to_string(), 1);
        cache.put("y".to_string(), 2);
        cache.get("x");

        assert_recency_order!(cache, ["y", "x"]);
        assert_cache_invariants(&cache);
    }

    /// Validates a mismatched order fails the assertion.
    #[test]
    #[should_panic(expected = "recency order")]
    fn test_assert_recency_order_mismatch() {
        let mut cache = LruCache::try_new(2).unwrap();
        cache.put("a", 1);
        cache.put("b", 2);
        assert_recency_order!(cache, ["b", "a"]);
    }
}
