//! Single-owner data structures behind the LRU cache
//!
//! This module provides the building blocks of the cache:
//! - **[`recency_list`]**: arena-backed doubly linked list ordered by recency
//! - **[`index`]**: key to entry-handle map
//! - **[`lru_cache`]**: the fixed-capacity LRU cache combining both
//!
//! None of these types synchronize internally. For a shareable, thread-safe
//! cache see [`crate::cache::Cache`].
//!
//! ## Usage
//!
//! ```rust
//! use recency_cache::collections::LruCache;
//!
//! let mut cache = LruCache::try_new(2)?;
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3); // evicts "b"
//! assert_eq!(cache.to_string(), "{a=1, c=3}");
//! # Ok::<(), recency_cache::error::CacheError>(())
//! ```

pub mod index;
pub mod lru_cache;
pub mod recency_list;

// Re-export commonly used types
pub use index::Index;
pub use lru_cache::{EvictionListener, LruCache, PutOutcome};
pub use recency_list::{Handle, RecencyList};
