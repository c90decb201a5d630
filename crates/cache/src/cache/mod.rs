//! Thread-safe LRU cache with configuration, statistics and health reporting
//!
//! [`Cache`] puts a [`crate::collections::LruCache`] behind a single
//! `parking_lot` mutex so any number of threads can share it through cheap
//! clones.
//!
//! # Features
//!
//! - **Thread-safe**: every operation runs under one exclusive lock
//! - **Generic**: works with any `K: Eq + Hash + Clone` and `V: Clone`
//! - **Fixed capacity**: the least recently used entry is evicted on overflow
//! - **Metrics tracking**: optional hit/miss/eviction statistics
//! - **Configurable**: in code through a builder, or from TOML
//!
//! # Examples
//!
//! ## Simple LRU Cache
//! ```
//! use recency_cache::cache::{Cache, CacheConfig};
//!
//! let cache: Cache<String, i32> = Cache::new(CacheConfig::lru(100))?;
//! cache.put("key".to_string(), 42);
//! assert_eq!(cache.get("key"), Some(42));
//! # Ok::<(), recency_cache::error::CacheError>(())
//! ```
//!
//! ## Configuration from TOML
//! ```
//! use recency_cache::cache::{Cache, CacheConfig};
//!
//! let config = CacheConfig::from_toml_str(
//!     r#"
//!     name = "posts"
//!     capacity = 3
//!     track_metrics = true
//!     "#,
//! )?;
//! let cache: Cache<u64, String> = Cache::new(config)?;
//! assert_eq!(cache.capacity(), 3);
//! # Ok::<(), recency_cache::error::CacheError>(())
//! ```
//!
//! ## Cache Statistics
//! ```
//! use recency_cache::cache::{Cache, CacheConfig};
//!
//! let config = CacheConfig::builder().capacity(100).track_metrics(true).build();
//! let cache: Cache<String, i32> = Cache::new(config)?;
//!
//! cache.put("key1".to_string(), 1);
//! let _ = cache.get("key1");
//!
//! let stats = cache.stats();
//! println!("Hit rate: {:.2}%", stats.hit_rate() * 100.0);
//! println!("Cache size: {}/{}", stats.size, stats.capacity);
//! # Ok::<(), recency_cache::error::CacheError>(())
//! ```
//!
//! # Thread Safety
//!
//! Clones share storage, so a clone can be moved into each thread:
//!
//! ```
//! use std::thread;
//!
//! use recency_cache::cache::Cache;
//!
//! let cache: Cache<String, usize> = Cache::with_capacity(100)?;
//!
//! let mut handles = vec![];
//! for i in 0..10 {
//!     let cache = cache.clone();
//!     handles.push(thread::spawn(move || {
//!         cache.put(format!("key-{i}"), i);
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 10);
//! # Ok::<(), recency_cache::error::CacheError>(())
//! ```

mod config;
mod core;
mod stats;
pub mod utils;

// Re-export public API
pub use core::{Cache, Snapshot};

pub use config::{CacheConfig, CacheConfigBuilder, DEFAULT_CAPACITY, DEFAULT_NAME};
pub use stats::CacheStats;
