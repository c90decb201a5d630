//! Testing utilities and helpers
//!
//! This module provides testing utilities for code built on the cache:
//! - **[`assertions`]**: recency-order and structural invariant checks
//! - **[`fixtures`]**: seeded access workloads
//! - **[`logging`]**: test-friendly `tracing` subscriber setup
//! - **[`model`]**: a naive reference LRU to compare against
//!
//! ## Usage
//!
//! ```rust
//! use recency_cache::assert_recency_order;
//! use recency_cache::cache::Cache;
//! use recency_cache::testing::{assert_cache_invariants, init_test_tracing};
//!
//! init_test_tracing();
//!
//! let cache: Cache<&str, i32> = Cache::with_capacity(2)?;
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get("a");
//!
//! assert_recency_order!(cache, ["b", "a"]);
//! assert_cache_invariants(&cache);
//! # Ok::<(), recency_cache::error::CacheError>(())
//! ```

pub mod assertions;
pub mod fixtures;
pub mod logging;
pub mod model;

// Re-export commonly used items
// Note: `assert_recency_order!` is exported at the crate root
pub use assertions::{assert_cache_invariants, assert_lru_invariants};
pub use fixtures::{skewed_keys_seeded, workload_seeded, Access};
pub use logging::init_test_tracing;
pub use model::ReferenceLru;
