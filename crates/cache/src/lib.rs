//! Bounded, access-ordered key/value caching.
//!
//! # Safety and Quality
//!
//! The crate forbids `unsafe`; the recency order is an index-linked arena
//! rather than a pointer-linked list.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: errors and the single-owner collections (`LruCache`)
//! - `observability`: tracing events from `Cache` (construction, evictions)
//!   and the `log`/`report` methods of the health utilities
//! - `runtime`: the thread-safe `Cache`, its configuration and statistics
//! - `test-utils`: assertions, fixtures and tracing setup for tests (enables
//!   `runtime` and `observability`)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod collections;
#[cfg(feature = "foundation")]
pub mod error;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod cache;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(feature = "test-utils")]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "runtime")]
pub use cache::{Cache, CacheConfig, CacheConfigBuilder, CacheStats, Snapshot};
#[cfg(feature = "foundation")]
pub use collections::{EvictionListener, LruCache, PutOutcome};
#[cfg(feature = "foundation")]
pub use error::{CacheError, CacheResult, ErrorClassification, ErrorSeverity};
