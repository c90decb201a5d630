//! Cache configuration types and builder patterns
//!
//! This module provides the configuration for [`super::Cache`]: its name (used
//! in logs and reports), its fixed capacity, and whether access statistics are
//! collected. Configurations can be built in code or loaded from TOML.

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, CacheResult};

/// Capacity used by [`CacheConfig::default`]
pub const DEFAULT_CAPACITY: usize = 128;

/// Name used when none is configured
pub const DEFAULT_NAME: &str = "default";

/// Configuration for cache behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheConfig {
    /// Name reported in logs and health reports
    pub name: String,

    /// Maximum number of entries; must be positive
    pub capacity: usize,

    /// Whether to collect hit/miss/eviction statistics
    pub track_metrics: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { name: DEFAULT_NAME.to_string(), capacity: DEFAULT_CAPACITY, track_metrics: false }
    }
}

/// On-disk form; signed so a negative capacity is reported as an invalid
/// argument rather than a parse failure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCacheConfig {
    #[serde(default)]
    name: Option<String>,
    capacity: i64,
    #[serde(default)]
    track_metrics: bool,
}

impl TryFrom<RawCacheConfig> for CacheConfig {
    type Error = CacheError;

    fn try_from(raw: RawCacheConfig) -> CacheResult<Self> {
        let capacity = usize::try_from(raw.capacity)
            .ok()
            .filter(|capacity| *capacity > 0)
            .ok_or_else(|| CacheError::non_positive_capacity(raw.capacity))?;

        Ok(Self {
            name: raw.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            capacity,
            track_metrics: raw.track_metrics,
        })
    }
}

impl CacheConfig {
    /// Create a new configuration builder
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Quick preset for an LRU cache of the given capacity
    ///
    /// # Example
    /// ```
    /// use recency_cache::cache::CacheConfig;
    ///
    /// let config = CacheConfig::lru(1000);
    /// assert_eq!(config.capacity, 1000);
    /// ```
    pub fn lru(capacity: usize) -> Self {
        Self { capacity, ..Self::default() }
    }

    /// Check the configuration can back a cache
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidArgument`] when `capacity` is zero.
    pub fn validate(&self) -> CacheResult<()> {
        if self.capacity == 0 {
            return Err(CacheError::non_positive_capacity(self.capacity));
        }
        Ok(())
    }

    /// Parse a configuration from TOML text
    ///
    /// # Example
    /// ```
    /// use recency_cache::cache::CacheConfig;
    ///
    /// let config = CacheConfig::from_toml_str("name = \"posts\"\ncapacity = 3\n")?;
    /// assert_eq!(config.name, "posts");
    /// assert_eq!(config.capacity, 3);
    /// # Ok::<(), recency_cache::error::CacheError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Config`] for malformed TOML or unknown keys and
    /// [`CacheError::InvalidArgument`] for a capacity that is zero or negative.
    pub fn from_toml_str(text: &str) -> CacheResult<Self> {
        let raw: RawCacheConfig = toml::from_str(text)?;
        Self::try_from(raw)
    }

    /// Render the configuration as TOML text
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Config`] if serialization fails.
    pub fn to_toml_string(&self) -> CacheResult<String> {
        toml::to_string(self).map_err(|e| CacheError::config(e.to_string()))
    }
}

/// Builder for CacheConfig with fluent API
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    config: CacheConfig,
}

impl CacheConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set maximum number of entries
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Enable or disable metrics tracking
    pub fn track_metrics(mut self, enabled: bool) -> Self {
        self.config.track_metrics = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CacheConfig {
        self.config
    }
}
