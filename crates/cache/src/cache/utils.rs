//! Cache utilities for monitoring and reporting
//!
//! Health checks and metric summaries built on [`CacheStats`]. Both read the
//! statistics a cache collects when `track_metrics` is enabled.

use std::fmt;
use std::hash::Hash;

#[cfg(feature = "observability")]
use tracing::{info, warn};

use super::{Cache, CacheStats};

/// Hit rate below which a busy cache is reported as [`CacheHealth::LowHitRate`]
pub const LOW_HIT_RATE: f64 = 0.5;

/// Minimum accesses before the hit rate is judged
pub const MIN_ACCESSES_FOR_HIT_RATE: u64 = 100;

/// Fill ratio above which a cache is reported as [`CacheHealth::NearCapacity`]
pub const NEAR_CAPACITY_FILL: f64 = 0.85;

/// Evictions per access above which a recommendation is emitted
pub const HIGH_EVICTION_RATE: f64 = 0.2;

/// Cache health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheHealth {
    /// Cache is operating normally
    Healthy,
    /// Cache hit rate is low, consider tuning
    LowHitRate,
    /// Cache is nearly full, consider increasing capacity
    NearCapacity,
    /// Cache has both low hit rate and near capacity
    Critical,
}

impl fmt::Display for CacheHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::LowHitRate => write!(f, "Low Hit Rate"),
            Self::NearCapacity => write!(f, "Near Capacity"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// Cache health report with diagnostics
#[derive(Debug, Clone)]
pub struct CacheHealthReport {
    /// Name of the cache the report describes
    pub cache: String,
    /// Overall health status
    pub health: CacheHealth,
    /// Statistics the report was computed from
    pub stats: CacheStats,
    /// Recommendations for tuning
    pub recommendations: Vec<String>,
}

impl CacheHealthReport {
    /// Generate a health report for a cache
    ///
    /// # Thresholds
    /// - Low hit rate: < 50% once more than 100 lookups happened
    /// - Near capacity: > 85% full
    /// - High eviction rate: > 0.2 evictions per lookup
    ///
    /// # Example
    /// ```
    /// use recency_cache::cache::utils::{CacheHealth, CacheHealthReport};
    /// use recency_cache::cache::{Cache, CacheConfig};
    ///
    /// let cache: Cache<String, i32> =
    ///     Cache::new(CacheConfig::builder().capacity(100).track_metrics(true).build())?;
    ///
    /// let report = CacheHealthReport::new(&cache);
    /// assert_eq!(report.health, CacheHealth::Healthy);
    /// # Ok::<(), recency_cache::error::CacheError>(())
    /// ```
    pub fn new<K, V>(cache: &Cache<K, V>) -> Self
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        Self::from_stats(cache.name(), cache.stats())
    }

    /// Generate a health report from a statistics snapshot
    #[allow(clippy::cast_precision_loss)]
    pub fn from_stats(cache: impl Into<String>, stats: CacheStats) -> Self {
        let mut recommendations = Vec::new();

        let low_hit_rate =
            stats.hit_rate() < LOW_HIT_RATE && stats.total_accesses() > MIN_ACCESSES_FOR_HIT_RATE;
        if low_hit_rate {
            recommendations.push(format!(
                "Hit rate is {:.2}%. Consider increasing capacity.",
                stats.hit_rate() * 100.0
            ));
        }

        let near_capacity = stats.fill_ratio() > NEAR_CAPACITY_FILL;
        if near_capacity {
            recommendations.push(format!(
                "Cache is {:.1}% full. Consider increasing capacity.",
                stats.fill_ratio() * 100.0
            ));
        }

        if stats.total_accesses() > 0 {
            let eviction_rate = stats.evictions as f64 / stats.total_accesses() as f64;
            if eviction_rate > HIGH_EVICTION_RATE {
                recommendations.push(format!(
                    "High eviction rate: {:.2}%. Cache may be too small for workload.",
                    eviction_rate * 100.0
                ));
            }
        }

        let health = match (low_hit_rate, near_capacity) {
            (true, true) => CacheHealth::Critical,
            (true, false) => CacheHealth::LowHitRate,
            (false, true) => CacheHealth::NearCapacity,
            (false, false) => CacheHealth::Healthy,
        };

        Self { cache: cache.into(), health, stats, recommendations }
    }

    /// Check whether the report found nothing to flag
    pub fn is_healthy(&self) -> bool {
        self.health == CacheHealth::Healthy
    }

    /// Log the health report using tracing
    #[cfg(feature = "observability")]
    pub fn log(&self) {
        if self.is_healthy() {
            info!(
                cache = %self.cache,
                health = %self.health,
                hit_rate = self.stats.hit_rate(),
                size = self.stats.size,
                "Cache health check: Healthy"
            );
            return;
        }

        warn!(
            cache = %self.cache,
            health = %self.health,
            hit_rate = self.stats.hit_rate(),
            size = self.stats.size,
            capacity = self.stats.capacity,
            "Cache health check: Issues detected"
        );
        for rec in &self.recommendations {
            warn!(cache = %self.cache, recommendation = %rec, "Cache tuning recommendation");
        }
    }
}

impl fmt::Display for CacheHealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cache Health Report: {}", self.cache)?;
        writeln!(f, "===================")?;
        writeln!(f, "Status: {}", self.health)?;
        writeln!(f)?;
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Size: {}/{}", self.stats.size, self.stats.capacity)?;
        writeln!(f, "  Hits: {}", self.stats.hits)?;
        writeln!(f, "  Misses: {}", self.stats.misses)?;
        writeln!(f, "  Hit Rate: {:.2}%", self.stats.hit_rate() * 100.0)?;
        writeln!(f, "  Evictions: {}", self.stats.evictions)?;
        writeln!(f, "  Fill: {:.1}%", self.stats.fill_ratio() * 100.0)?;

        if !self.recommendations.is_empty() {
            writeln!(f)?;
            writeln!(f, "Recommendations:")?;
            for (i, rec) in self.recommendations.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, rec)?;
            }
        }

        Ok(())
    }
}

/// Cache metrics reporter for periodic monitoring
///
/// # Example
/// ```
/// use recency_cache::cache::utils::MetricsReporter;
/// use recency_cache::cache::{Cache, CacheConfig};
///
/// let cache: Cache<String, i32> =
///     Cache::new(CacheConfig::builder().name("posts").capacity(10).track_metrics(true).build())?;
/// cache.put("a".to_string(), 1);
///
/// let reporter = MetricsReporter::new("service");
/// assert!(reporter.summary(&cache).starts_with("service/posts size=1/10"));
/// # Ok::<(), recency_cache::error::CacheError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MetricsReporter {
    scope: String,
}

impl MetricsReporter {
    /// Create a reporter that prefixes every report with `scope`
    pub fn new(scope: impl Into<String>) -> Self {
        Self { scope: scope.into() }
    }

    /// Report current cache metrics using tracing
    #[cfg(feature = "observability")]
    pub fn report<K, V>(&self, cache: &Cache<K, V>)
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        let stats = cache.stats();
        info!(
            scope = %self.scope,
            cache = %cache.name(),
            size = stats.size,
            capacity = stats.capacity,
            hits = stats.hits,
            misses = stats.misses,
            hit_rate = format!("{:.2}%", stats.hit_rate() * 100.0),
            inserts = stats.inserts,
            updates = stats.updates,
            evictions = stats.evictions,
            removals = stats.removals,
            "Cache metrics report"
        );
    }

    /// Render current cache metrics as a single line
    pub fn summary<K, V>(&self, cache: &Cache<K, V>) -> String
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        let stats = cache.stats();
        format!(
            "{}/{} size={}/{} hits={} misses={} hit_rate={:.2}% evictions={}",
            self.scope,
            cache.name(),
            stats.size,
            stats.capacity,
            stats.hits,
            stats.misses,
            stats.hit_rate() * 100.0,
            stats.evictions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;

    fn tracked(capacity: usize) -> Cache<String, i32> {
        let config =
            CacheConfig::builder().name("health").capacity(capacity).track_metrics(true).build();
        Cache::new(config).unwrap()
    }

    /// Validates `CacheHealthReport::new` behavior for the health report
    /// healthy scenario.
    ///
    /// Assertions:
    /// - Confirms `report.health` equals `CacheHealth::Healthy`.
    #[test]
    fn test_health_report_healthy() {
        let cache = tracked(100);

        for i in 0..50 {
            cache.put(format!("key{i}"), i);
        }
        for i in 0..50 {
            let _ = cache.get(&format!("key{i}"));
        }

        let report = CacheHealthReport::new(&cache);
        assert_eq!(report.health, CacheHealth::Healthy);
        assert!(report.recommendations.is_empty());
        #[cfg(feature = "observability")]
        report.log();
    }

    /// Validates `CacheHealthReport::new` behavior for the health report low
    /// hit rate scenario.
    ///
    /// Assertions:
    /// - Confirms `report.health` equals `CacheHealth::LowHitRate`.
    /// - Ensures `!report.recommendations.is_empty()` evaluates to true.
    #[test]
    fn test_health_report_low_hit_rate() {
        let cache = tracked(100);

        for i in 0..10 {
            cache.put(format!("key{i}"), i);
        }
        for i in 0..10 {
            let _ = cache.get(&format!("key{i}"));
        }
        // Misses push the hit rate below 50% and total accesses past 100
        for i in 100..250 {
            let _ = cache.get(&format!("key{i}"));
        }

        let report = CacheHealthReport::new(&cache);
        assert_eq!(report.health, CacheHealth::LowHitRate);
        assert!(!report.recommendations.is_empty());
        #[cfg(feature = "observability")]
        report.log();
    }

    /// Validates `CacheHealthReport::new` behavior for the health report near
    /// capacity scenario.
    #[test]
    fn test_health_report_near_capacity() {
        let cache = tracked(100);

        for i in 0..90 {
            cache.put(format!("key{i}"), i);
        }
        for i in 0..90 {
            let _ = cache.get(&format!("key{i}"));
        }

        let report = CacheHealthReport::new(&cache);
        assert_eq!(report.health, CacheHealth::NearCapacity);
    }

    /// Validates a full cache with a poor hit rate is critical and flags the
    /// eviction rate.
    #[test]
    fn test_health_report_critical() {
        let stats = CacheStats {
            size: 10,
            capacity: 10,
            hits: 20,
            misses: 180,
            inserts: 180,
            evictions: 170,
            ..Default::default()
        };

        let report = CacheHealthReport::from_stats("scan", stats);
        assert_eq!(report.health, CacheHealth::Critical);
        assert_eq!(report.recommendations.len(), 3);
        assert!(report.recommendations[2].starts_with("High eviction rate"));
    }

    /// Validates `CacheHealthReport` display output for the report display
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures `display.contains("Cache Health Report: health")` evaluates
    ///   to true.
    /// - Ensures `display.contains("Size: 0/100")` evaluates to true.
    #[test]
    fn test_health_report_display() {
        let cache = tracked(100);

        let report = CacheHealthReport::new(&cache);
        let display = format!("{report}");
        assert!(display.contains("Cache Health Report: health"));
        assert!(display.contains("Status: Healthy"));
        assert!(display.contains("Size: 0/100"));
        assert!(!display.contains("Recommendations:"));
    }

    /// Validates `MetricsReporter` behavior for the metrics reporter scenario.
    #[test]
    fn test_metrics_reporter() {
        let cache = tracked(100);
        cache.put("key".to_string(), 42);
        let _ = cache.get("key");

        let reporter = MetricsReporter::new("test");
        #[cfg(feature = "observability")]
        reporter.report(&cache);

        assert_eq!(
            reporter.summary(&cache),
            "test/health size=1/100 hits=1 misses=0 hit_rate=100.00% evictions=0"
        );
    }
}
