//! Cache Metrics System
//!
//! Provides a flexible metrics system for cache algorithms using BTreeMap-based
//! metrics reporting. Each eviction policy can track its own specific metrics
//! while implementing a common CacheMetrics trait.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap is used instead of HashMap for several critical reasons:
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Essential for testing and benchmarking comparisons
//! - **Stable serialization**: CSV exports have predictable key ordering
//! - **Better debugging**: Consistent output makes logs more readable
//!
//! The performance difference (O(log n) vs O(1)) is negligible with ~10 metric keys,
//! but the deterministic behavior is invaluable for a simulation system.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

// Re-export algorithm-specific metrics
pub mod belady;
pub mod lfu;
pub mod lru;

pub use belady::BeladyMetrics;
pub use lfu::LfuCacheMetrics;
pub use lru::LruCacheMetrics;

/// Common metrics tracked by all eviction policies
#[derive(Debug, Default, Clone)]
pub struct CoreCacheMetrics {
    /// Total number of requests made to the cache
    pub requests: u64,

    /// Number of requests that resulted in cache hits
    pub cache_hits: u64,

    /// Number of entries evicted from the cache due to capacity constraints
    pub evictions: u64,

    /// Number of entries inserted into the cache
    pub insertions: u64,
}

impl CoreCacheMetrics {
    /// Creates a new CoreCacheMetrics instance with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cache hit - when a requested key was found in the cache
    ///
    /// This increments total requests and cache hits.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a cache miss - when a requested key was not found in the cache
    ///
    /// This increments total requests only.
    /// Cache misses are calculated as (requests - cache_hits).
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records an eviction - when an entry is removed to make room for another
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an insertion - when a new entry is stored in the cache
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Returns the number of cache misses
    ///
    /// # Returns
    /// The difference between total requests and cache hits
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Calculates the cache hit rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0 representing the hit rate, or 0.0 if no requests have been made
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Calculates the cache miss rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0 representing the miss rate, or 0.0 if no requests have been made
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            (self.requests - self.cache_hits) as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to BTreeMap for reporting
    ///
    /// Uses BTreeMap to ensure deterministic, consistent ordering of metrics
    /// which is critical for reproducible testing and comparison results.
    ///
    /// # Returns
    /// A BTreeMap containing all core metrics with consistent key ordering
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        // Basic counters
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);

        // Calculated metrics
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        // Derived metrics
        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Trait that all eviction policies implement for metrics reporting
///
/// This trait provides a uniform interface for retrieving metrics from any cache implementation.
/// It allows the simulation system to collect and compare metrics across different policies.
///
/// The trait uses BTreeMap to ensure deterministic ordering of metrics, which is essential
/// for reproducible benchmarks and consistent test results.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    ///
    /// The returned BTreeMap contains all relevant metrics for the policy,
    /// including both core metrics and any algorithm-specific metrics.
    /// Keys are sorted alphabetically for consistent output.
    ///
    /// # Returns
    /// A BTreeMap where keys are metric names and values are metric values as f64
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification
    ///
    /// # Returns
    /// A static string identifying the policy (e.g., "LRU", "LFU", "Belady")
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_metrics_counters() {
        let mut core = CoreCacheMetrics::new();
        core.record_miss();
        core.record_insertion();
        core.record_hit();
        core.record_hit();
        core.record_miss();
        core.record_eviction();
        core.record_insertion();

        assert_eq!(core.requests, 4);
        assert_eq!(core.cache_hits, 2);
        assert_eq!(core.cache_misses(), 2);
        assert_eq!(core.evictions, 1);
        assert_eq!(core.insertions, 2);
        assert_eq!(core.hit_rate(), 0.5);
        assert_eq!(core.miss_rate(), 0.5);
    }

    #[test]
    fn test_rates_with_no_requests() {
        let core = CoreCacheMetrics::new();
        assert_eq!(core.hit_rate(), 0.0);
        assert_eq!(core.miss_rate(), 0.0);
        let map = core.to_btreemap();
        assert_eq!(map.get("requests"), Some(&0.0));
        assert!(map.get("eviction_rate").is_none());
    }

    #[test]
    fn test_to_btreemap_keys() {
        let mut core = CoreCacheMetrics::new();
        core.record_miss();
        core.record_insertion();
        let map = core.to_btreemap();
        for key in [
            "cache_hits",
            "cache_misses",
            "eviction_rate",
            "evictions",
            "hit_rate",
            "insertions",
            "miss_rate",
            "requests",
        ] {
            assert!(map.contains_key(key), "missing metric key: {key}");
        }
    }
}
