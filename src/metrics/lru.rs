//! LRU Cache Metrics
//!
//! Metrics specific to the LRU (Least Recently Used) cache algorithm.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;

/// LRU-specific metrics (extends CoreCacheMetrics)
///
/// This struct contains metrics specific to the LRU (Least Recently Used) cache algorithm.
/// Currently, LRU uses only the core metrics, but this structure allows for future
/// LRU-specific metrics to be added.
#[derive(Debug, Default, Clone)]
pub struct LruCacheMetrics {
    /// Core metrics common to all eviction policies
    pub core: CoreCacheMetrics,
    // LRU doesn't have algorithm-specific metrics beyond core metrics
    // But we keep this structure for consistency with the other policies
}

impl LruCacheMetrics {
    /// Creates a new LruCacheMetrics instance with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts LRU metrics to a BTreeMap for reporting
    ///
    /// Uses BTreeMap to ensure consistent, deterministic ordering of metrics.
    ///
    /// # Returns
    /// A BTreeMap containing all LRU cache metrics as key-value pairs
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        // LRU-specific metrics would go here; for now only the core counters
        self.core.to_btreemap()
    }
}

impl CacheMetrics for LruCacheMetrics {
    /// Returns all LRU cache metrics as key-value pairs in deterministic order
    ///
    /// # Returns
    /// A BTreeMap containing all metrics tracked by this LRU cache instance
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    /// Returns the algorithm name for this cache implementation
    ///
    /// # Returns
    /// "LRU" - identifying this as a Least Recently Used cache
    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
