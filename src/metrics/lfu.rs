//! LFU Cache Metrics
//!
//! Metrics specific to the LFU (Least Frequently Used) cache algorithm.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends CoreCacheMetrics)
///
/// This struct contains metrics specific to the LFU (Least Frequently Used) cache algorithm.
/// LFU tracks frequency of access for each entry, so these metrics focus on frequency
/// distribution and access patterns.
#[derive(Debug, Default, Clone)]
pub struct LfuCacheMetrics {
    /// Core metrics common to all eviction policies
    pub core: CoreCacheMetrics,

    /// Current minimum frequency in the cache
    pub min_frequency: u64,

    /// Highest frequency any entry has reached
    pub max_frequency: u64,

    /// Total number of frequency increments (every cache hit increases frequency)
    pub total_frequency_increments: u64,

    /// Number of unique frequency levels currently in use
    pub active_frequency_levels: u64,
}

impl LfuCacheMetrics {
    /// Creates a new LfuCacheMetrics instance with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frequency increment (when an entry is accessed and its frequency increases)
    ///
    /// # Arguments
    /// * `new_frequency` - The new frequency value for the accessed entry
    pub fn record_frequency_increment(&mut self, new_frequency: usize) {
        self.total_frequency_increments += 1;

        let new_freq = new_frequency as u64;
        if new_freq > self.max_frequency {
            self.max_frequency = new_freq;
        }
    }

    /// Records a cache hit with frequency information
    ///
    /// # Arguments
    /// * `frequency` - Frequency of the accessed entry before the hit
    pub fn record_frequency_hit(&mut self, frequency: usize) {
        self.core.record_hit();

        let freq = frequency as u64;
        if freq > self.max_frequency {
            self.max_frequency = freq;
        }
    }

    /// Records a cache miss for LFU metrics
    pub fn record_miss(&mut self) {
        self.core.record_miss();
    }

    /// Updates the frequency gauges from the live index state
    ///
    /// # Arguments
    /// * `min_frequency` - Smallest occupied frequency
    /// * `levels` - Number of different frequency levels currently in use
    pub fn update_frequency_gauges(&mut self, min_frequency: usize, levels: usize) {
        self.min_frequency = min_frequency as u64;
        self.active_frequency_levels = levels as u64;
    }

    /// Calculates the average frequency increment per hit
    ///
    /// # Returns
    /// Average increments per hit, or 0.0 if no hits have occurred
    pub fn average_frequency(&self) -> f64 {
        if self.core.cache_hits > 0 {
            self.total_frequency_increments as f64 / self.core.cache_hits as f64
        } else {
            0.0
        }
    }

    /// Calculates the frequency range (max - min)
    ///
    /// # Returns
    /// The range of frequencies currently in the cache
    pub fn frequency_range(&self) -> u64 {
        self.max_frequency.saturating_sub(self.min_frequency)
    }

    /// Converts LFU metrics to a BTreeMap for reporting
    ///
    /// This method returns all metrics relevant to the LFU cache algorithm,
    /// including both core metrics and LFU-specific frequency metrics.
    ///
    /// Uses BTreeMap to ensure consistent, deterministic ordering of metrics.
    ///
    /// # Returns
    /// A BTreeMap containing all LFU cache metrics as key-value pairs
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        // LFU-specific metrics
        metrics.insert("min_frequency".to_string(), self.min_frequency as f64);
        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert("frequency_range".to_string(), self.frequency_range() as f64);
        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );
        metrics.insert(
            "active_frequency_levels".to_string(),
            self.active_frequency_levels as f64,
        );
        metrics.insert("average_frequency".to_string(), self.average_frequency());

        if self.core.requests > 0 {
            metrics.insert(
                "frequency_increment_rate".to_string(),
                self.total_frequency_increments as f64 / self.core.requests as f64,
            );
        }

        metrics
    }
}

impl CacheMetrics for LfuCacheMetrics {
    /// Returns all LFU cache metrics as key-value pairs in deterministic order
    ///
    /// # Returns
    /// A BTreeMap containing all metrics tracked by this LFU cache instance
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    /// Returns the algorithm name for this cache implementation
    ///
    /// # Returns
    /// "LFU" - identifying this as a Least Frequently Used cache
    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}
