//! Offline-Optimal Simulator Metrics
//!
//! Metrics for the Belady (offline optimal) baseline. The simulator computes
//! its whole hit/miss record at construction, so these metrics describe the
//! precomputed record plus the replay cursor rather than a live cache.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Belady-specific metrics (extends CoreCacheMetrics)
///
/// The core counters are filled in during the construction-time analysis
/// pass: one request per trace position, a hit or miss per the optimal
/// schedule, and an eviction per forced replacement.
#[derive(Debug, Default, Clone)]
pub struct BeladyMetrics {
    /// Core metrics common to all eviction policies
    pub core: CoreCacheMetrics,

    /// Number of positions in the analyzed trace
    pub trace_len: u64,
}

impl BeladyMetrics {
    /// Creates a new BeladyMetrics instance with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts Belady metrics to a BTreeMap for reporting
    ///
    /// Uses BTreeMap to ensure consistent, deterministic ordering of metrics.
    ///
    /// # Returns
    /// A BTreeMap containing all simulator metrics as key-value pairs
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("trace_len".to_string(), self.trace_len as f64);
        metrics
    }
}

impl CacheMetrics for BeladyMetrics {
    /// Returns all simulator metrics as key-value pairs in deterministic order
    ///
    /// # Returns
    /// A BTreeMap containing all metrics tracked by this simulator instance
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    /// Returns the algorithm name for this implementation
    ///
    /// # Returns
    /// "Belady" - identifying this as the offline optimal baseline
    fn algorithm_name(&self) -> &'static str {
        "Belady"
    }
}
