// Data models for trace simulation

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Replacement policies supported for simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CachePolicy {
    Lru,
    Lfu,
    /// Belady's MIN, the offline-optimal baseline
    Belady,
    /// The `lru` crate (external implementation for cross-checking)
    LruCrate,
}

impl CachePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CachePolicy::Lru => "LRU",
            CachePolicy::Lfu => "LFU",
            CachePolicy::Belady => "Belady",
            CachePolicy::LruCrate => "lru-crate",
        }
    }

    /// Get all available policies
    pub fn all() -> Vec<CachePolicy> {
        vec![
            CachePolicy::Lru,
            CachePolicy::Lfu,
            CachePolicy::Belady,
            CachePolicy::LruCrate,
        ]
    }

    /// True for the offline baseline, which sees the whole trace up front
    pub fn is_offline(&self) -> bool {
        matches!(self, CachePolicy::Belady)
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the request trace comes from
#[derive(Debug, Clone)]
pub enum TraceSource {
    /// All trace files in a directory, sorted by name
    Dir(PathBuf),
    /// Trace files matching a glob pattern
    Pattern(String),
    /// An inline ad-hoc trace passed on the command line
    Inline(Vec<u64>),
}

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Trace input
    pub source: TraceSource,
    /// Cache capacity in number of entries
    pub capacity: usize,
    /// Policies to simulate
    pub policies: Vec<CachePolicy>,
}

/// Results of a simulation run
#[derive(Debug)]
pub struct SimulationResult {
    /// Statistics for each policy
    pub stats: HashMap<CachePolicy, PolicyStats>,
    /// Total number of requests processed
    pub total_requests: usize,
    /// Number of distinct keys in the trace
    pub unique_keys: usize,
    /// Duration of the whole simulation
    pub duration: Duration,
}

/// Statistics for a single policy
#[derive(Debug, Default, Clone)]
pub struct PolicyStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Wall-clock time for the replay in milliseconds
    pub wall_time_ms: u64,
    /// Per-call latency statistics for `look_update`
    pub latency: OpLatencyStats,
}

impl PolicyStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate hit rate as percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            (self.hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Latency statistics for the per-request operation
#[derive(Debug, Clone, Default)]
pub struct OpLatencyStats {
    /// Total time spent (nanoseconds)
    pub total_ns: u64,
    /// Number of operations
    pub count: u64,
    /// Minimum latency (nanoseconds)
    pub min_ns: u64,
    /// Maximum latency (nanoseconds)
    pub max_ns: u64,
    /// Latency percentiles
    pub percentiles: Option<LatencyPercentiles>,
}

impl OpLatencyStats {
    /// Calculate average latency in nanoseconds
    pub fn avg_ns(&self) -> f64 {
        if self.count > 0 {
            self.total_ns as f64 / self.count as f64
        } else {
            0.0
        }
    }

    /// Calculate throughput in operations per second
    pub fn ops_per_sec(&self) -> f64 {
        if self.total_ns > 0 {
            (self.count as f64 * 1_000_000_000.0) / self.total_ns as f64
        } else {
            0.0
        }
    }

    /// Get total duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.total_ns as f64 / 1_000_000_000.0
    }
}

/// Latency percentiles
#[derive(Debug, Clone, Default)]
pub struct LatencyPercentiles {
    pub p50_ns: u64,
    pub p90_ns: u64,
    pub p99_ns: u64,
    pub p999_ns: u64,
}

/// CSV export row for simulation results
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    pub policy: String,
    pub hits: usize,
    pub misses: usize,
    pub hit_rate: f64,
    /// Miss count of the offline optimum on the same trace, when simulated
    pub optimal_misses: Option<usize>,
    /// Misses beyond the offline optimum
    pub extra_misses: Option<usize>,
    /// Misses as a ratio of the offline optimum (1.0 = optimal)
    pub miss_ratio_vs_optimal: Option<f64>,
    pub wall_time_ms: u64,
    /// Total `look_update` calls
    pub total_ops: u64,
    /// Total time in cache operations, nanoseconds
    pub total_duration_ns: u64,
    pub ops_per_sec: f64,
    pub avg_latency_ns: f64,
    pub min_latency_ns: u64,
    pub max_latency_ns: u64,
    pub p50_latency_ns: u64,
    pub p99_latency_ns: u64,
}
