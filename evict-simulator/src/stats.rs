//! Aggregation and reporting of per-policy simulation results.

use crate::models::{CachePolicy, CsvResultRow, OpLatencyStats, PolicyStats, SimulationResult};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Collects hit/miss counts, timings, and latency aggregates per policy
pub struct SimulationStats {
    stats: HashMap<CachePolicy, PolicyStats>,
    /// Policies in the order they were configured, for stable reporting
    policies: Vec<CachePolicy>,
}

impl SimulationStats {
    pub fn new(policies: &[CachePolicy]) -> Self {
        let mut stats = HashMap::new();
        for &policy in policies {
            stats.insert(policy, PolicyStats::new());
        }
        Self {
            stats,
            policies: policies.to_vec(),
        }
    }

    pub fn record_hit(&mut self, policy: CachePolicy) {
        self.stats.entry(policy).or_insert_with(PolicyStats::new).hits += 1;
    }

    pub fn record_miss(&mut self, policy: CachePolicy) {
        self.stats
            .entry(policy)
            .or_insert_with(PolicyStats::new)
            .misses += 1;
    }

    pub fn record_time(&mut self, policy: CachePolicy, wall_time_ms: u64) {
        self.stats
            .entry(policy)
            .or_insert_with(PolicyStats::new)
            .wall_time_ms = wall_time_ms;
    }

    pub fn record_latency(&mut self, policy: CachePolicy, latency: OpLatencyStats) {
        self.stats
            .entry(policy)
            .or_insert_with(PolicyStats::new)
            .latency = latency;
    }

    /// Snapshot the collected stats into a result value
    pub fn result(
        &self,
        total_requests: usize,
        unique_keys: usize,
        duration: Duration,
    ) -> SimulationResult {
        SimulationResult {
            stats: self.stats.clone(),
            total_requests,
            unique_keys,
            duration,
        }
    }

    /// Print one aligned row per policy
    pub fn print_summary(&self) {
        println!("\n=== Simulation Summary ===");
        println!(
            "{:<12} {:>10} {:>10} {:>9} {:>13} {:>9} {:>9} {:>9}",
            "Policy", "Hits", "Misses", "HitRate", "Ops/sec", "Avg ns", "p50 ns", "p99 ns"
        );

        for &policy in &self.policies {
            let Some(s) = self.stats.get(&policy) else {
                continue;
            };
            let (p50, p99) = match &s.latency.percentiles {
                Some(p) => (p.p50_ns, p.p99_ns),
                None => (0, 0),
            };
            println!(
                "{:<12} {:>10} {:>10} {:>8.2}% {:>13.0} {:>9.0} {:>9} {:>9}",
                policy.as_str(),
                s.hits,
                s.misses,
                s.hit_rate(),
                s.latency.ops_per_sec(),
                s.latency.avg_ns(),
                p50,
                p99
            );
        }
    }

    /// Print each policy's miss count against the clairvoyant minimum.
    /// Prints nothing unless the offline policy was part of the run.
    pub fn print_optimality_gap(&self) {
        let Some(optimal) = self.stats.get(&CachePolicy::Belady).map(|s| s.misses) else {
            return;
        };

        println!("\n=== Optimality Gap ===");
        println!("┌─────────────┬──────────┬──────────┬─────────┬────────┐");
        println!(
            "│ {:<11} │ {:>8} │ {:>8} │ {:>7} │ {:>6} │",
            "Policy", "Misses", "Optimal", "Extra", "Ratio"
        );
        println!("├─────────────┼──────────┼──────────┼─────────┼────────┤");

        for &policy in &self.policies {
            let Some(s) = self.stats.get(&policy) else {
                continue;
            };
            let extra = s.misses.saturating_sub(optimal);
            let ratio = if optimal > 0 {
                format!("{:.2}x", s.misses as f64 / optimal as f64)
            } else {
                "-".to_string()
            };
            println!(
                "│ {:<11} │ {:>8} │ {:>8} │ {:>7} │ {:>6} │",
                policy.as_str(),
                s.misses,
                optimal,
                extra,
                ratio
            );
        }

        println!("└─────────────┴──────────┴──────────┴─────────┴────────┘");
        println!("Extra = misses beyond the clairvoyant minimum for this trace.");
    }
}

/// Flatten a result into one CSV row per policy, in policy order.
/// The optimality columns are filled only when the offline policy ran.
pub fn csv_rows(result: &SimulationResult) -> Vec<CsvResultRow> {
    let optimal = result
        .stats
        .get(&CachePolicy::Belady)
        .map(|s| s.misses)
        .filter(|&m| m > 0);

    let mut policies: Vec<CachePolicy> = result.stats.keys().copied().collect();
    policies.sort();

    policies
        .iter()
        .map(|&policy| {
            let s = &result.stats[&policy];
            let (p50, p99) = match &s.latency.percentiles {
                Some(p) => (p.p50_ns, p.p99_ns),
                None => (0, 0),
            };
            CsvResultRow {
                policy: policy.as_str().to_string(),
                hits: s.hits,
                misses: s.misses,
                hit_rate: s.hit_rate(),
                optimal_misses: optimal,
                extra_misses: optimal.map(|o| s.misses.saturating_sub(o)),
                miss_ratio_vs_optimal: optimal.map(|o| s.misses as f64 / o as f64),
                wall_time_ms: s.wall_time_ms,
                total_ops: s.latency.count,
                total_duration_ns: s.latency.total_ns,
                ops_per_sec: s.latency.ops_per_sec(),
                avg_latency_ns: s.latency.avg_ns(),
                min_latency_ns: s.latency.min_ns,
                max_latency_ns: s.latency.max_ns,
                p50_latency_ns: p50,
                p99_latency_ns: p99,
            }
        })
        .collect()
}

/// Export per-policy results to a CSV file
pub fn export_csv(result: &SimulationResult, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in csv_rows(result) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("Results exported to {}", path.display());
    Ok(())
}
