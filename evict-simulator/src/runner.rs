//! Simulation runner that replays a trace against each selected policy.
//!
//! Online policies and the offline simulator are driven through the same
//! [`ReplacementPolicy`] trait object, so the replay loop is identical for
//! all of them. The `lru` crate joins through a small shim and serves as an
//! independent cross-check of this crate's LRU behaviour.

use crate::input::TraceReader;
use crate::models::{
    CachePolicy, LatencyPercentiles, OpLatencyStats, SimulationConfig, SimulationResult,
    TraceSource,
};
use crate::stats::SimulationStats;
use ahash::RandomState as AHashRandomState;
use evict_rs::config::{BeladyConfig, LfuCacheConfig, LruCacheConfig};
use evict_rs::{BeladySimulator, ConfigError, LfuCache, LruCache, ReplacementPolicy};
use std::collections::HashMap;
use std::time::Instant;

/// Maximum number of latency samples to keep per policy (reservoir sampling)
const MAX_LATENCY_SAMPLES: usize = 5000;

/// Print replay progress every this many requests
const PROGRESS_INTERVAL: usize = 1_000_000;

/// Adapter giving the external `lru` crate the same request contract as the
/// policies in this workspace.
struct LruCrateShim(lru::LruCache<u64, u64>);

impl ReplacementPolicy<u64, u64> for LruCrateShim {
    fn look_update(&mut self, key: u64, on_miss: &mut dyn FnMut(&u64) -> u64) -> bool {
        if self.0.get(&key).is_some() {
            true
        } else {
            let value = on_miss(&key);
            self.0.put(key, value);
            false
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn capacity(&self) -> usize {
        self.0.cap().get()
    }
}

/// Build the requested policy. The offline simulator consumes the full
/// trace at construction; online policies ignore it.
pub fn create_policy(
    policy: CachePolicy,
    capacity: usize,
    trace: &[u64],
) -> Result<Box<dyn ReplacementPolicy<u64, u64>>, ConfigError> {
    Ok(match policy {
        CachePolicy::Lru => Box::new(LruCache::init(LruCacheConfig::try_new(capacity)?, None)),
        CachePolicy::Lfu => Box::new(LfuCache::init(LfuCacheConfig::try_new(capacity)?, None)),
        CachePolicy::Belady => Box::new(BeladySimulator::init(
            BeladyConfig::try_new(capacity)?,
            trace.to_vec(),
            None,
        )),
        CachePolicy::LruCrate => {
            let config = LruCacheConfig::try_new(capacity)?;
            Box::new(LruCrateShim(lru::LruCache::new(config.capacity)))
        }
    })
}

/// Running latency aggregate for one policy's replay.
///
/// Totals and extrema are exact; percentiles come from a bounded reservoir
/// so memory stays flat on long traces.
struct OpLatencyTracker {
    total_ns: u64,
    count: u64,
    min_ns: u64,
    max_ns: u64,
    samples: Vec<u64>,
}

impl OpLatencyTracker {
    fn new() -> Self {
        Self {
            total_ns: 0,
            count: 0,
            min_ns: u64::MAX,
            max_ns: 0,
            samples: Vec::with_capacity(MAX_LATENCY_SAMPLES),
        }
    }

    fn record(&mut self, ns: u64) {
        self.total_ns += ns;
        self.count += 1;
        self.min_ns = self.min_ns.min(ns);
        self.max_ns = self.max_ns.max(ns);

        if self.samples.len() < MAX_LATENCY_SAMPLES {
            self.samples.push(ns);
        } else if rand::random::<usize>() % (self.count as usize) < MAX_LATENCY_SAMPLES {
            let idx = rand::random::<usize>() % MAX_LATENCY_SAMPLES;
            self.samples[idx] = ns;
        }
    }

    fn finalize(mut self) -> OpLatencyStats {
        let percentiles = if self.samples.is_empty() {
            None
        } else {
            self.samples.sort_unstable();
            let len = self.samples.len();
            Some(LatencyPercentiles {
                p50_ns: self.samples[(len * 50 / 100).min(len - 1)],
                p90_ns: self.samples[(len * 90 / 100).min(len - 1)],
                p99_ns: self.samples[(len * 99 / 100).min(len - 1)],
                p999_ns: self.samples[(len * 999 / 1000).min(len - 1)],
            })
        };

        OpLatencyStats {
            total_ns: self.total_ns,
            count: self.count,
            min_ns: if self.count == 0 { 0 } else { self.min_ns },
            max_ns: self.max_ns,
            percentiles,
        }
    }
}

/// Main simulation runner
pub struct SimulationRunner {
    config: SimulationConfig,
    stats: SimulationStats,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Self {
        let stats = SimulationStats::new(&config.policies);
        Self { config, stats }
    }

    /// Load the trace, replay it against every configured policy, and
    /// return the aggregated result.
    pub fn run(&mut self) -> Result<SimulationResult, String> {
        let trace = self.load_trace()?;
        if trace.is_empty() {
            return Err("No requests found in the trace source".to_string());
        }

        let (unique_keys, hottest) = scan_trace(&trace);

        println!("\n=== Dataset ===");
        println!("  Requests: {}", trace.len());
        println!("  Unique keys: {unique_keys}");
        if let Some((key, count)) = hottest {
            let share = count as f64 / trace.len() as f64 * 100.0;
            println!("  Hottest key: {key} ({share:.1}% of requests)");
        }
        println!("  Cache capacity: {}", self.config.capacity);

        let capacity = self.config.capacity;
        let policies = self.config.policies.clone();
        let total_start = Instant::now();

        for policy in policies {
            println!("\n--- {policy} ---");

            let build_start = Instant::now();
            let mut cache = create_policy(policy, capacity, &trace)
                .map_err(|e| format!("Failed to create {policy} cache: {e}"))?;
            if policy.is_offline() {
                println!("  Next-use precomputation: {:?}", build_start.elapsed());
            }

            let mut tracker = OpLatencyTracker::new();
            let mut on_miss = |k: &u64| *k;
            let replay_start = Instant::now();

            for (i, &key) in trace.iter().enumerate() {
                let op_start = Instant::now();
                let hit = cache.look_update(key, &mut on_miss);
                tracker.record(op_start.elapsed().as_nanos() as u64);

                if hit {
                    self.stats.record_hit(policy);
                } else {
                    self.stats.record_miss(policy);
                }

                if (i + 1) % PROGRESS_INTERVAL == 0 {
                    println!("  Processed {} requests...", i + 1);
                }
            }

            let elapsed = replay_start.elapsed();
            let req_per_sec = if elapsed.as_secs_f64() > 0.0 {
                trace.len() as f64 / elapsed.as_secs_f64()
            } else {
                0.0
            };
            println!(
                "  Replayed {} requests in {:?} ({:.0} req/s)",
                trace.len(),
                elapsed,
                req_per_sec
            );
            println!("  Resident entries at end: {}", cache.len());

            self.stats.record_time(policy, elapsed.as_millis() as u64);
            let latency = tracker.finalize();
            print_latency_line("look_update", &latency);
            self.stats.record_latency(policy, latency);
        }

        let duration = total_start.elapsed();
        self.stats.print_summary();
        self.stats.print_optimality_gap();

        Ok(self.stats.result(trace.len(), unique_keys, duration))
    }

    fn load_trace(&self) -> Result<Vec<u64>, String> {
        // The offline-optimal policy needs the whole trace up front, so
        // every source is materialized rather than streamed.
        match &self.config.source {
            TraceSource::Inline(keys) => Ok(keys.clone()),
            TraceSource::Dir(dir) => TraceReader::new(dir)
                .read_all()
                .map_err(|e| format!("Failed to read traces from {}: {e:?}", dir.display())),
            TraceSource::Pattern(pattern) => TraceReader::with_pattern(pattern.clone())
                .read_all()
                .map_err(|e| format!("Failed to read traces matching {pattern}: {e:?}")),
        }
    }
}

/// One pass over the trace for dataset statistics: distinct key count and
/// the most requested key.
fn scan_trace(trace: &[u64]) -> (usize, Option<(u64, u64)>) {
    let mut counts: HashMap<u64, u64, AHashRandomState> = HashMap::default();
    for &key in trace {
        *counts.entry(key).or_insert(0) += 1;
    }
    let hottest = counts
        .iter()
        .max_by_key(|&(_, count)| *count)
        .map(|(&key, &count)| (key, count));
    (counts.len(), hottest)
}

fn print_latency_line(label: &str, stats: &OpLatencyStats) {
    if stats.count == 0 {
        return;
    }
    let (p50, p99) = match &stats.percentiles {
        Some(p) => (p.p50_ns, p.p99_ns),
        None => (0, 0),
    };
    println!(
        "  {}: {} ops, avg {:.0} ns, min {} ns, max {} ns, p50 {} ns, p99 {} ns ({:.0} ops/s)",
        label,
        stats.count,
        stats.avg_ns(),
        stats.min_ns,
        stats.max_ns,
        p50,
        p99,
        stats.ops_per_sec()
    );
}
