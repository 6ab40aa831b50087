//! Compare every replacement policy on a skewed synthetic trace.
//!
//! Run with: cargo run -p evict-simulator --example policy_comparison [capacity] [requests]

use evict_simulator::generator::{TraceConfig, TraceGenerator, TracePattern};
use evict_simulator::models::{CachePolicy, SimulationConfig, TraceSource};
use evict_simulator::runner::SimulationRunner;
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let capacity = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(500);
    let requests = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000u64);

    // Fixed seed, so repeated runs replay the identical trace
    let trace_dir = PathBuf::from("example_traces");
    let config = TraceConfig {
        requests,
        key_space: 20_000,
        pattern: TracePattern::Zipf,
        zipf_s: 0.8,
        output_dir: trace_dir.clone(),
        ..Default::default()
    };
    let trace_path = TraceGenerator::new(config).generate()?;
    println!("Using trace {}", trace_path.display());

    let result = SimulationRunner::new(SimulationConfig {
        source: TraceSource::Dir(trace_dir),
        capacity,
        policies: CachePolicy::all(),
    })
    .run()?;

    let optimal = result.stats[&CachePolicy::Belady].misses;
    let lru = result.stats[&CachePolicy::Lru].misses;
    let lfu = result.stats[&CachePolicy::Lfu].misses;
    println!(
        "\nAgainst the clairvoyant minimum of {} misses, LRU paid {} extra and LFU {} extra.",
        optimal,
        lru.saturating_sub(optimal),
        lfu.saturating_sub(optimal)
    );

    Ok(())
}
