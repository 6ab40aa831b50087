//! Standalone trace generator.
//!
//! Same functionality as `evict-simulator generate`, packaged as its own
//! binary for scripted trace production.

use clap::Parser;
use evict_simulator::generator::{TraceConfig, TraceGenerator, TracePattern};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "trace-generator",
    about = "Generate synthetic request traces for the policy simulator",
    version
)]
struct Args {
    /// Number of requests
    #[arg(short, long, default_value_t = 100_000)]
    requests: u64,

    /// Number of distinct keys
    #[arg(short, long, default_value_t = 10_000)]
    key_space: u64,

    /// Access pattern: zipf, uniform, loop, shift
    #[arg(short, long, default_value = "zipf")]
    pattern: String,

    /// Skew parameter for the zipf pattern, in [0, 1)
    #[arg(short, long, default_value_t = 0.9)]
    zipf_s: f64,

    /// RNG seed; the same seed reproduces the same trace
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Output directory
    #[arg(short, long, default_value = "traces")]
    output: PathBuf,

    /// Write buffer size in KB
    #[arg(short, long, default_value_t = 8192)]
    buffer_size_kb: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let pattern = match args.pattern.to_lowercase().as_str() {
        "zipf" => TracePattern::Zipf,
        "uniform" => TracePattern::Uniform,
        "loop" => TracePattern::Loop,
        "shift" => TracePattern::Shift,
        other => {
            println!("Warning: Unknown pattern '{other}', using zipf");
            TracePattern::Zipf
        }
    };

    let config = TraceConfig {
        requests: args.requests,
        key_space: args.key_space,
        pattern,
        zipf_s: args.zipf_s,
        seed: args.seed,
        output_dir: args.output,
        buffer_size_kb: args.buffer_size_kb,
    };

    TraceGenerator::new(config).generate()?;
    Ok(())
}
