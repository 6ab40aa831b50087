use clap::{Parser, Subcommand};
use evict_simulator::generator::{TraceConfig, TraceGenerator, TracePattern};
use evict_simulator::models::{CachePolicy, SimulationConfig, TraceSource};
use evict_simulator::runner::SimulationRunner;
use evict_simulator::stats;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "evict-simulator",
    about = "Replay request traces against cache replacement policies and compare them with the offline optimum",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory containing trace files (no-subcommand mode)
    #[arg(short, long, default_value = "test_data")]
    input_dir: PathBuf,

    /// Cache capacity in entries (no-subcommand mode)
    #[arg(short, long, default_value_t = 1000)]
    capacity: usize,

    /// Comma-separated policies to simulate (no-subcommand mode)
    #[arg(short, long, value_delimiter = ',')]
    policies: Option<Vec<String>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a trace against the selected policies
    Simulate {
        /// Directory containing trace files (.log, .csv, .txt)
        #[arg(short, long)]
        input_dir: Option<PathBuf>,

        /// Glob pattern selecting trace files, e.g. "traces/trace_*.log"
        #[arg(short, long)]
        traces: Option<String>,

        /// Comma-separated keys to replay inline, e.g. "1,2,1,3,1,2"
        #[arg(short, long)]
        keys: Option<String>,

        /// Cache capacity in entries
        #[arg(short, long, default_value_t = 1000)]
        capacity: usize,

        /// Comma-separated policies: lru, lfu, belady, lru-crate
        #[arg(short, long, value_delimiter = ',')]
        policies: Option<Vec<String>>,

        /// Write per-policy results to this CSV file
        #[arg(short, long)]
        output_csv: Option<PathBuf>,
    },
    /// Generate a synthetic trace file
    Generate {
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
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.command {
        Some(Commands::Simulate {
            input_dir,
            traces,
            keys,
            capacity,
            policies,
            output_csv,
        }) => {
            let policies = parse_policies(policies);
            // Source precedence: inline keys, then glob pattern, then directory
            let source = if let Some(spec) = keys {
                TraceSource::Inline(parse_inline_keys(&spec)?)
            } else if let Some(pattern) = traces {
                TraceSource::Pattern(pattern)
            } else {
                let dir = input_dir.unwrap_or_else(|| PathBuf::from("test_data"));
                ensure_test_data(&dir)?;
                TraceSource::Dir(dir)
            };
            run_simulation(source, capacity, policies, output_csv)
        }
        Some(Commands::Generate {
            requests,
            key_space,
            pattern,
            zipf_s,
            seed,
            output,
        }) => {
            let config = TraceConfig {
                requests,
                key_space,
                pattern: parse_pattern(&pattern),
                zipf_s,
                seed,
                output_dir: output,
                ..Default::default()
            };
            TraceGenerator::new(config).generate()?;
            Ok(())
        }
        None => {
            // Invocation without a subcommand behaves like `simulate`
            let policies = parse_policies(args.policies);
            ensure_test_data(&args.input_dir)?;
            run_simulation(
                TraceSource::Dir(args.input_dir),
                args.capacity,
                policies,
                None,
            )
        }
    }
}

fn run_simulation(
    source: TraceSource,
    capacity: usize,
    policies: Vec<CachePolicy>,
    output_csv: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = SimulationConfig {
        source,
        capacity,
        policies,
    };
    let result = SimulationRunner::new(config).run()?;

    println!(
        "\nSimulated {} policies over {} requests ({} unique keys) in {:?}",
        result.stats.len(),
        result.total_requests,
        result.unique_keys,
        result.duration
    );

    if let Some(path) = output_csv {
        stats::export_csv(&result, &path)?;
    }
    Ok(())
}

/// Resolve policy names, warning about unknown ones. No selection (or no
/// valid selection) means every policy runs.
fn parse_policies(names: Option<Vec<String>>) -> Vec<CachePolicy> {
    let Some(names) = names else {
        return CachePolicy::all();
    };

    let mut policies = Vec::new();
    for name in &names {
        match name.trim().to_lowercase().as_str() {
            "lru" => policies.push(CachePolicy::Lru),
            "lfu" => policies.push(CachePolicy::Lfu),
            "belady" | "min" | "opt" => policies.push(CachePolicy::Belady),
            "lru-crate" | "lru_crate" => policies.push(CachePolicy::LruCrate),
            other => println!("Warning: Unknown policy '{other}', skipping"),
        }
    }

    if policies.is_empty() {
        println!("No valid policies selected, simulating all of them");
        return CachePolicy::all();
    }
    policies
}

fn parse_pattern(name: &str) -> TracePattern {
    match name.to_lowercase().as_str() {
        "zipf" => TracePattern::Zipf,
        "uniform" => TracePattern::Uniform,
        "loop" => TracePattern::Loop,
        "shift" => TracePattern::Shift,
        other => {
            println!("Warning: Unknown pattern '{other}', using zipf");
            TracePattern::Zipf
        }
    }
}

fn parse_inline_keys(spec: &str) -> Result<Vec<u64>, String> {
    spec.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .map_err(|_| format!("Invalid key '{s}' in --keys"))
        })
        .collect()
}

/// Generate a default trace when the input directory does not exist yet,
/// so a bare run works out of the box.
fn ensure_test_data(input_dir: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    if input_dir.exists() {
        return Ok(());
    }

    println!(
        "No trace data found in {}, generating a default trace...",
        input_dir.display()
    );
    let config = TraceConfig {
        output_dir: input_dir.clone(),
        ..Default::default()
    };
    TraceGenerator::new(config).generate()?;
    Ok(())
}
