use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Number of phases a `Shift` trace cycles through
const SHIFT_PHASES: u64 = 8;

/// Access pattern of a generated trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracePattern {
    /// Skewed popularity: low keys receive most of the traffic
    Zipf,
    /// Every key equally likely
    Uniform,
    /// Cyclic sequential sweep over the key space (adversarial for LRU)
    Loop,
    /// A hot set that drifts across the key space over time
    Shift,
}

impl TracePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            TracePattern::Zipf => "zipf",
            TracePattern::Uniform => "uniform",
            TracePattern::Loop => "loop",
            TracePattern::Shift => "shift",
        }
    }
}

/// Parameters for generating a synthetic request trace
pub struct TraceConfig {
    /// Number of requests to generate
    pub requests: u64,
    /// Number of distinct keys (keys are `0..key_space`)
    pub key_space: u64,
    /// Access pattern
    pub pattern: TracePattern,
    /// Skew parameter for the `Zipf` pattern, in `[0, 1)`
    pub zipf_s: f64,
    /// RNG seed; the same seed always produces the same trace
    pub seed: u64,
    /// Output directory
    pub output_dir: PathBuf,
    /// Write buffer size in KB (default: 8192 = 8 MB)
    pub buffer_size_kb: u32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            requests: 100_000,
            key_space: 10_000,
            pattern: TracePattern::Zipf,
            zipf_s: 0.9,
            seed: 42,
            output_dir: PathBuf::from("traces"),
            buffer_size_kb: 8192, // 8 MB default buffer
        }
    }
}

/// Generator for synthetic request traces
pub struct TraceGenerator {
    config: TraceConfig,
}

impl TraceGenerator {
    /// Create a new generator with the given configuration
    pub fn new(config: TraceConfig) -> Self {
        Self { config }
    }

    /// Generate a trace file according to the configuration and return its path
    pub fn generate(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        // Ensure output directory exists
        fs::create_dir_all(&self.config.output_dir)?;

        let trace_path = self.config.output_dir.join(format!(
            "trace_{}_{}.log",
            self.config.pattern.as_str(),
            self.config.seed
        ));

        println!("Generating trace with the following parameters:");
        println!("  Requests: {}", self.config.requests);
        println!("  Key space: {}", self.config.key_space);
        println!("  Pattern: {}", self.config.pattern.as_str());
        if self.config.pattern == TracePattern::Zipf {
            println!("  Zipf skew: {}", self.config.zipf_s);
        }
        println!("  Seed: {}", self.config.seed);
        println!("  Output file: {}", trace_path.display());

        let file = File::create(&trace_path)?;
        let buffer_size = self.config.buffer_size_kb as usize * 1024;
        let mut writer = BufWriter::with_capacity(buffer_size, file);

        // Header comment, skipped by the trace reader
        writeln!(
            writer,
            "# pattern={} requests={} key_space={} seed={}",
            self.config.pattern.as_str(),
            self.config.requests,
            self.config.key_space,
            self.config.seed
        )?;

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        for i in 0..self.config.requests {
            let key = self.next_key(&mut rng, i);
            writeln!(writer, "{key}")?;
        }
        writer.flush()?;

        println!(
            "Trace generation complete: {} requests written",
            self.config.requests
        );
        Ok(trace_path)
    }

    /// Draw the key for request `i`
    fn next_key(&self, rng: &mut StdRng, i: u64) -> u64 {
        let key_space = self.config.key_space.max(1);

        match self.config.pattern {
            TracePattern::Uniform => rng.gen_range(0..key_space),
            TracePattern::Loop => i % key_space,
            TracePattern::Zipf => {
                // Inverse-power transform: key = K * u^(1/(1-s)) skews the
                // mass toward low keys as s approaches 1.
                let exponent = 1.0 / (1.0 - self.config.zipf_s.clamp(0.0, 0.99));
                let u: f64 = rng.gen();
                ((key_space as f64 * u.powf(exponent)) as u64).min(key_space - 1)
            }
            TracePattern::Shift => {
                // The hot set is one eighth of the key space and rotates as
                // the trace progresses; 80% of requests land in it.
                let phase_len = (self.config.requests / SHIFT_PHASES).max(1);
                let phase = (i / phase_len) % SHIFT_PHASES;
                let hot_size = (key_space / SHIFT_PHASES).max(1);
                let hot_base = phase * hot_size;

                if rng.gen::<f64>() < 0.8 {
                    (hot_base + rng.gen_range(0..hot_size)) % key_space
                } else {
                    rng.gen_range(0..key_space)
                }
            }
        }
    }
}
