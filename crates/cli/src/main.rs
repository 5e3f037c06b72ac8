//! Writeback cache simulator CLI.
//!
//! This binary replays a Valgrind-lackey memory trace through the cache model. It performs:
//! 1. **Configuration:** Geometry from `-s/-b/-E/-d` flags, a JSON `--config` file, or both (flags win).
//! 2. **Replay:** Every data record of the trace is fed to the cache in order.
//! 3. **Reporting:** A one-line summary of hits, misses and evictions, or the counters as JSON.

use clap::Parser;
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use wbcache_core::sim::{runner, trace};
use wbcache_core::{Cache, CacheConfig, CacheStats};

#[derive(Parser, Debug)]
#[command(
    name = "wbcache",
    author,
    version,
    about = "Set-associative writeback cache simulator",
    long_about = "Replay a memory trace through an LRU writeback cache and report hits, misses and evictions.\n\nExamples:\n  wbcache -s 4 -E 1 -b 4 -t traces/yi.trace\n  wbcache --config l1.json -t traces/long.trace --json\n  RUST_LOG=trace wbcache -s 1 -E 2 -b 3 -t traces/dave.trace -v"
)]
struct Cli {
    /// Number of set-index bits (the cache has 2^s sets).
    #[arg(short = 's', long = "set-bits")]
    set_bits: Option<u32>,

    /// Number of block-offset bits (blocks hold 2^b bytes).
    #[arg(short = 'b', long = "block-bits")]
    block_bits: Option<u32>,

    /// Associativity (lines per set).
    #[arg(short = 'E', long = "associativity")]
    associativity: Option<usize>,

    /// Write-propagation depth.
    #[arg(short = 'd', long = "depth")]
    depth: Option<u32>,

    /// JSON cache configuration; command line flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Valgrind-lackey trace to replay.
    #[arg(short = 't', long = "trace")]
    trace: PathBuf,

    /// Print every trace record with its outcome.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Print the counters as JSON instead of the summary line.
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Builds the cache configuration: file (or defaults), then flag overrides.
    fn cache_config(&self) -> Result<CacheConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|e| format!("could not read config '{}': {e}", path.display()))?;
                serde_json::from_str(&text)
                    .map_err(|e| format!("invalid config '{}': {e}", path.display()))?
            }
            None => CacheConfig::default(),
        };
        if let Some(s) = self.set_bits {
            config.set_bits = s;
        }
        if let Some(b) = self.block_bits {
            config.block_bits = b;
        }
        if let Some(e) = self.associativity {
            config.associativity = e;
        }
        if let Some(d) = self.depth {
            config.depth = d;
        }
        Ok(config)
    }
}

/// Formats the counters the way the classic cache-lab driver does.
fn summary(stats: &CacheStats) -> String {
    format!(
        "hits:{} misses:{} dirty_evictions:{} clean_evictions:{}",
        stats.hits, stats.misses, stats.dirty_evictions, stats.clean_evictions
    )
}

/// Runs one simulation, writing all user-facing output to `out`.
fn run(cli: &Cli, out: &mut impl Write) -> Result<CacheStats, Box<dyn Error>> {
    let config = cli.cache_config()?;
    let mut cache = Cache::from_config(&config)?;
    let entries = trace::load_trace(&cli.trace)?;

    tracing::info!(
        s = config.set_bits,
        b = config.block_bits,
        e = config.associativity,
        d = config.depth,
        entries = entries.len(),
        "replaying trace"
    );

    let stats = if cli.verbose {
        for report in runner::replay(&mut cache, &entries) {
            writeln!(out, "{report}")?;
        }
        cache.stats()
    } else {
        runner::replay_quiet(&mut cache, &entries)
    };

    if cli.json {
        writeln!(out, "{}", serde_json::to_string(&stats)?)?;
    } else {
        writeln!(out, "{}", summary(&stats))?;
    }
    Ok(stats)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    if let Err(e) = run(&cli, &mut stdout.lock()) {
        eprintln!("wbcache: {e}");
        process::exit(1);
    }
}
