//! Cache hierarchy simulator CLI.
//!
//! This binary replays an address trace against a two-level inclusive cache.
//! It performs:
//! 1. **Configuration:** Built-in defaults, optionally overlaid by a JSON file, then by flags.
//! 2. **Replay:** Parses the trace and feeds every access to the hierarchy.
//! 3. **Reporting:** Prints `L1miss=… L2miss=… AccTimeAvg=…`, a detailed table, or JSON.

use std::path::{Path, PathBuf};
use std::{fs, io, process};

use cachesim_core::common::error::{ConfigError, SimError};
use cachesim_core::sim::{load_trace, replay};
use cachesim_core::{CacheHierarchy, HierarchyConfig, HierarchyStats};
use clap::Parser;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Two-level inclusive cache hierarchy simulator",
    long_about = "Replay a memory trace against an inclusive L1/L2 cache and report miss rates and AMAT.\n\nSizes, block size and associativities are base-2 logarithms.\n\nExamples:\n  cachesim trace.in --mem-cyc 100 --bsize 5 --wr-alloc 1 --l1-size 10 --l1-assoc 1 --l1-cyc 1 --l2-size 12 --l2-assoc 2 --l2-cyc 5\n  cachesim trace.in --config cache.json"
)]
struct Cli {
    /// Trace file: one `r|w <hex address>` per line.
    trace: PathBuf,

    /// JSON hierarchy configuration; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Main memory latency in cycles.
    #[arg(long = "mem-cyc")]
    mem_cyc: Option<u64>,

    /// log2 of the block size in bytes.
    #[arg(long)]
    bsize: Option<u32>,

    /// Write-allocate (1) or write-around (0).
    #[arg(long = "wr-alloc", value_parser = clap::value_parser!(u8).range(0..=1))]
    wr_alloc: Option<u8>,

    /// log2 of the L1 size in bytes.
    #[arg(long = "l1-size")]
    l1_size: Option<u32>,

    /// log2 of the L1 associativity.
    #[arg(long = "l1-assoc")]
    l1_assoc: Option<u32>,

    /// L1 access latency in cycles.
    #[arg(long = "l1-cyc")]
    l1_cyc: Option<u64>,

    /// log2 of the L2 size in bytes.
    #[arg(long = "l2-size")]
    l2_size: Option<u32>,

    /// log2 of the L2 associativity.
    #[arg(long = "l2-assoc")]
    l2_assoc: Option<u32>,

    /// L2 access latency in cycles.
    #[arg(long = "l2-cyc")]
    l2_cyc: Option<u64>,

    /// Print a per-level breakdown instead of the summary line.
    #[arg(long, conflicts_with = "json")]
    detailed: bool,

    /// Print statistics as JSON.
    #[arg(long)]
    json: bool,

    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(short, long)]
    verbose: bool,
}

/// Errors surfaced by the driver.
#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Output(#[from] io::Error),

    #[error("failed to encode statistics: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Sim(SimError::Config(err))
    }
}

impl Cli {
    /// Builds the hierarchy configuration: defaults, then `--config`, then flags.
    fn hierarchy_config(&self) -> Result<HierarchyConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => HierarchyConfig::default(),
        };

        if let Some(v) = self.mem_cyc {
            config.memory_latency = v;
        }
        if let Some(v) = self.bsize {
            config.block_size_log2 = v;
        }
        if let Some(v) = self.wr_alloc {
            config.write_allocate = v != 0;
        }
        if let Some(v) = self.l1_size {
            config.l1.size_log2 = v;
        }
        if let Some(v) = self.l1_assoc {
            config.l1.ways_log2 = v;
        }
        if let Some(v) = self.l1_cyc {
            config.l1.latency = v;
        }
        if let Some(v) = self.l2_size {
            config.l2.size_log2 = v;
        }
        if let Some(v) = self.l2_assoc {
            config.l2.ways_log2 = v;
        }
        if let Some(v) = self.l2_cyc {
            config.l2.latency = v;
        }

        config.validate()?;
        Ok(config)
    }
}

fn read_config(path: &Path) -> Result<HierarchyConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(HierarchyConfig::from_json(&text)?)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parses the trace, replays it and returns the final statistics.
fn simulate(cli: &Cli) -> Result<HierarchyStats, CliError> {
    let config = cli.hierarchy_config()?;
    let ops = load_trace(&cli.trace).map_err(SimError::from)?;
    debug!(path = %cli.trace.display(), ops = ops.len(), "trace loaded");

    let mut hierarchy = CacheHierarchy::new(config)?;
    Ok(replay(&mut hierarchy, &ops)?)
}

fn report(cli: &Cli, stats: &HierarchyStats) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, stats)?;
        io::Write::write_all(&mut out, b"\n")?;
    } else if cli.detailed {
        stats.write_detailed(&mut out)?;
    } else {
        io::Write::write_fmt(&mut out, format_args!("{stats}\n"))?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = simulate(&cli).and_then(|stats| report(&cli, &stats));
    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
