use crate::core::aggregator::AggregatorConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Replay a ledger journal and query balances
#[derive(Parser, Debug)]
#[command(name = "ledger-engine")]
#[command(about = "Replay entry sets from a CSV journal and query balances", long_about = None)]
pub struct CliArgs {
    /// Input CSV journal containing entry set rows
    #[arg(value_name = "JOURNAL", help = "Path to the input CSV journal")]
    pub journal: PathBuf,

    /// Address book configuration
    #[arg(
        long = "addresses",
        value_name = "FILE",
        help = "YAML address book mapping reference keys to ledger addresses"
    )]
    pub addresses: PathBuf,

    /// Balance definition configuration
    #[arg(
        long = "definitions",
        value_name = "FILE",
        help = "YAML balance definitions (time axis + address references)"
    )]
    pub definitions: PathBuf,

    /// Balance definitions to query (repeatable; default: all)
    #[arg(
        long = "balance",
        value_name = "NAME",
        help = "Balance definition name to query; may be given multiple times"
    )]
    pub balances: Vec<String>,

    /// Window start, RFC 3339
    #[arg(long = "start", value_name = "TIMESTAMP", help = "Query window start (RFC 3339)")]
    pub start: String,

    /// Window end, RFC 3339
    #[arg(long = "end", value_name = "TIMESTAMP", help = "Query window end (RFC 3339)")]
    pub end: String,

    /// Per-address store read deadline in milliseconds
    #[arg(
        long = "read-timeout-ms",
        value_name = "MILLIS",
        default_value_t = 10_000,
        help = "Deadline for each per-address store read (default: 10000)"
    )]
    pub read_timeout_ms: u64,

    /// Number of runtime worker threads
    #[arg(
        long = "workers",
        value_name = "COUNT",
        help = "Tokio worker threads (default: CPU cores)"
    )]
    pub workers: Option<usize>,
}

impl CliArgs {
    /// Aggregator tuning derived from the CLI arguments.
    pub fn to_aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            read_timeout: Duration::from_millis(self.read_timeout_ms),
        }
    }

    /// Worker-thread count for the runtime, defaulting to the CPU count.
    pub fn worker_threads(&self) -> usize {
        match self.workers {
            Some(workers) if workers > 0 => workers,
            Some(_) => {
                eprintln!(
                    "Warning: Invalid workers (0), using default ({})",
                    num_cpus::get()
                );
                num_cpus::get()
            }
            None => num_cpus::get(),
        }
    }
}
