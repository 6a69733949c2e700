//! Ledger engine replay CLI
//!
//! Loads the address book and balance definitions, replays entry sets from
//! a CSV journal through the processing engine, then queries the requested
//! balances over a time window and writes them as CSV to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- journal.csv \
//!     --addresses addresses.yaml --definitions definitions.yaml \
//!     --start 2024-03-01T00:00:00Z --end 2024-03-31T23:59:59Z
//! cargo run -- journal.csv --addresses a.yaml --definitions d.yaml \
//!     --start ... --end ... --balance receivables --read-timeout-ms 2500
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (bad configuration, unreadable journal, failed balance query)

use std::process;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use ledger_engine::cli::{self, CliArgs};
use ledger_engine::config;
use ledger_engine::core::{LedgerService, LedgerStore};
use ledger_engine::io::{write_balances_csv, BalanceReport, JournalReader};
use ledger_engine::store::{MemoryBackend, PartitionedStore};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(args.worker_threads())
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: Failed to create tokio runtime: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(args)) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<(), String> {
    // Resolve configuration up front; queries never touch it again.
    let book = config::load_address_book(&args.addresses).map_err(|e| e.to_string())?;
    let raw = config::load_raw_definitions(&args.definitions).map_err(|e| e.to_string())?;
    let definitions = config::resolve(&book, raw).map_err(|e| e.to_string())?;

    let store: Arc<dyn LedgerStore> = Arc::new(PartitionedStore::new(MemoryBackend::new()));
    let service = LedgerService::new(store, definitions, args.to_aggregator_config());

    // Replay the journal. Rejected sets are logged and skipped; the run
    // only aborts on balance query failures.
    let file = tokio::fs::File::open(&args.journal)
        .await
        .map_err(|e| format!("Failed to open journal '{}': {}", args.journal.display(), e))?;
    let mut reader = JournalReader::new(file.compat());
    for set in reader.read_sets(&book).await {
        if let Err(e) = service.process_entry_set(set.input).await {
            warn!(set = %set.id, error = %e, "entry set rejected");
        }
    }

    let start = parse_rfc3339(&args.start)?;
    let end = parse_rfc3339(&args.end)?;

    let names = if args.balances.is_empty() {
        service.definition_names()
    } else {
        args.balances.clone()
    };

    let mut reports = Vec::with_capacity(names.len());
    for name in names {
        let balance = service
            .balance(&name, start, end)
            .await
            .map_err(|e| e.to_string())?;
        reports.push(BalanceReport {
            name,
            start,
            end,
            balance,
        });
    }

    let mut output = std::io::stdout();
    write_balances_csv(&reports, &mut output)
}

fn parse_rfc3339(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Invalid RFC 3339 timestamp '{}': {}", raw, e))
}
