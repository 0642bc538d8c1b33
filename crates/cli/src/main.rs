//! Diagnostic CLI: fetches every catalog entry once and reports
//! per-entry success or failure. Exits non-zero if any entry failed.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use futures::StreamExt;
use statuswatch_catalog::{Catalog, Entry};
use statuswatch_fetcher::{FetchContext, FetcherRegistry};
use statuswatch_transport::FetchOptions;
use tracing::info;

/// CLI-specific error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Catalog validation failure; fatal at startup.
    #[error(transparent)]
    Catalog(#[from] statuswatch_catalog::Error),

    /// HTTP client construction failure.
    #[error(transparent)]
    Transport(#[from] statuswatch_transport::Error),
}

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// How many entries to fetch concurrently
    #[arg(long, default_value_t = 4, env = "STATUSWATCH_CONCURRENCY")]
    concurrency: usize,

    /// Per-attempt timeout in seconds
    #[arg(long, default_value_t = 30, env = "STATUSWATCH_TIMEOUT_SECS")]
    timeout_secs: u64,

    /// Only check the given entry ids (repeatable)
    #[arg(long = "only")]
    only: Vec<String>,
}

async fn check_entry(entry: &Entry, registry: &FetcherRegistry, ctx: &FetchContext) -> bool {
    let Some(fetcher) = registry.find_for(entry) else {
        println!("FAIL {}: no capable fetcher", entry.id);
        return false;
    };

    match fetcher.fetch(entry, ctx).await {
        Ok(result) => {
            println!(
                "ok {} status={} severity={}",
                entry.id, result.status, result.severity
            );
            true
        }
        Err(err) => {
            println!("FAIL {}: {err}", entry.id);
            false
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Error> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let catalog = Catalog::load()?;
    let registry = FetcherRegistry::standard();
    let ctx = FetchContext::new(
        FetchOptions::default().with_timeout(Duration::from_secs(args.timeout_secs)),
    )?;

    let entries: Vec<&Entry> = catalog
        .entries()
        .iter()
        .filter(|entry| args.only.is_empty() || args.only.iter().any(|id| *id == entry.id))
        .collect();

    let total = entries.len();
    info!(total, "checking catalog entries");
    let results: Vec<bool> = futures::stream::iter(
        entries
            .into_iter()
            .map(|entry| check_entry(entry, &registry, &ctx)),
    )
    .buffer_unordered(args.concurrency.max(1))
    .collect()
    .await;

    let failures = results.iter().filter(|ok| !**ok).count();
    if failures > 0 {
        eprintln!("{failures} of {total} entries failed");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
