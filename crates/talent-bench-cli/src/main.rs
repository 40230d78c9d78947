// crates/talent-bench-cli/src/main.rs
// ============================================================================
// Module: Talent Bench CLI Entry Point
// Description: Command-line driver for benchmark profile recomputation.
// Purpose: Run the profiling engine against a SQLite database and report the
// number of profiles produced.
// Dependencies: clap, talent-bench-core, talent-bench-store-sqlite,
// thiserror, tracing, tracing-subscriber.
// ============================================================================

//! ## Overview
//! The Talent Bench CLI opens a `SQLite` assessment database, runs the full
//! recompute pipeline for one benchmark, and replaces that benchmark's stored
//! profile set. Diagnostics go to stderr via `tracing`; the only stdout output
//! is the final summary line.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Parser;
use talent_bench_core::BenchmarkId;
use talent_bench_core::Engine;
use talent_bench_core::EngineConfig;
use talent_bench_core::EngineError;
use talent_bench_store_sqlite::SqliteBenchmarkStore;
use talent_bench_store_sqlite::SqliteStoreConfig;
use talent_bench_store_sqlite::SqliteStoreError;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "talent-bench", version, about = "Recompute top performer profiles")]
struct Cli {
    /// Path to the `SQLite` assessment database.
    #[arg(long = "database", value_name = "PATH")]
    database: PathBuf,
    /// Benchmark identifier to recompute (>= 1).
    #[arg(long = "benchmark", value_name = "ID")]
    benchmark: u64,
    /// Worker thread count (defaults to the engine's built-in value).
    #[arg(long = "workers", value_name = "N")]
    workers: Option<usize>,
    /// Streaming page size (defaults to the engine's built-in value).
    #[arg(long = "page-size", value_name = "N")]
    page_size: Option<usize>,
    /// Enable debug-level diagnostics on stderr.
    #[arg(long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,
}

/// CLI errors.
#[derive(Debug, Error)]
enum CliError {
    /// An argument failed domain validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The store could not be opened.
    #[error(transparent)]
    Store(#[from] SqliteStoreError),
    /// The engine run failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Writing the summary failed.
    #[error("output error: {0}")]
    Output(String),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            let _ = write_stderr_line(&format!("talent-bench: {error}"));
            ExitCode::FAILURE
        }
    }
}

/// Runs the recompute pipeline described by the parsed arguments.
fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let benchmark = parse_benchmark(cli.benchmark)?;
    let config = engine_config(cli.workers, cli.page_size)?;

    let store_config = SqliteStoreConfig::new(&cli.database);
    let store = Arc::new(SqliteBenchmarkStore::open(&store_config)?);
    tracing::debug!(database = %cli.database.display(), "assessment store opened");

    let engine = Engine::with_config(Arc::clone(&store), Arc::clone(&store), config);
    let produced = engine.run(benchmark)?;

    write_stdout_line(&format!("benchmark {benchmark}: {produced} profiles written"))
        .map_err(|error| CliError::Output(error.to_string()))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Argument Validation
// ============================================================================

/// Validates the raw benchmark identifier.
fn parse_benchmark(raw: u64) -> Result<BenchmarkId, CliError> {
    BenchmarkId::from_raw(raw)
        .ok_or_else(|| CliError::InvalidArgument("benchmark id must be >= 1".to_string()))
}

/// Builds the engine configuration from optional overrides.
fn engine_config(
    workers: Option<usize>,
    page_size: Option<usize>,
) -> Result<EngineConfig, CliError> {
    let mut config = EngineConfig::default();
    if let Some(workers) = workers {
        if workers == 0 {
            return Err(CliError::InvalidArgument("workers must be >= 1".to_string()));
        }
        config.worker_threads = workers;
    }
    if let Some(page_size) = page_size {
        if page_size == 0 {
            return Err(CliError::InvalidArgument("page size must be >= 1".to_string()));
        }
        config.page_size = page_size;
    }
    Ok(config)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Installs the stderr tracing subscriber, honoring `RUST_LOG` overrides.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Writes one line to stdout.
fn write_stdout_line(line: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}")
}

/// Writes one line to stderr.
fn write_stderr_line(line: &str) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{line}")
}
