// crates/talent-bench-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and validation in the CLI
// entry point.
// Purpose: Ensure invalid identifiers and degenerate overrides are rejected.
// Dependencies: talent-bench-cli main helpers
// ============================================================================

//! ## Overview
//! Validates benchmark identifier parsing, engine configuration overrides,
//! and the end-to-end run against a temporary database.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use clap::Parser;
use talent_bench_core::EngineConfig;

use super::Cli;
use super::CliError;
use super::engine_config;
use super::parse_benchmark;
use super::run;

// ============================================================================
// SECTION: Argument Parsing
// ============================================================================

#[test]
fn required_arguments_parse() {
    let cli =
        Cli::try_parse_from(["talent-bench", "--database", "bench.db", "--benchmark", "4"])
            .unwrap();
    assert_eq!(cli.benchmark, 4);
    assert!(cli.workers.is_none());
    assert!(cli.page_size.is_none());
    assert!(!cli.verbose);
}

#[test]
fn missing_database_is_a_parse_error() {
    let result = Cli::try_parse_from(["talent-bench", "--benchmark", "4"]);
    assert!(result.is_err());
}

#[test]
fn zero_benchmark_id_is_rejected() {
    let result = parse_benchmark(0);
    assert!(matches!(result, Err(CliError::InvalidArgument(_))));
}

#[test]
fn positive_benchmark_id_is_accepted() {
    let benchmark = parse_benchmark(12).unwrap();
    assert_eq!(benchmark.get(), 12);
}

// ============================================================================
// SECTION: Engine Configuration
// ============================================================================

#[test]
fn overrides_replace_the_defaults() {
    let config = engine_config(Some(2), Some(500)).unwrap();
    assert_eq!(config.worker_threads, 2);
    assert_eq!(config.page_size, 500);
}

#[test]
fn absent_overrides_keep_the_defaults() {
    let config = engine_config(None, None).unwrap();
    let defaults = EngineConfig::default();
    assert_eq!(config.worker_threads, defaults.worker_threads);
    assert_eq!(config.page_size, defaults.page_size);
}

#[test]
fn zero_workers_is_rejected() {
    assert!(matches!(engine_config(Some(0), None), Err(CliError::InvalidArgument(_))));
}

#[test]
fn zero_page_size_is_rejected() {
    assert!(matches!(engine_config(None, Some(0)), Err(CliError::InvalidArgument(_))));
}

// ============================================================================
// SECTION: End-To-End Run
// ============================================================================

#[test]
fn run_against_an_empty_database_produces_no_profiles() {
    let temp = tempfile::TempDir::new().unwrap();
    let database = temp.path().join("bench.db");
    let cli = Cli::try_parse_from([
        "talent-bench",
        "--database",
        database.to_str().unwrap(),
        "--benchmark",
        "1",
    ])
    .unwrap();

    let outcome = run(&cli);
    assert!(outcome.is_ok());
    assert!(database.exists());
}
