// crates/talent-bench-store-sqlite/tests/store_unit.rs
// ============================================================================
// Module: SQLite Store Unit Tests
// Description: SQL-level checks for the four access operations and the
// transactional profile replace.
// Purpose: Validate NULL handling, pagination, and replace semantics.
// ============================================================================

//! `SQLite` store tests against temporary database files.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use std::sync::Arc;

use talent_bench_core::AssessmentRecord;
use talent_bench_core::Attribute;
use talent_bench_core::BenchmarkId;
use talent_bench_core::CoreCompetency;
use talent_bench_core::DataSource;
use talent_bench_core::Engine;
use talent_bench_core::Outcome;
use talent_bench_core::ProfileStore;
use talent_bench_store_sqlite::SqliteBenchmarkStore;
use talent_bench_store_sqlite::SqliteStoreConfig;
use tempfile::TempDir;

// ============================================================================
// SECTION: Test Fixtures
// ============================================================================

fn benchmark() -> BenchmarkId {
    BenchmarkId::from_raw(7).unwrap()
}

fn effectiveness() -> Attribute {
    Attribute::Outcome(Outcome::Effectiveness)
}

/// A record with one effectiveness score and nothing else answered.
fn outcome_record(score: Option<f64>) -> AssessmentRecord {
    let mut record = AssessmentRecord::default();
    record.outcome_scores[Outcome::Effectiveness.index()] = score;
    record
}

/// A fully answered record whose scores vary deterministically by seed.
fn full_record(seed: u32) -> AssessmentRecord {
    let mut record = AssessmentRecord::default();
    let base = f64::from(seed % 4);
    for slot in &mut record.macro_scores {
        *slot = Some(5.0 + base);
    }
    for slot in &mut record.core_scores {
        *slot = Some(3.0 + base);
    }
    for slot in &mut record.talent_scores {
        *slot = Some(2.0 + base);
    }
    for slot in &mut record.outcome_scores {
        *slot = Some(6.0);
    }
    record
}

// ============================================================================
// SECTION: Data Source Semantics
// ============================================================================

#[test]
fn count_excludes_null_scores() {
    let store = SqliteBenchmarkStore::in_memory().unwrap();
    let records = vec![
        outcome_record(Some(1.0)),
        outcome_record(None),
        outcome_record(Some(3.0)),
        outcome_record(None),
    ];
    store.insert_assessments(benchmark(), &records).unwrap();

    assert_eq!(store.count_non_null(benchmark(), effectiveness()).unwrap(), 2);
}

#[test]
fn rank_lookup_sorts_ascending_and_skips_nulls() {
    let store = SqliteBenchmarkStore::in_memory().unwrap();
    let records = vec![
        outcome_record(Some(9.0)),
        outcome_record(None),
        outcome_record(Some(1.0)),
        outcome_record(Some(5.0)),
    ];
    store.insert_assessments(benchmark(), &records).unwrap();

    let source = &store;
    assert_eq!(source.value_at_ascending_rank(benchmark(), effectiveness(), 0).unwrap(), Some(1.0));
    assert_eq!(source.value_at_ascending_rank(benchmark(), effectiveness(), 1).unwrap(), Some(5.0));
    assert_eq!(source.value_at_ascending_rank(benchmark(), effectiveness(), 2).unwrap(), Some(9.0));
    assert_eq!(source.value_at_ascending_rank(benchmark(), effectiveness(), 3).unwrap(), None);
}

#[test]
fn mean_over_empty_population_is_zero() {
    let store = SqliteBenchmarkStore::in_memory().unwrap();
    let mean = store.mean_non_null(benchmark(), effectiveness()).unwrap();
    assert!((mean - 0.0).abs() < f64::EPSILON);
}

#[test]
fn mean_ignores_null_scores() {
    let store = SqliteBenchmarkStore::in_memory().unwrap();
    let records =
        vec![outcome_record(Some(4.0)), outcome_record(None), outcome_record(Some(8.0))];
    store.insert_assessments(benchmark(), &records).unwrap();

    let mean = store.mean_non_null(benchmark(), effectiveness()).unwrap();
    assert!((mean - 6.0).abs() < f64::EPSILON);
}

#[test]
fn scan_filters_inclusively_and_paginates_in_record_order() {
    let store = SqliteBenchmarkStore::in_memory().unwrap();
    let records: Vec<AssessmentRecord> =
        (1..=6).map(|score| outcome_record(Some(f64::from(score)))).collect();
    store.insert_assessments(benchmark(), &records).unwrap();

    // Threshold 3.0: records scoring 3, 4, 5, 6 qualify, in insertion order.
    let first =
        store.scan_top_performers(benchmark(), Outcome::Effectiveness, 3.0, 0, 3).unwrap();
    let second =
        store.scan_top_performers(benchmark(), Outcome::Effectiveness, 3.0, 3, 3).unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(first[0].outcome_score(Outcome::Effectiveness), Some(3.0));
    assert_eq!(first[2].outcome_score(Outcome::Effectiveness), Some(5.0));
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].outcome_score(Outcome::Effectiveness), Some(6.0));
}

#[test]
fn scan_preserves_every_stored_score() {
    let store = SqliteBenchmarkStore::in_memory().unwrap();
    let record = full_record(2);
    store.insert_assessments(benchmark(), std::slice::from_ref(&record)).unwrap();

    let scanned =
        store.scan_top_performers(benchmark(), Outcome::Effectiveness, 0.0, 0, 10).unwrap();
    assert_eq!(scanned, vec![record]);
}

#[test]
fn benchmarks_are_isolated() {
    let store = SqliteBenchmarkStore::in_memory().unwrap();
    let other = BenchmarkId::from_raw(8).unwrap();
    store.insert_assessments(benchmark(), &[outcome_record(Some(5.0))]).unwrap();
    store.insert_assessments(other, &[outcome_record(Some(1.0))]).unwrap();

    assert_eq!(store.count_non_null(benchmark(), effectiveness()).unwrap(), 1);
    assert_eq!(store.value_at_ascending_rank(other, effectiveness(), 0).unwrap(), Some(1.0));
}

#[test]
fn repeated_ingestion_appends_records() {
    let store = SqliteBenchmarkStore::in_memory().unwrap();
    store.insert_assessments(benchmark(), &[outcome_record(Some(1.0))]).unwrap();
    store.insert_assessments(benchmark(), &[outcome_record(Some(2.0))]).unwrap();

    assert_eq!(store.count_non_null(benchmark(), effectiveness()).unwrap(), 2);
    let scanned =
        store.scan_top_performers(benchmark(), Outcome::Effectiveness, 0.0, 0, 10).unwrap();
    assert_eq!(scanned[0].outcome_score(Outcome::Effectiveness), Some(1.0));
    assert_eq!(scanned[1].outcome_score(Outcome::Effectiveness), Some(2.0));
}

// ============================================================================
// SECTION: Profile Replace Semantics
// ============================================================================

#[test]
fn replace_overwrites_the_prior_set() {
    let temp = TempDir::new().unwrap();
    let config = SqliteStoreConfig::new(temp.path().join("bench.db"));
    let store = Arc::new(SqliteBenchmarkStore::open(&config).unwrap());
    store.insert_assessments(benchmark(), &(0..40).map(full_record).collect::<Vec<_>>()).unwrap();

    let engine = Engine::new(Arc::clone(&store), Arc::clone(&store));
    let produced = engine.run(benchmark()).unwrap();
    assert_eq!(produced, Outcome::COUNT);

    let first = store.load_profiles(benchmark()).unwrap();
    assert_eq!(first.len(), Outcome::COUNT);

    engine.run(benchmark()).unwrap();
    let second = store.load_profiles(benchmark()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_replace_clears_prior_profiles() {
    let store = SqliteBenchmarkStore::in_memory().unwrap();
    store.insert_assessments(benchmark(), &(0..40).map(full_record).collect::<Vec<_>>()).unwrap();

    let engine = Engine::new(&store, &store);
    engine.run(benchmark()).unwrap();
    assert!(!store.load_profiles(benchmark()).unwrap().is_empty());

    store.replace_profiles(benchmark(), &[]).unwrap();
    assert!(store.load_profiles(benchmark()).unwrap().is_empty());
}

#[test]
fn profiles_survive_reopening_the_database() {
    let temp = TempDir::new().unwrap();
    let config = SqliteStoreConfig::new(temp.path().join("bench.db"));

    {
        let store = Arc::new(SqliteBenchmarkStore::open(&config).unwrap());
        store
            .insert_assessments(benchmark(), &(0..40).map(full_record).collect::<Vec<_>>())
            .unwrap();
        let engine = Engine::new(Arc::clone(&store), Arc::clone(&store));
        engine.run(benchmark()).unwrap();
    }

    let reopened = SqliteBenchmarkStore::open(&config).unwrap();
    let profiles = reopened.load_profiles(benchmark()).unwrap();
    assert_eq!(profiles.len(), Outcome::COUNT);
    assert_eq!(profiles[0].sample_size, 40);
    assert_eq!(profiles[0].competency_averages.len(), CoreCompetency::COUNT);
}
