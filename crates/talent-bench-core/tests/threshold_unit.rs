// crates/talent-bench-core/tests/threshold_unit.rs
// ============================================================================
// Module: Percentile Threshold Unit Tests
// Description: Eligibility gating and 90th-percentile rank semantics.
// Purpose: Validate threshold computation against the documented examples.
// ============================================================================

//! Threshold calculator tests for eligibility and rank lookup.

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

use talent_bench_core::AssessmentRecord;
use talent_bench_core::BenchmarkId;
use talent_bench_core::DataSource;
use talent_bench_core::InMemoryDataSource;
use talent_bench_core::Outcome;
use talent_bench_core::runtime::compute_threshold;
use talent_bench_core::runtime::threshold::percentile_rank;

fn benchmark() -> BenchmarkId {
    BenchmarkId::from_raw(1).unwrap()
}

fn outcome_record(outcome: Outcome, score: f64) -> AssessmentRecord {
    let mut record = AssessmentRecord::default();
    record.outcome_scores[outcome.index()] = Some(score);
    record
}

#[test]
fn thousand_distinct_scores_yield_rank_900_value() {
    let mut source = InMemoryDataSource::new();
    source.insert_records(
        benchmark(),
        (1..=1000).map(|score| outcome_record(Outcome::Effectiveness, f64::from(score))),
    );

    let threshold = compute_threshold(&source, benchmark(), Outcome::Effectiveness)
        .unwrap()
        .unwrap();
    assert_eq!(threshold.eligible_count, 1000);
    assert!((threshold.value - 901.0).abs() < f64::EPSILON);

    // The inclusive boundary keeps exactly the top hundred records.
    let cohort = source
        .scan_top_performers(benchmark(), Outcome::Effectiveness, threshold.value, 0, 10_000)
        .unwrap();
    assert_eq!(cohort.len(), 100);
}

#[test]
fn below_minimum_sample_size_is_ineligible() {
    let mut source = InMemoryDataSource::new();
    source.insert_records(
        benchmark(),
        (1..=25).map(|score| outcome_record(Outcome::Wellbeing, f64::from(score))),
    );

    let threshold = compute_threshold(&source, benchmark(), Outcome::Wellbeing).unwrap();
    assert!(threshold.is_none());
}

#[test]
fn exactly_minimum_sample_size_is_eligible() {
    let mut source = InMemoryDataSource::new();
    source.insert_records(
        benchmark(),
        (1..=30).map(|score| outcome_record(Outcome::Relationships, f64::from(score))),
    );

    let threshold = compute_threshold(&source, benchmark(), Outcome::Relationships)
        .unwrap()
        .unwrap();
    // rank = floor(0.9 * 30) = 27, 0-indexed over scores 1..=30.
    assert!((threshold.value - 28.0).abs() < f64::EPSILON);
}

#[test]
fn null_scores_are_excluded_from_the_count() {
    let mut source = InMemoryDataSource::new();
    source.insert_records(
        benchmark(),
        (1..=29).map(|score| outcome_record(Outcome::Engagement, f64::from(score))),
    );
    // Records answering other outcomes do not make this one eligible.
    source.insert_records(
        benchmark(),
        (1..=40).map(|score| outcome_record(Outcome::Effectiveness, f64::from(score))),
    );

    let threshold = compute_threshold(&source, benchmark(), Outcome::Engagement).unwrap();
    assert!(threshold.is_none());
}

#[test]
fn percentile_rank_matches_floor_of_nine_tenths() {
    assert_eq!(percentile_rank(30), 27);
    assert_eq!(percentile_rank(31), 27);
    assert_eq!(percentile_rank(100), 90);
    assert_eq!(percentile_rank(1000), 900);
    assert_eq!(percentile_rank(999), 899);
}

#[test]
fn ties_at_the_cutoff_are_all_included() {
    let mut source = InMemoryDataSource::new();
    // Every record ties at one point; the realized cohort is the whole
    // population, far more than ten percent. Accepted, not corrected.
    source.insert_records(
        benchmark(),
        (0..50).map(|_| outcome_record(Outcome::Leadership, 7.0)),
    );

    let threshold = compute_threshold(&source, benchmark(), Outcome::Leadership)
        .unwrap()
        .unwrap();
    assert!((threshold.value - 7.0).abs() < f64::EPSILON);

    let cohort = source
        .scan_top_performers(benchmark(), Outcome::Leadership, threshold.value, 0, 10_000)
        .unwrap();
    assert_eq!(cohort.len(), 50);
}
