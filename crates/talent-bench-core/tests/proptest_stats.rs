// crates/talent-bench-core/tests/proptest_stats.rs
// ============================================================================
// Module: Statistical Property-Based Tests
// Description: Property tests for threshold, miner, and assembly invariants.
// Purpose: Detect invariant violations across wide input ranges.
// ============================================================================

//! Property-based tests for engine invariants.

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

use std::collections::BTreeMap;

use proptest::prelude::*;
use talent_bench_core::AssessmentRecord;
use talent_bench_core::BenchmarkId;
use talent_bench_core::CoreCompetency;
use talent_bench_core::InMemoryDataSource;
use talent_bench_core::MIN_PATTERN_FREQUENCY_PCT;
use talent_bench_core::MIN_SAMPLE_SIZE;
use talent_bench_core::Outcome;
use talent_bench_core::PatternKey;
use talent_bench_core::runtime::PairAccumulator;
use talent_bench_core::runtime::compute_threshold;
use talent_bench_core::runtime::mine_patterns;

fn benchmark() -> BenchmarkId {
    BenchmarkId::from_raw(1).unwrap()
}

fn outcome_record(score: f64) -> AssessmentRecord {
    let mut record = AssessmentRecord::default();
    record.outcome_scores[Outcome::Effectiveness.index()] = Some(score);
    record
}

/// Strategy producing synthetic pair counters keyed by competency codes.
fn counter_strategy() -> impl Strategy<Value = BTreeMap<PatternKey, PairAccumulator>> {
    prop::collection::vec((0_usize..8, 0_usize..8, 1_u32..200, 0.0_f64..2000.0), 0..24)
        .prop_map(|entries| {
            let mut counters = BTreeMap::new();
            for (left, right, count, outcome_sum) in entries {
                if left == right {
                    continue;
                }
                let key = PatternKey::from_codes(
                    CoreCompetency::ALL[left].code(),
                    CoreCompetency::ALL[right].code(),
                );
                let entry: &mut PairAccumulator = counters.entry(key).or_default();
                entry.count += count;
                entry.outcome_sum += outcome_sum;
            }
            counters
        })
}

proptest! {
    #[test]
    fn threshold_is_the_value_at_the_percentile_rank(
        scores in prop::collection::vec(0.0_f64..100.0, 30..300)
    ) {
        let mut source = InMemoryDataSource::new();
        source.insert_records(benchmark(), scores.iter().map(|score| outcome_record(*score)));

        let threshold = compute_threshold(&source, benchmark(), Outcome::Effectiveness)
            .unwrap()
            .unwrap();

        let mut sorted = scores.clone();
        sorted.sort_by(f64::total_cmp);
        let rank = sorted.len() * 9 / 10;
        prop_assert_eq!(threshold.value.to_bits(), sorted[rank].to_bits());

        // At least the records above the rank qualify.
        let qualifying = scores.iter().filter(|score| **score >= threshold.value).count();
        prop_assert!(qualifying >= sorted.len() - rank);
    }

    #[test]
    fn small_populations_never_produce_thresholds(
        scores in prop::collection::vec(0.0_f64..100.0, 0..30)
    ) {
        let count = scores.len();
        let mut source = InMemoryDataSource::new();
        source.insert_records(benchmark(), scores.into_iter().map(outcome_record));

        let threshold =
            compute_threshold(&source, benchmark(), Outcome::Effectiveness).unwrap();
        prop_assert!(threshold.is_none(), "count {} must be ineligible", count);
    }

    #[test]
    fn mined_patterns_respect_bounds(
        counters in counter_strategy(),
        cohort in MIN_SAMPLE_SIZE..10_000
    ) {
        let patterns = mine_patterns(&counters, cohort);

        prop_assert!(patterns.len() <= 6);
        for pattern in &patterns {
            prop_assert!(pattern.frequency_pct >= MIN_PATTERN_FREQUENCY_PCT);
            prop_assert!(pattern.avg_outcome.is_finite());
        }
        for window in patterns.windows(2) {
            prop_assert!(window[0].frequency_pct >= window[1].frequency_pct);
        }
    }

    #[test]
    fn mining_is_deterministic(counters in counter_strategy(), cohort in 1_u32..5_000) {
        let first = mine_patterns(&counters, cohort);
        let second = mine_patterns(&counters, cohort);
        prop_assert_eq!(first, second);
    }
}
