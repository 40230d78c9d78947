// crates/talent-bench-core/tests/pattern_unit.rs
// ============================================================================
// Module: Pattern Miner Unit Tests
// Description: Frequency filtering, ranking, truncation, and rounding.
// Purpose: Validate pattern mining against the documented cutoff rules.
// ============================================================================

//! Pattern miner tests for frequency and ranking semantics.

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

use talent_bench_core::PatternKey;
use talent_bench_core::runtime::PairAccumulator;
use talent_bench_core::runtime::mine_patterns;
use talent_bench_core::runtime::patterns::round_percent;

fn counters(
    entries: &[(&str, &str, u32, f64)],
) -> BTreeMap<PatternKey, PairAccumulator> {
    entries
        .iter()
        .map(|(first, second, count, outcome_sum)| {
            (
                PatternKey::from_codes(first, second),
                PairAccumulator { count: *count, outcome_sum: *outcome_sum },
            )
        })
        .collect()
}

#[test]
fn frequency_cutoff_drops_rare_pairs() {
    // 100 top performers: {EL,RP} seen 40 times, {OP,NG} only 5.
    let counters = counters(&[("EL", "RP", 40, 360.0), ("OP", "NG", 5, 45.0)]);

    let patterns = mine_patterns(&counters, 100);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].pair, PatternKey::from_codes("EL", "RP"));
    assert_eq!(patterns[0].frequency_pct, 40);
    assert!((patterns[0].avg_outcome - 9.0).abs() < f64::EPSILON);
}

#[test]
fn patterns_sort_by_frequency_descending() {
    let counters = counters(&[
        ("EL", "RP", 20, 100.0),
        ("ACT", "NE", 50, 250.0),
        ("IM", "OP", 35, 175.0),
    ]);

    let patterns = mine_patterns(&counters, 100);
    let frequencies: Vec<u32> =
        patterns.iter().map(|pattern| pattern.frequency_pct).collect();
    assert_eq!(frequencies, vec![50, 35, 20]);
}

#[test]
fn at_most_six_patterns_survive() {
    let pairs = [
        ("EL", "RP", 90),
        ("EL", "ACT", 80),
        ("EL", "NE", 70),
        ("EL", "IM", 60),
        ("EL", "OP", 50),
        ("EL", "EMP", 40),
        ("EL", "NG", 30),
        ("RP", "ACT", 20),
    ];
    let counters: BTreeMap<PatternKey, PairAccumulator> = pairs
        .iter()
        .map(|(first, second, count)| {
            (
                PatternKey::from_codes(first, second),
                PairAccumulator { count: *count, outcome_sum: f64::from(*count) },
            )
        })
        .collect();

    let patterns = mine_patterns(&counters, 100);
    assert_eq!(patterns.len(), 6);
    assert_eq!(patterns[0].frequency_pct, 90);
    assert_eq!(patterns[5].frequency_pct, 40);
}

#[test]
fn frequency_ties_order_by_pair_key() {
    let counters = counters(&[("OP", "NG", 25, 100.0), ("EL", "RP", 25, 100.0)]);

    let patterns = mine_patterns(&counters, 100);
    assert_eq!(patterns[0].pair.as_str(), "EL|RP");
    assert_eq!(patterns[1].pair.as_str(), "NG|OP");
}

#[test]
fn boundary_frequency_is_retained() {
    // Exactly 10 percent survives the cutoff; 9 percent does not.
    let counters = counters(&[("EL", "RP", 10, 50.0), ("OP", "NG", 9, 45.0)]);

    let patterns = mine_patterns(&counters, 100);
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].frequency_pct, 10);
}

#[test]
fn empty_cohort_yields_no_patterns() {
    let counters = counters(&[("EL", "RP", 3, 12.0)]);
    assert!(mine_patterns(&counters, 0).is_empty());
}

#[test]
fn rounding_is_half_up() {
    assert_eq!(round_percent(1, 8), 13); // 12.5 rounds up
    assert_eq!(round_percent(1, 3), 33); // 33.33 rounds down
    assert_eq!(round_percent(2, 3), 67); // 66.67 rounds up
    assert_eq!(round_percent(7, 66), 11); // 10.6 rounds up past the cutoff
    assert_eq!(round_percent(0, 10), 0);
    assert_eq!(round_percent(10, 10), 100);
}
