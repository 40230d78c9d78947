// crates/talent-bench-core/src/runtime/patterns.rs
// ============================================================================
// Module: Attribute Pattern Miner
// Description: Ranked, frequency-filtered pair statistics from co-occurrence counters.
// Purpose: Derive the recurring attribute pairs of a top-performer cohort.
// Dependencies: crate::core, crate::runtime::aggregate
// ============================================================================

//! ## Overview
//! The miner converts raw pair counters into pattern statistics: frequency as
//! a whole percent of the cohort and the mean outcome score among records
//! exhibiting the pair. Pairs below the frequency cutoff are dropped, the
//! rest are sorted by frequency descending, and at most [`MAX_PATTERNS`]
//! survive. The identical procedure runs once over competency pairs and once
//! over talent pairs per outcome.
//!
//! Invariants:
//! - Ties in frequency are ordered by pair key, so output is deterministic
//!   for identical input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::profile::MAX_PATTERNS;
use crate::core::profile::MIN_PATTERN_FREQUENCY_PCT;
use crate::core::profile::PatternKey;
use crate::core::profile::PatternStat;
use crate::runtime::aggregate::PairAccumulator;

// ============================================================================
// SECTION: Pattern Mining
// ============================================================================

/// Mines ranked, frequency-filtered pair statistics from a counter map.
///
/// Returns an empty list when the cohort is empty.
#[must_use]
pub fn mine_patterns(
    counters: &BTreeMap<PatternKey, PairAccumulator>,
    top_performer_count: u32,
) -> Vec<PatternStat> {
    if top_performer_count == 0 {
        return Vec::new();
    }

    let mut patterns: Vec<PatternStat> = counters
        .iter()
        .filter_map(|(pair, accumulator)| {
            let frequency_pct = round_percent(accumulator.count, top_performer_count);
            if frequency_pct < MIN_PATTERN_FREQUENCY_PCT {
                return None;
            }
            let avg_outcome = accumulator.outcome_sum / f64::from(accumulator.count);
            Some(PatternStat { pair: pair.clone(), frequency_pct, avg_outcome })
        })
        .collect();

    // Stable sort over the key-ordered map keeps frequency ties in pair-key
    // order.
    patterns.sort_by(|left, right| right.frequency_pct.cmp(&left.frequency_pct));
    patterns.truncate(MAX_PATTERNS);
    patterns
}

/// Rounds `100 * count / total` to the nearest whole percent, half up.
///
/// Exact integer arithmetic; matches `f64::round` for every reachable input.
#[must_use]
pub fn round_percent(count: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = 200 * u64::from(count) + u64::from(total);
    let rounded = scaled / (2 * u64::from(total));
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
