// crates/talent-bench-core/src/runtime/threshold.rs
// ============================================================================
// Module: Percentile Threshold Calculator
// Description: 90th-percentile cutoff computation per outcome.
// Purpose: Derive the inclusive top-performer cutoff or signal ineligibility.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The threshold calculator counts non-null outcome scores and, when the
//! count meets the minimum sample size, fetches the score at ascending rank
//! `floor(0.9 * count)` (0-indexed). Records tying exactly at the cutoff are
//! all top performers, so the realized cohort may exceed 10% of the
//! population; this is accepted, not corrected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::identifiers::BenchmarkId;
use crate::core::profile::MIN_SAMPLE_SIZE;
use crate::core::profile::PERCENTILE;
use crate::core::profile::PercentileThreshold;
use crate::core::taxonomy::Attribute;
use crate::core::taxonomy::Outcome;
use crate::interfaces::DataSource;
use crate::runtime::engine::EngineError;

// ============================================================================
// SECTION: Threshold Computation
// ============================================================================

/// Computes the 90th-percentile cutoff for one outcome.
///
/// Returns `Ok(None)` when fewer than [`MIN_SAMPLE_SIZE`] non-null scores
/// exist; the outcome is then excluded from all downstream processing. This
/// is per-outcome control flow, not an error.
///
/// # Errors
///
/// Returns [`EngineError::DataAccess`] on data source failure and
/// [`EngineError::ThresholdUnavailable`] when the store cannot produce the
/// value its own count promised.
pub fn compute_threshold<D: DataSource + ?Sized>(
    source: &D,
    benchmark_id: BenchmarkId,
    outcome: Outcome,
) -> Result<Option<PercentileThreshold>, EngineError> {
    let attribute = Attribute::Outcome(outcome);
    let eligible_count = source.count_non_null(benchmark_id, attribute)?;
    if eligible_count < u64::from(MIN_SAMPLE_SIZE) {
        return Ok(None);
    }

    let rank = percentile_rank(eligible_count);
    let value = source
        .value_at_ascending_rank(benchmark_id, attribute, rank)?
        .ok_or(EngineError::ThresholdUnavailable { outcome, rank })?;

    Ok(Some(PercentileThreshold { outcome, value, eligible_count }))
}

/// Returns the 0-indexed ascending rank of the percentile cutoff.
///
/// Equals `floor(count * PERCENTILE / 100)` computed in exact integer
/// arithmetic.
#[must_use]
pub const fn percentile_rank(eligible_count: u64) -> u64 {
    eligible_count * PERCENTILE as u64 / 100
}
