// crates/talent-bench-core/src/runtime/assemble.rs
// ============================================================================
// Module: Profile Assembler
// Description: Combine threshold, baselines, accumulators, and patterns into
// one immutable profile.
// Purpose: Produce the final per-outcome profile or discard degenerate cohorts.
// Dependencies: crate::core, crate::runtime::aggregate
// ============================================================================

//! ## Overview
//! The assembler derives per-attribute cohort averages, differences from the
//! population baseline, and importance weights, then builds the two talent
//! orderings and the competency ranking. Cohorts smaller than the minimum
//! sample size are discarded entirely; this post-streaming check is
//! independent of the threshold calculator's eligibility check because the
//! two use different filters (non-null count vs. realized `>= threshold`
//! count) and may disagree under heavy score ties.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::identifiers::BenchmarkId;
use crate::core::profile::BaselineAverages;
use crate::core::profile::MAX_SUMMARY_TALENTS;
use crate::core::profile::MIN_SAMPLE_SIZE;
use crate::core::profile::MacroAverages;
use crate::core::profile::PERCENTILE;
use crate::core::profile::PatternStat;
use crate::core::profile::PercentileThreshold;
use crate::core::profile::RankedCompetency;
use crate::core::profile::RankedTalent;
use crate::core::profile::TopPerformerProfile;
use crate::core::taxonomy::CoreCompetency;
use crate::core::taxonomy::MacroCompetency;
use crate::core::taxonomy::Talent;
use crate::runtime::aggregate::CohortAccumulators;

// ============================================================================
// SECTION: Profile Assembly
// ============================================================================

/// Assembles the final profile for one outcome, or discards it.
///
/// Returns `None` when the realized top-performer count is below
/// [`MIN_SAMPLE_SIZE`]; no partial profile is ever emitted.
#[must_use]
pub fn assemble_profile(
    benchmark_id: BenchmarkId,
    threshold: &PercentileThreshold,
    baselines: &BaselineAverages,
    accumulators: &CohortAccumulators,
    common_patterns: Vec<PatternStat>,
    talent_patterns: Vec<PatternStat>,
) -> Option<TopPerformerProfile> {
    if accumulators.top_performer_count < MIN_SAMPLE_SIZE {
        return None;
    }

    let macro_averages = MacroAverages {
        know: accumulators.macros[MacroCompetency::KnowYourself.index()]
            .average()
            .unwrap_or_default(),
        choose: accumulators.macros[MacroCompetency::ChooseYourself.index()]
            .average()
            .unwrap_or_default(),
        give: accumulators.macros[MacroCompetency::GiveYourself.index()]
            .average()
            .unwrap_or_default(),
    };

    // All eight competencies in declaration order, then the ranked subset.
    let competency_averages: Vec<RankedCompetency> = CoreCompetency::ALL
        .iter()
        .map(|competency| {
            let average = accumulators.cores[competency.index()].average();
            let (average, diff_from_avg, importance) =
                summarize(average, baselines.core_baseline(*competency));
            RankedCompetency { competency: *competency, average, diff_from_avg, importance }
        })
        .collect();

    let mut top_competencies: Vec<RankedCompetency> = competency_averages
        .iter()
        .filter(|entry| entry.average > 0.0)
        .cloned()
        .collect();
    top_competencies
        .sort_by(|left, right| right.diff_from_avg.total_cmp(&left.diff_from_avg));

    // Declared cluster order first; the summary re-sorts the same filtered
    // set by distinctiveness.
    let top_talents: Vec<RankedTalent> = Talent::ALL
        .iter()
        .filter_map(|talent| {
            let average = accumulators.talents[talent.index()].average();
            let (average, diff_from_avg, importance) =
                summarize(average, baselines.talent_baseline(*talent));
            (average > 0.0).then(|| RankedTalent {
                talent: *talent,
                cluster: talent.cluster(),
                average,
                diff_from_avg,
                importance,
            })
        })
        .collect();

    let mut top_talents_summary = top_talents.clone();
    top_talents_summary
        .sort_by(|left, right| right.diff_from_avg.total_cmp(&left.diff_from_avg));
    top_talents_summary.truncate(MAX_SUMMARY_TALENTS);

    Some(TopPerformerProfile {
        benchmark_id,
        outcome: threshold.outcome,
        percentile: PERCENTILE,
        threshold: threshold.value,
        sample_size: accumulators.top_performer_count,
        macro_averages,
        competency_averages,
        top_competencies,
        top_talents,
        top_talents_summary,
        common_patterns,
        talent_patterns,
    })
}

/// Derives `(average, diff_from_avg, importance)` for one attribute.
///
/// A missing average contributes 0 to the diff; importance clamps negative
/// diffs to zero.
fn summarize(average: Option<f64>, baseline: f64) -> (f64, f64, f64) {
    let average = average.unwrap_or_default();
    let diff_from_avg = average - baseline;
    let importance = (diff_from_avg * 10.0).max(0.0);
    (average, diff_from_avg, importance)
}
