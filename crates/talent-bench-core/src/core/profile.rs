// crates/talent-bench-core/src/core/profile.rs
// ============================================================================
// Module: Talent Bench Profiles
// Description: Derived thresholds, baselines, patterns, and output profiles.
// Purpose: Define the engine's derived data model and compile-time tunables.
// Dependencies: crate::core::{identifiers, taxonomy}, serde
// ============================================================================

//! ## Overview
//! Derived data produced by the engine: percentile thresholds, population
//! baselines, mined attribute patterns, and the final top-performer profile.
//! All tunables are compile-time constants; the engine has no runtime
//! configuration surface beyond page size and worker count.
//!
//! Invariants:
//! - `top_talents` is cluster-ordered; `top_talents_summary` re-sorts the
//!   same filtered data by distinctiveness.
//! - `importance` is never negative.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::BenchmarkId;
use crate::core::taxonomy::CoreCompetency;
use crate::core::taxonomy::MacroCompetency;
use crate::core::taxonomy::Outcome;
use crate::core::taxonomy::Talent;
use crate::core::taxonomy::TalentCluster;

// ============================================================================
// SECTION: Tunables
// ============================================================================

/// Percentile defining the top-performer cutoff.
pub const PERCENTILE: u8 = 90;
/// Minimum sample size for both the eligibility and post-streaming checks.
pub const MIN_SAMPLE_SIZE: u32 = 30;
/// Default page size for chunked streaming.
pub const DEFAULT_PAGE_SIZE: usize = 10_000;
/// Number of top-ranked attributes considered per record for pair mining.
pub const TOP_ATTRIBUTES_PER_RECORD: usize = 3;
/// Minimum pair frequency (percent of the cohort) retained by the miner.
pub const MIN_PATTERN_FREQUENCY_PCT: u32 = 10;
/// Maximum number of patterns retained per counter.
pub const MAX_PATTERNS: usize = 6;
/// Maximum number of talents in the distinctiveness summary.
pub const MAX_SUMMARY_TALENTS: usize = 5;

// ============================================================================
// SECTION: Percentile Threshold
// ============================================================================

/// Percentile cutoff for one outcome within a benchmark.
///
/// # Invariants
/// - Exists only when the outcome's non-null count is >= [`MIN_SAMPLE_SIZE`].
/// - `value` is the score at ascending rank `floor(0.9 * eligible_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileThreshold {
    /// Outcome the threshold applies to.
    pub outcome: Outcome,
    /// Inclusive cutoff value; scores >= `value` are top performers.
    pub value: f64,
    /// Count of non-null outcome scores used to derive the rank.
    pub eligible_count: u64,
}

// ============================================================================
// SECTION: Baseline Averages
// ============================================================================

/// Population-wide attribute means, computed once per benchmark.
///
/// # Invariants
/// - Slots follow taxonomy declaration order.
/// - An attribute with zero non-null observations has baseline 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineAverages {
    /// Macro competency baselines (K, C, G).
    pub macros: [f64; MacroCompetency::COUNT],
    /// Core competency baselines in declaration order.
    pub cores: [f64; CoreCompetency::COUNT],
    /// Talent baselines in declaration order.
    pub talents: [f64; Talent::COUNT],
}

impl BaselineAverages {
    /// Returns the baseline for a macro competency.
    #[must_use]
    pub const fn macro_baseline(&self, competency: MacroCompetency) -> f64 {
        self.macros[competency.index()]
    }

    /// Returns the baseline for a core competency.
    #[must_use]
    pub const fn core_baseline(&self, competency: CoreCompetency) -> f64 {
        self.cores[competency.index()]
    }

    /// Returns the baseline for a talent.
    #[must_use]
    pub const fn talent_baseline(&self, talent: Talent) -> f64 {
        self.talents[talent.index()]
    }
}

// ============================================================================
// SECTION: Pattern Statistics
// ============================================================================

/// Canonical key for an unordered attribute pair.
///
/// # Invariants
/// - The two codes are joined with `|` in lexicographic order, so
///   `{EL, RP}` and `{RP, EL}` collapse to one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternKey(String);

impl PatternKey {
    /// Builds the canonical key from two attribute codes.
    #[must_use]
    pub fn from_codes(first: &str, second: &str) -> Self {
        if first <= second {
            Self(format!("{first}|{second}"))
        } else {
            Self(format!("{second}|{first}"))
        }
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mined statistics for one attribute pair.
///
/// # Invariants
/// - `frequency_pct` is >= [`MIN_PATTERN_FREQUENCY_PCT`] in emitted profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternStat {
    /// Canonical pair key.
    pub pair: PatternKey,
    /// Share of the cohort exhibiting the pair, rounded to whole percent.
    pub frequency_pct: u32,
    /// Mean outcome score among records exhibiting the pair.
    pub avg_outcome: f64,
}

// ============================================================================
// SECTION: Ranked Entries
// ============================================================================

/// Flat macro competency averages surfaced on every profile.
///
/// # Invariants
/// - Macro competencies never appear in ranked lists or pattern mining.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroAverages {
    /// Cohort average for the know-yourself domain (0.0 when unobserved).
    pub know: f64,
    /// Cohort average for the choose-yourself domain (0.0 when unobserved).
    pub choose: f64,
    /// Cohort average for the give-yourself domain (0.0 when unobserved).
    pub give: f64,
}

/// Cohort statistics for one core competency.
///
/// # Invariants
/// - `importance` equals `max(0, diff_from_avg * 10)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCompetency {
    /// Competency the entry describes.
    pub competency: CoreCompetency,
    /// Cohort average of non-null scores.
    pub average: f64,
    /// Cohort average minus the population baseline.
    pub diff_from_avg: f64,
    /// Non-negative distinctiveness weight.
    pub importance: f64,
}

/// Cohort statistics for one talent.
///
/// # Invariants
/// - `importance` equals `max(0, diff_from_avg * 10)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTalent {
    /// Talent the entry describes.
    pub talent: Talent,
    /// Cluster the talent belongs to.
    pub cluster: TalentCluster,
    /// Cohort average of non-null scores.
    pub average: f64,
    /// Cohort average minus the population baseline.
    pub diff_from_avg: f64,
    /// Non-negative distinctiveness weight.
    pub importance: f64,
}

// ============================================================================
// SECTION: Top Performer Profile
// ============================================================================

/// Summary profile for one outcome's top-performer cohort.
///
/// # Invariants
/// - `sample_size` is >= [`MIN_SAMPLE_SIZE`].
/// - `top_talents` holds all Focus entries before Decisions entries before
///   Drive entries, independent of score.
/// - `top_talents_summary` is a re-sort of the same filtered talent set by
///   `diff_from_avg` descending, truncated to [`MAX_SUMMARY_TALENTS`].
/// - Pattern lists hold at most [`MAX_PATTERNS`] entries each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformerProfile {
    /// Benchmark the profile belongs to.
    pub benchmark_id: BenchmarkId,
    /// Outcome the cohort was selected on.
    pub outcome: Outcome,
    /// Percentile used for the cutoff (always [`PERCENTILE`]).
    pub percentile: u8,
    /// Inclusive outcome score cutoff.
    pub threshold: f64,
    /// Realized top-performer count after streaming.
    pub sample_size: u32,
    /// Flat macro competency averages (K, C, G).
    pub macro_averages: MacroAverages,
    /// All core competency averages in declaration order.
    pub competency_averages: Vec<RankedCompetency>,
    /// Core competencies with average > 0, sorted by `diff_from_avg` descending.
    pub top_competencies: Vec<RankedCompetency>,
    /// Talents with average > 0 in declared cluster order.
    pub top_talents: Vec<RankedTalent>,
    /// Up to five most distinctive talents, by `diff_from_avg` descending.
    pub top_talents_summary: Vec<RankedTalent>,
    /// Recurring core competency pairs among the cohort's top-3 rankings.
    pub common_patterns: Vec<PatternStat>,
    /// Recurring talent pairs among the cohort's top-3 rankings.
    pub talent_patterns: Vec<PatternStat>,
}
