// crates/talent-bench-core/src/lib.rs
// ============================================================================
// Module: Talent Bench Core
// Description: Statistical engine for top-performer benchmark profiling.
// Purpose: Compute percentile thresholds, cohort averages, and attribute
// patterns over large assessment datasets with bounded memory.
// Dependencies: serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! Talent Bench identifies, for each outcome metric of a benchmark dataset,
//! the sub-population scoring at or above the 90th percentile and
//! characterizes it: which competencies and talents the cohort exhibits above
//! the population baseline, and which top-ranked attribute pairs recur
//! together most often.
//!
//! The engine streams records in bounded pages and never loads a full
//! benchmark into memory. Recomputation is a full, idempotent replace of the
//! benchmark's profile set.
//! Invariants:
//! - Attribute declaration order is fixed and drives all tie-breaking.
//! - A recompute either replaces the whole profile set or fails loudly.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::identifiers::BenchmarkId;
pub use crate::core::profile::BaselineAverages;
pub use crate::core::profile::DEFAULT_PAGE_SIZE;
pub use crate::core::profile::MAX_PATTERNS;
pub use crate::core::profile::MAX_SUMMARY_TALENTS;
pub use crate::core::profile::MIN_PATTERN_FREQUENCY_PCT;
pub use crate::core::profile::MIN_SAMPLE_SIZE;
pub use crate::core::profile::MacroAverages;
pub use crate::core::profile::PERCENTILE;
pub use crate::core::profile::PatternKey;
pub use crate::core::profile::PatternStat;
pub use crate::core::profile::PercentileThreshold;
pub use crate::core::profile::RankedCompetency;
pub use crate::core::profile::RankedTalent;
pub use crate::core::profile::TOP_ATTRIBUTES_PER_RECORD;
pub use crate::core::profile::TopPerformerProfile;
pub use crate::core::record::AssessmentRecord;
pub use crate::core::taxonomy::Attribute;
pub use crate::core::taxonomy::CoreCompetency;
pub use crate::core::taxonomy::MacroCompetency;
pub use crate::core::taxonomy::Outcome;
pub use crate::core::taxonomy::Talent;
pub use crate::core::taxonomy::TalentCluster;
pub use interfaces::DataSource;
pub use interfaces::DataSourceError;
pub use interfaces::ProfileStore;
pub use interfaces::ProfileStoreError;
pub use runtime::CancelToken;
pub use runtime::Engine;
pub use runtime::EngineConfig;
pub use runtime::EngineError;
pub use runtime::InMemoryDataSource;
pub use runtime::InMemoryProfileStore;
