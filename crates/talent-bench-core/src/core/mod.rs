// crates/talent-bench-core/src/core/mod.rs
// ============================================================================
// Module: Talent Bench Core Data Model
// Description: Identifiers, attribute taxonomy, records, and profiles.
// Purpose: Define the immutable data model shared by the engine runtime.
// Dependencies: crate::core submodules
// ============================================================================

//! ## Overview
//! The core data model is value-oriented and serialization-stable. The
//! attribute taxonomy is process-wide constant data; records are read-only
//! input owned by the external store; profiles are the engine's only output.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod identifiers;
pub mod profile;
pub mod record;
pub mod taxonomy;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::BenchmarkId;
pub use profile::BaselineAverages;
pub use profile::MacroAverages;
pub use profile::PatternKey;
pub use profile::PatternStat;
pub use profile::PercentileThreshold;
pub use profile::RankedCompetency;
pub use profile::RankedTalent;
pub use profile::TopPerformerProfile;
pub use record::AssessmentRecord;
pub use taxonomy::Attribute;
pub use taxonomy::CoreCompetency;
pub use taxonomy::MacroCompetency;
pub use taxonomy::Outcome;
pub use taxonomy::Talent;
pub use taxonomy::TalentCluster;
