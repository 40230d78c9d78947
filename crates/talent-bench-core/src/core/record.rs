// crates/talent-bench-core/src/core/record.rs
// ============================================================================
// Module: Talent Bench Assessment Records
// Description: Per-individual benchmark record with nullable attribute scores.
// Purpose: Carry every competency, talent, and outcome score needed by the
// streaming aggregator.
// Dependencies: crate::core::taxonomy, serde
// ============================================================================

//! ## Overview
//! One assessment record holds an optional numeric score ("not answered" when
//! absent) for every attribute in the taxonomy. Records are immutable input
//! from the engine's point of view; the external store owns them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::taxonomy::Attribute;
use crate::core::taxonomy::CoreCompetency;
use crate::core::taxonomy::MacroCompetency;
use crate::core::taxonomy::Outcome;
use crate::core::taxonomy::Talent;

// ============================================================================
// SECTION: Assessment Record
// ============================================================================

/// One assessed individual's scores, scoped to a benchmark.
///
/// # Invariants
/// - Array slots follow the taxonomy declaration order.
/// - `None` means "not answered" and is excluded from all averages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    /// Macro competency scores (K, C, G).
    pub macro_scores: [Option<f64>; MacroCompetency::COUNT],
    /// Core competency scores in declaration order.
    pub core_scores: [Option<f64>; CoreCompetency::COUNT],
    /// Talent scores in declaration (cluster) order.
    pub talent_scores: [Option<f64>; Talent::COUNT],
    /// Outcome metric scores in declaration order.
    pub outcome_scores: [Option<f64>; Outcome::COUNT],
}

impl AssessmentRecord {
    /// Returns the score for a macro competency.
    #[must_use]
    pub const fn macro_score(&self, competency: MacroCompetency) -> Option<f64> {
        self.macro_scores[competency.index()]
    }

    /// Returns the score for a core competency.
    #[must_use]
    pub const fn core_score(&self, competency: CoreCompetency) -> Option<f64> {
        self.core_scores[competency.index()]
    }

    /// Returns the score for a talent.
    #[must_use]
    pub const fn talent_score(&self, talent: Talent) -> Option<f64> {
        self.talent_scores[talent.index()]
    }

    /// Returns the score for an outcome metric.
    #[must_use]
    pub const fn outcome_score(&self, outcome: Outcome) -> Option<f64> {
        self.outcome_scores[outcome.index()]
    }

    /// Returns the score for any attribute.
    #[must_use]
    pub const fn score(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::Macro(competency) => self.macro_score(competency),
            Attribute::Core(competency) => self.core_score(competency),
            Attribute::Talent(talent) => self.talent_score(talent),
            Attribute::Outcome(outcome) => self.outcome_score(outcome),
        }
    }
}
