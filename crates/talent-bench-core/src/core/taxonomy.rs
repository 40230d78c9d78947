// crates/talent-bench-core/src/core/taxonomy.rs
// ============================================================================
// Module: Talent Bench Attribute Taxonomy
// Description: Typed enumerations for competencies, talents, and outcomes.
// Purpose: Make the fixed attribute declaration order a compile-time guarantee.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The attribute taxonomy is process-wide constant data. Every scored
//! attribute is a fieldless enum variant with a stable short code (used for
//! pattern keys) and a stable column name (used by storage adapters).
//!
//! Invariants:
//! - Declaration order of each `ALL` array never changes; it drives stable
//!   tie-breaking and cluster ordering in every profile.
//! - Codes and column names are unique across the whole taxonomy.
//! - Talents are partitioned into exactly three clusters of six, and the
//!   declaration order groups the clusters contiguously.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Macro Competencies
// ============================================================================

/// Macro competency domains (know / choose / give yourself).
///
/// # Invariants
/// - Macro competencies are averaged but never pattern-mined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroCompetency {
    /// Know-yourself domain (K).
    KnowYourself,
    /// Choose-yourself domain (C).
    ChooseYourself,
    /// Give-yourself domain (G).
    GiveYourself,
}

impl MacroCompetency {
    /// Number of macro competencies.
    pub const COUNT: usize = 3;

    /// All macro competencies in declaration order.
    pub const ALL: [Self; Self::COUNT] =
        [Self::KnowYourself, Self::ChooseYourself, Self::GiveYourself];

    /// Returns the stable short code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::KnowYourself => "K",
            Self::ChooseYourself => "C",
            Self::GiveYourself => "G",
        }
    }

    /// Returns the stable storage column name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::KnowYourself => "k",
            Self::ChooseYourself => "c",
            Self::GiveYourself => "g",
        }
    }

    /// Returns the declaration-order index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MacroCompetency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// SECTION: Core Competencies
// ============================================================================

/// Scoring-eligible core competencies used for pattern mining.
///
/// # Invariants
/// - Declaration order is the stable tie-break order for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreCompetency {
    /// Emotional literacy (EL).
    EmotionalLiteracy,
    /// Rapport building (RP).
    Rapport,
    /// Action orientation (ACT).
    ActionOrientation,
    /// Needs exploration (NE).
    NeedsExploration,
    /// Personal impact (IM).
    Impact,
    /// Optimism (OP).
    Optimism,
    /// Empathy (EMP).
    Empathy,
    /// Negotiation (NG).
    Negotiation,
}

impl CoreCompetency {
    /// Number of core competencies.
    pub const COUNT: usize = 8;

    /// All core competencies in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::EmotionalLiteracy,
        Self::Rapport,
        Self::ActionOrientation,
        Self::NeedsExploration,
        Self::Impact,
        Self::Optimism,
        Self::Empathy,
        Self::Negotiation,
    ];

    /// Returns the stable short code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmotionalLiteracy => "EL",
            Self::Rapport => "RP",
            Self::ActionOrientation => "ACT",
            Self::NeedsExploration => "NE",
            Self::Impact => "IM",
            Self::Optimism => "OP",
            Self::Empathy => "EMP",
            Self::Negotiation => "NG",
        }
    }

    /// Returns the stable storage column name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::EmotionalLiteracy => "el",
            Self::Rapport => "rp",
            Self::ActionOrientation => "act",
            Self::NeedsExploration => "ne",
            Self::Impact => "im",
            Self::Optimism => "op",
            Self::Empathy => "emp",
            Self::Negotiation => "ng",
        }
    }

    /// Returns the declaration-order index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CoreCompetency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// SECTION: Talent Clusters
// ============================================================================

/// Talent cluster grouping.
///
/// # Invariants
/// - Cluster order (Focus, Decisions, Drive) matches talent declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalentCluster {
    /// Focus cluster.
    Focus,
    /// Decisions cluster.
    Decisions,
    /// Drive cluster.
    Drive,
}

impl TalentCluster {
    /// Number of talent clusters.
    pub const COUNT: usize = 3;

    /// All clusters in declaration order.
    pub const ALL: [Self; Self::COUNT] = [Self::Focus, Self::Decisions, Self::Drive];

    /// Number of talents per cluster.
    pub const TALENTS_PER_CLUSTER: usize = 6;
}

impl fmt::Display for TalentCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Focus => "focus",
            Self::Decisions => "decisions",
            Self::Drive => "drive",
        };
        f.write_str(name)
    }
}

// ============================================================================
// SECTION: Talents
// ============================================================================

/// The eighteen scored talents, declared in fixed cluster order.
///
/// # Invariants
/// - The first six talents belong to Focus, the next six to Decisions, and
///   the last six to Drive.
/// - Declaration order is preserved in profile output regardless of score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Talent {
    /// Clarity (CL) — Focus.
    Clarity,
    /// Concentration (CO) — Focus.
    Concentration,
    /// Structure (ST) — Focus.
    Structure,
    /// Persistence (PS) — Focus.
    Persistence,
    /// Presence (PR) — Focus.
    Presence,
    /// Reflection (RF) — Focus.
    Reflection,
    /// Courage (CG) — Decisions.
    Courage,
    /// Judgment (JD) — Decisions.
    Judgment,
    /// Independence (ID) — Decisions.
    Independence,
    /// Flexibility (FX) — Decisions.
    Flexibility,
    /// Caution (CT) — Decisions.
    Caution,
    /// Resolve (RV) — Decisions.
    Resolve,
    /// Ambition (AM) — Drive.
    Ambition,
    /// Energy (EN) — Drive.
    Energy,
    /// Curiosity (CU) — Drive.
    Curiosity,
    /// Service (SV) — Drive.
    Service,
    /// Connection (CN) — Drive.
    Connection,
    /// Growth (GW) — Drive.
    Growth,
}

impl Talent {
    /// Number of talents.
    pub const COUNT: usize = 18;

    /// All talents in declaration (cluster) order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Clarity,
        Self::Concentration,
        Self::Structure,
        Self::Persistence,
        Self::Presence,
        Self::Reflection,
        Self::Courage,
        Self::Judgment,
        Self::Independence,
        Self::Flexibility,
        Self::Caution,
        Self::Resolve,
        Self::Ambition,
        Self::Energy,
        Self::Curiosity,
        Self::Service,
        Self::Connection,
        Self::Growth,
    ];

    /// Returns the cluster this talent belongs to.
    #[must_use]
    pub const fn cluster(self) -> TalentCluster {
        match self {
            Self::Clarity
            | Self::Concentration
            | Self::Structure
            | Self::Persistence
            | Self::Presence
            | Self::Reflection => TalentCluster::Focus,
            Self::Courage
            | Self::Judgment
            | Self::Independence
            | Self::Flexibility
            | Self::Caution
            | Self::Resolve => TalentCluster::Decisions,
            Self::Ambition
            | Self::Energy
            | Self::Curiosity
            | Self::Service
            | Self::Connection
            | Self::Growth => TalentCluster::Drive,
        }
    }

    /// Returns the stable short code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Clarity => "CL",
            Self::Concentration => "CO",
            Self::Structure => "ST",
            Self::Persistence => "PS",
            Self::Presence => "PR",
            Self::Reflection => "RF",
            Self::Courage => "CG",
            Self::Judgment => "JD",
            Self::Independence => "ID",
            Self::Flexibility => "FX",
            Self::Caution => "CT",
            Self::Resolve => "RV",
            Self::Ambition => "AM",
            Self::Energy => "EN",
            Self::Curiosity => "CU",
            Self::Service => "SV",
            Self::Connection => "CN",
            Self::Growth => "GW",
        }
    }

    /// Returns the stable storage column name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Clarity => "cl",
            Self::Concentration => "co",
            Self::Structure => "st",
            Self::Persistence => "ps",
            Self::Presence => "pr",
            Self::Reflection => "rf",
            Self::Courage => "cg",
            Self::Judgment => "jd",
            Self::Independence => "id",
            Self::Flexibility => "fx",
            Self::Caution => "ct",
            Self::Resolve => "rv",
            Self::Ambition => "am",
            Self::Energy => "en",
            Self::Curiosity => "cu",
            Self::Service => "sv",
            Self::Connection => "cn",
            Self::Growth => "gw",
        }
    }

    /// Returns the declaration-order index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Talent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Outcome metrics against which top performers are identified.
///
/// # Invariants
/// - Each outcome is percentile-thresholded independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Overall effectiveness.
    Effectiveness,
    /// Quality of working relationships.
    Relationships,
    /// Personal wellbeing.
    Wellbeing,
    /// Engagement.
    Engagement,
    /// Resilience under pressure.
    Resilience,
    /// Leadership.
    Leadership,
    /// Collaboration.
    Collaboration,
    /// Innovation.
    Innovation,
    /// Productivity.
    Productivity,
    /// Adaptability.
    Adaptability,
    /// Job satisfaction.
    Satisfaction,
    /// Influence.
    Influence,
}

impl Outcome {
    /// Number of outcome metrics.
    pub const COUNT: usize = 12;

    /// All outcomes in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Effectiveness,
        Self::Relationships,
        Self::Wellbeing,
        Self::Engagement,
        Self::Resilience,
        Self::Leadership,
        Self::Collaboration,
        Self::Innovation,
        Self::Productivity,
        Self::Adaptability,
        Self::Satisfaction,
        Self::Influence,
    ];

    /// Returns the stable outcome key, also used as the storage column name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Effectiveness => "effectiveness",
            Self::Relationships => "relationships",
            Self::Wellbeing => "wellbeing",
            Self::Engagement => "engagement",
            Self::Resilience => "resilience",
            Self::Leadership => "leadership",
            Self::Collaboration => "collaboration",
            Self::Innovation => "innovation",
            Self::Productivity => "productivity",
            Self::Adaptability => "adaptability",
            Self::Satisfaction => "satisfaction",
            Self::Influence => "influence",
        }
    }

    /// Returns the declaration-order index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// SECTION: Unified Attribute Reference
// ============================================================================

/// Typed reference to any scored attribute.
///
/// # Invariants
/// - Codes and column names are unique across all variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "attribute", rename_all = "snake_case")]
pub enum Attribute {
    /// A macro competency.
    Macro(MacroCompetency),
    /// A core competency.
    Core(CoreCompetency),
    /// A talent.
    Talent(Talent),
    /// An outcome metric.
    Outcome(Outcome),
}

impl Attribute {
    /// Returns the stable storage column name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Macro(competency) => competency.column(),
            Self::Core(competency) => competency.column(),
            Self::Talent(talent) => talent.column(),
            Self::Outcome(outcome) => outcome.key(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
