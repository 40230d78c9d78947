// crates/talent-bench-core/src/runtime/baseline.rs
// ============================================================================
// Module: Population Baseline Computer
// Description: Population-wide attribute means for a benchmark.
// Purpose: Provide the shared baseline every outcome pipeline diffs against.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Baselines are the arithmetic mean of non-null scores across the entire
//! benchmark population for every competency and talent (outcomes are not
//! baselined). They are computed once per invocation and shared read-only by
//! all outcome pipelines.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::identifiers::BenchmarkId;
use crate::core::profile::BaselineAverages;
use crate::core::taxonomy::Attribute;
use crate::core::taxonomy::CoreCompetency;
use crate::core::taxonomy::MacroCompetency;
use crate::core::taxonomy::Talent;
use crate::interfaces::DataSource;
use crate::runtime::engine::EngineError;

// ============================================================================
// SECTION: Baseline Computation
// ============================================================================

/// Computes population means for every competency and talent.
///
/// Attributes with zero non-null observations yield baseline 0.0 (the data
/// source contract for [`DataSource::mean_non_null`]).
///
/// # Errors
///
/// Returns [`EngineError::DataAccess`] on data source failure.
pub fn compute_baselines<D: DataSource + ?Sized>(
    source: &D,
    benchmark_id: BenchmarkId,
) -> Result<BaselineAverages, EngineError> {
    let mut macros = [0.0; MacroCompetency::COUNT];
    for competency in MacroCompetency::ALL {
        macros[competency.index()] =
            source.mean_non_null(benchmark_id, Attribute::Macro(competency))?;
    }

    let mut cores = [0.0; CoreCompetency::COUNT];
    for competency in CoreCompetency::ALL {
        cores[competency.index()] =
            source.mean_non_null(benchmark_id, Attribute::Core(competency))?;
    }

    let mut talents = [0.0; Talent::COUNT];
    for talent in Talent::ALL {
        talents[talent.index()] = source.mean_non_null(benchmark_id, Attribute::Talent(talent))?;
    }

    Ok(BaselineAverages { macros, cores, talents })
}
