// crates/talent-bench-core/src/runtime/memory.rs
// ============================================================================
// Module: In-Memory Fixtures
// Description: In-memory DataSource and ProfileStore implementations.
// Purpose: Provide deterministic backends for tests and embedded use.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The in-memory data source holds whole benchmarks as record vectors and
//! answers the four access operations by scanning them; the in-memory profile
//! store keeps the latest replaced set per benchmark. Both honor the same
//! contracts as durable backends (stable scan order, full-replace semantics)
//! so engine behavior is identical under test.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::core::identifiers::BenchmarkId;
use crate::core::profile::TopPerformerProfile;
use crate::core::record::AssessmentRecord;
use crate::core::taxonomy::Attribute;
use crate::core::taxonomy::Outcome;
use crate::interfaces::DataSource;
use crate::interfaces::DataSourceError;
use crate::interfaces::ProfileStore;
use crate::interfaces::ProfileStoreError;

// ============================================================================
// SECTION: In-Memory Data Source
// ============================================================================

/// In-memory record source keyed by benchmark.
///
/// # Invariants
/// - Records keep insertion order; scans are stable across calls.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    /// Records per benchmark in insertion order.
    records: BTreeMap<BenchmarkId, Vec<AssessmentRecord>>,
}

impl InMemoryDataSource {
    /// Creates an empty data source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends records to a benchmark.
    pub fn insert_records(
        &mut self,
        benchmark_id: BenchmarkId,
        records: impl IntoIterator<Item = AssessmentRecord>,
    ) {
        self.records.entry(benchmark_id).or_default().extend(records);
    }

    /// Returns the records for a benchmark (empty when unknown).
    fn benchmark(&self, benchmark_id: BenchmarkId) -> &[AssessmentRecord] {
        self.records.get(&benchmark_id).map_or(&[], Vec::as_slice)
    }
}

impl DataSource for InMemoryDataSource {
    fn count_non_null(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
    ) -> Result<u64, DataSourceError> {
        let count = self
            .benchmark(benchmark_id)
            .iter()
            .filter(|record| record.score(attribute).is_some())
            .count();
        Ok(count as u64)
    }

    fn value_at_ascending_rank(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
        rank: u64,
    ) -> Result<Option<f64>, DataSourceError> {
        let mut values: Vec<f64> = self
            .benchmark(benchmark_id)
            .iter()
            .filter_map(|record| record.score(attribute))
            .collect();
        values.sort_by(f64::total_cmp);
        let index = usize::try_from(rank)
            .map_err(|_| DataSourceError::Invalid(format!("rank out of range: {rank}")))?;
        Ok(values.get(index).copied())
    }

    fn scan_top_performers(
        &self,
        benchmark_id: BenchmarkId,
        outcome: Outcome,
        threshold: f64,
        page_offset: usize,
        page_size: usize,
    ) -> Result<Vec<AssessmentRecord>, DataSourceError> {
        let page = self
            .benchmark(benchmark_id)
            .iter()
            .filter(|record| {
                record.outcome_score(outcome).is_some_and(|score| score >= threshold)
            })
            .skip(page_offset)
            .take(page_size)
            .cloned()
            .collect();
        Ok(page)
    }

    fn mean_non_null(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
    ) -> Result<f64, DataSourceError> {
        let mut sum = 0.0;
        let mut count = 0_u32;
        for record in self.benchmark(benchmark_id) {
            if let Some(value) = record.score(attribute) {
                sum += value;
                count += 1;
            }
        }
        if count == 0 {
            return Ok(0.0);
        }
        Ok(sum / f64::from(count))
    }
}

// ============================================================================
// SECTION: In-Memory Profile Store
// ============================================================================

/// In-memory profile store keeping the latest replaced set per benchmark.
///
/// # Invariants
/// - Each replace overwrites the whole set; an empty replace leaves an empty
///   set, mirroring the degenerate recompute semantics.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    /// Latest profile set per benchmark.
    profiles: Mutex<BTreeMap<BenchmarkId, Vec<TopPerformerProfile>>>,
}

impl InMemoryProfileStore {
    /// Creates an empty profile store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the latest replaced set for a benchmark (empty when never
    /// replaced).
    #[must_use]
    pub fn profiles_for(&self, benchmark_id: BenchmarkId) -> Vec<TopPerformerProfile> {
        let guard = self.profiles.lock().unwrap_or_else(PoisonError::into_inner);
        guard.get(&benchmark_id).cloned().unwrap_or_default()
    }

    /// Returns true when a replace has been observed for the benchmark.
    #[must_use]
    pub fn has_set_for(&self, benchmark_id: BenchmarkId) -> bool {
        let guard = self.profiles.lock().unwrap_or_else(PoisonError::into_inner);
        guard.contains_key(&benchmark_id)
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn replace_profiles(
        &self,
        benchmark_id: BenchmarkId,
        profiles: &[TopPerformerProfile],
    ) -> Result<(), ProfileStoreError> {
        let mut guard = self.profiles.lock().unwrap_or_else(PoisonError::into_inner);
        guard.insert(benchmark_id, profiles.to_vec());
        Ok(())
    }
}
