// crates/talent-bench-core/src/interfaces/mod.rs
// ============================================================================
// Module: Talent Bench Interfaces
// Description: Backend-agnostic interfaces for record access and profile output.
// Purpose: Define the contract surfaces consumed and produced by the engine.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the engine integrates with the external data store
//! without embedding backend-specific details. The engine never loads a full
//! benchmark into memory: record access is count, rank lookup, paged scan,
//! and aggregate mean. The output store performs an atomic full replace of a
//! benchmark's profile set.
//!
//! Invariants:
//! - Implementations are deterministic for identical stored data.
//! - A replace either commits the whole profile set or fails loudly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::identifiers::BenchmarkId;
use crate::core::profile::TopPerformerProfile;
use crate::core::record::AssessmentRecord;
use crate::core::taxonomy::Attribute;
use crate::core::taxonomy::Outcome;

// ============================================================================
// SECTION: Data Source
// ============================================================================

/// Data source errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Any variant is fatal for the whole invocation; the engine never retries.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// Data source I/O error.
    #[error("data source io error: {0}")]
    Io(String),
    /// Data source returned data that fails validation.
    #[error("data source invalid data: {0}")]
    Invalid(String),
}

/// Backend-agnostic read access to benchmark assessment records.
pub trait DataSource {
    /// Counts records with a non-null score for the attribute.
    ///
    /// # Errors
    ///
    /// Returns [`DataSourceError`] when the count cannot be computed.
    fn count_non_null(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
    ) -> Result<u64, DataSourceError>;

    /// Returns the non-null score at the given 0-indexed ascending rank.
    ///
    /// Returns `None` when fewer than `rank + 1` non-null scores exist.
    ///
    /// # Errors
    ///
    /// Returns [`DataSourceError`] when the lookup fails.
    fn value_at_ascending_rank(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
        rank: u64,
    ) -> Result<Option<f64>, DataSourceError>;

    /// Returns one page of records whose outcome score is >= `threshold`.
    ///
    /// Pages are stable for identical stored data: the same offset always
    /// yields the same records in the same order.
    ///
    /// # Errors
    ///
    /// Returns [`DataSourceError`] when the scan fails.
    fn scan_top_performers(
        &self,
        benchmark_id: BenchmarkId,
        outcome: Outcome,
        threshold: f64,
        page_offset: usize,
        page_size: usize,
    ) -> Result<Vec<AssessmentRecord>, DataSourceError>;

    /// Returns the mean of non-null scores for the attribute.
    ///
    /// Returns 0.0 when the attribute has zero non-null observations.
    ///
    /// # Errors
    ///
    /// Returns [`DataSourceError`] when the aggregate fails.
    fn mean_non_null(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
    ) -> Result<f64, DataSourceError>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn count_non_null(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
    ) -> Result<u64, DataSourceError> {
        (**self).count_non_null(benchmark_id, attribute)
    }

    fn value_at_ascending_rank(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
        rank: u64,
    ) -> Result<Option<f64>, DataSourceError> {
        (**self).value_at_ascending_rank(benchmark_id, attribute, rank)
    }

    fn scan_top_performers(
        &self,
        benchmark_id: BenchmarkId,
        outcome: Outcome,
        threshold: f64,
        page_offset: usize,
        page_size: usize,
    ) -> Result<Vec<AssessmentRecord>, DataSourceError> {
        (**self).scan_top_performers(benchmark_id, outcome, threshold, page_offset, page_size)
    }

    fn mean_non_null(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
    ) -> Result<f64, DataSourceError> {
        (**self).mean_non_null(benchmark_id, attribute)
    }
}

impl<T: DataSource + ?Sized> DataSource for Arc<T> {
    fn count_non_null(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
    ) -> Result<u64, DataSourceError> {
        (**self).count_non_null(benchmark_id, attribute)
    }

    fn value_at_ascending_rank(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
        rank: u64,
    ) -> Result<Option<f64>, DataSourceError> {
        (**self).value_at_ascending_rank(benchmark_id, attribute, rank)
    }

    fn scan_top_performers(
        &self,
        benchmark_id: BenchmarkId,
        outcome: Outcome,
        threshold: f64,
        page_offset: usize,
        page_size: usize,
    ) -> Result<Vec<AssessmentRecord>, DataSourceError> {
        (**self).scan_top_performers(benchmark_id, outcome, threshold, page_offset, page_size)
    }

    fn mean_non_null(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
    ) -> Result<f64, DataSourceError> {
        (**self).mean_non_null(benchmark_id, attribute)
    }
}

// ============================================================================
// SECTION: Profile Store
// ============================================================================

/// Profile store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - A failed replace may leave the prior set deleted; callers must treat any
///   variant as "re-run the whole job", never "patch the result".
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    /// Profile store I/O error.
    #[error("profile store io error: {0}")]
    Io(String),
    /// Profile data failed serialization or validation.
    #[error("profile store invalid data: {0}")]
    Invalid(String),
}

/// Output store owning the persisted top-performer profiles.
pub trait ProfileStore {
    /// Atomically replaces every profile for the benchmark with `profiles`.
    ///
    /// The replace is delete-then-insert inside one logical transaction. An
    /// empty `profiles` slice still deletes the prior set (degenerate
    /// recompute).
    ///
    /// # Errors
    ///
    /// Returns [`ProfileStoreError`] when the replace cannot be committed.
    fn replace_profiles(
        &self,
        benchmark_id: BenchmarkId,
        profiles: &[TopPerformerProfile],
    ) -> Result<(), ProfileStoreError>;
}

impl<T: ProfileStore + ?Sized> ProfileStore for &T {
    fn replace_profiles(
        &self,
        benchmark_id: BenchmarkId,
        profiles: &[TopPerformerProfile],
    ) -> Result<(), ProfileStoreError> {
        (**self).replace_profiles(benchmark_id, profiles)
    }
}

impl<T: ProfileStore + ?Sized> ProfileStore for Arc<T> {
    fn replace_profiles(
        &self,
        benchmark_id: BenchmarkId,
        profiles: &[TopPerformerProfile],
    ) -> Result<(), ProfileStoreError> {
        (**self).replace_profiles(benchmark_id, profiles)
    }
}
