// crates/talent-bench-core/src/runtime/engine.rs
// ============================================================================
// Module: Talent Bench Engine
// Description: Orchestrates the per-outcome pipelines and the atomic replace.
// Purpose: Run one finite, idempotent profiling job per invocation.
// Dependencies: crate::core, crate::interfaces, crate::runtime, tracing
// ============================================================================

//! ## Overview
//! The engine computes population baselines once, then runs the per-outcome
//! pipeline (threshold, chunked aggregation, pattern mining, assembly) for
//! every outcome on a bounded worker pool. Pipelines are mutually
//! independent: they share only the read-only baselines and the read-only
//! data source, and correctness does not depend on completion order. Output
//! order is fixed to outcome declaration order regardless of worker
//! interleaving, so identical input yields identical profile sets.
//!
//! The final delete-then-insert replace is the only shared-mutable-state
//! touchpoint; it runs even when every outcome was excluded (degenerate
//! recompute). Partial failure surfaces as a hard error and the caller
//! re-runs the whole job.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::thread;

use thiserror::Error;

use crate::core::identifiers::BenchmarkId;
use crate::core::profile::BaselineAverages;
use crate::core::profile::DEFAULT_PAGE_SIZE;
use crate::core::profile::MIN_SAMPLE_SIZE;
use crate::core::profile::TopPerformerProfile;
use crate::core::taxonomy::Outcome;
use crate::interfaces::DataSource;
use crate::interfaces::DataSourceError;
use crate::interfaces::ProfileStore;
use crate::interfaces::ProfileStoreError;
use crate::runtime::aggregate::ChunkedAggregator;
use crate::runtime::assemble::assemble_profile;
use crate::runtime::baseline::compute_baselines;
use crate::runtime::patterns::mine_patterns;
use crate::runtime::threshold::compute_threshold;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default worker pool size for per-outcome pipelines.
///
/// Tuned to a modest concurrent-query load on the data source; outcomes
/// beyond the pool size queue behind the workers.
pub const DEFAULT_WORKER_THREADS: usize = 4;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Engine invocation errors.
///
/// # Invariants
/// - Every variant is fatal for the whole invocation; the computation is
///   idempotent, so the caller's retry policy is "re-run the whole job".
#[derive(Debug, Error)]
pub enum EngineError {
    /// Data source failure during threshold lookup, baseline computation, or
    /// paged scanning.
    #[error(transparent)]
    DataAccess(#[from] DataSourceError),
    /// The data source could not produce the value its own count promised.
    #[error("threshold value unavailable for {outcome} at rank {rank}")]
    ThresholdUnavailable {
        /// Outcome whose threshold lookup failed.
        outcome: Outcome,
        /// Ascending rank that was requested.
        rank: u64,
    },
    /// Failure of the final delete-then-insert replace. The prior profiles
    /// may be left absent; callers must re-run the job.
    #[error(transparent)]
    Write(#[from] ProfileStoreError),
    /// The invocation was cancelled before completion; nothing was persisted.
    #[error("profiling job cancelled")]
    Cancelled,
}

// ============================================================================
// SECTION: Cancellation
// ============================================================================

/// Cooperative cancellation token shared between the caller and the engine.
///
/// # Invariants
/// - Cancellation is sticky: once set it is never cleared.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; in-flight pipelines stop at the next page
    /// boundary and discard partial accumulators.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns true when cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// ============================================================================
// SECTION: Engine Configuration
// ============================================================================

/// Compile-time-defaulted tunables for one engine instance.
///
/// # Invariants
/// - `page_size` and `worker_threads` are clamped to at least 1 at use sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Page size for chunked streaming.
    pub page_size: usize,
    /// Worker pool size for per-outcome pipelines.
    pub worker_threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { page_size: DEFAULT_PAGE_SIZE, worker_threads: DEFAULT_WORKER_THREADS }
    }
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Top-performer profiling engine for one data source and output store.
///
/// # Invariants
/// - The engine exclusively owns the write path to the profile store.
/// - `run` performs a full, idempotent recompute; there is no incremental
///   path.
#[derive(Debug)]
pub struct Engine<D, S> {
    /// Read-only record source shared by all pipelines.
    source: D,
    /// Output store for the final atomic replace.
    store: S,
    /// Engine tunables.
    config: EngineConfig,
}

impl<D, S> Engine<D, S>
where
    D: DataSource + Sync,
    S: ProfileStore + Sync,
{
    /// Creates an engine with default tunables.
    #[must_use]
    pub fn new(source: D, store: S) -> Self {
        Self::with_config(source, store, EngineConfig::default())
    }

    /// Creates an engine with explicit tunables.
    #[must_use]
    pub const fn with_config(source: D, store: S, config: EngineConfig) -> Self {
        Self { source, store, config }
    }

    /// Runs one full recompute for the benchmark.
    ///
    /// Returns the number of outcomes for which a profile was produced.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] on any data access or write failure; per-outcome
    /// ineligibility and degenerate cohorts are silent exclusions, not errors.
    pub fn run(&self, benchmark_id: BenchmarkId) -> Result<usize, EngineError> {
        self.run_with_cancel(benchmark_id, &CancelToken::new())
    }

    /// Runs one full recompute with cooperative cancellation.
    ///
    /// A cancelled run discards all partial state and persists nothing.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cancelled`] when the token fires before the
    /// final replace, otherwise as [`Self::run`].
    pub fn run_with_cancel(
        &self,
        benchmark_id: BenchmarkId,
        cancel: &CancelToken,
    ) -> Result<usize, EngineError> {
        let baselines = compute_baselines(&self.source, benchmark_id)?;

        let profiles = self.run_pipelines(benchmark_id, &baselines, cancel)?;
        if cancel.is_cancelled() {
            return Err(EngineError::Cancelled);
        }

        let produced = profiles.len();
        self.store.replace_profiles(benchmark_id, &profiles)?;
        tracing::info!(%benchmark_id, produced, "profile set replaced");
        Ok(produced)
    }

    /// Runs every outcome pipeline on the worker pool and collects profiles
    /// in outcome declaration order.
    fn run_pipelines(
        &self,
        benchmark_id: BenchmarkId,
        baselines: &BaselineAverages,
        cancel: &CancelToken,
    ) -> Result<Vec<TopPerformerProfile>, EngineError> {
        let workers = self.config.worker_threads.clamp(1, Outcome::COUNT);
        let next_outcome = AtomicUsize::new(0);
        let produced: Mutex<Vec<(usize, TopPerformerProfile)>> = Mutex::new(Vec::new());
        let failure: Mutex<Option<EngineError>> = Mutex::new(None);

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| {
                    loop {
                        if cancel.is_cancelled() {
                            break;
                        }
                        let index = next_outcome.fetch_add(1, Ordering::Relaxed);
                        let Some(outcome) = Outcome::ALL.get(index) else {
                            break;
                        };
                        match self.run_outcome(benchmark_id, *outcome, baselines, cancel) {
                            Ok(Some(profile)) => {
                                let mut guard = produced
                                    .lock()
                                    .unwrap_or_else(PoisonError::into_inner);
                                guard.push((index, profile));
                            }
                            Ok(None) => {}
                            Err(error) => {
                                let mut guard =
                                    failure.lock().unwrap_or_else(PoisonError::into_inner);
                                if guard.is_none() {
                                    *guard = Some(error);
                                }
                                drop(guard);
                                // Stop the remaining workers; the whole
                                // invocation is already failed.
                                cancel.cancel();
                            }
                        }
                    }
                });
            }
        });

        let mut failed = failure.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(error) = failed.take() {
            return Err(error);
        }
        drop(failed);

        let mut indexed =
            produced.into_inner().unwrap_or_else(PoisonError::into_inner);
        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, profile)| profile).collect())
    }

    /// Runs the sequential pipeline for one outcome.
    ///
    /// Returns `Ok(None)` for ineligible outcomes and degenerate cohorts.
    fn run_outcome(
        &self,
        benchmark_id: BenchmarkId,
        outcome: Outcome,
        baselines: &BaselineAverages,
        cancel: &CancelToken,
    ) -> Result<Option<TopPerformerProfile>, EngineError> {
        let Some(threshold) = compute_threshold(&self.source, benchmark_id, outcome)? else {
            tracing::debug!(%benchmark_id, %outcome, min = MIN_SAMPLE_SIZE, "outcome ineligible");
            return Ok(None);
        };

        let aggregator =
            ChunkedAggregator::new(&self.source, self.config.page_size.max(1));
        let accumulators = aggregator.stream(benchmark_id, &threshold, cancel)?;

        let common_patterns =
            mine_patterns(&accumulators.competency_pairs, accumulators.top_performer_count);
        let talent_patterns =
            mine_patterns(&accumulators.talent_pairs, accumulators.top_performer_count);

        let profile = assemble_profile(
            benchmark_id,
            &threshold,
            baselines,
            &accumulators,
            common_patterns,
            talent_patterns,
        );
        if profile.is_none() {
            tracing::debug!(
                %benchmark_id,
                %outcome,
                sample_size = accumulators.top_performer_count,
                "degenerate cohort discarded"
            );
        }
        Ok(profile)
    }
}
