// crates/talent-bench-core/src/runtime/aggregate.rs
// ============================================================================
// Module: Chunked Cohort Aggregator
// Description: Bounded-memory streaming aggregation over the top-performer set.
// Purpose: Maintain running attribute averages and pair co-occurrence counters
// without holding the full cohort in memory.
// Dependencies: crate::core, crate::interfaces, tracing
// ============================================================================

//! ## Overview
//! The aggregator streams the top-performer subset for one outcome in
//! fixed-size pages. Per record it updates null-safe `{sum, count}`
//! accumulators for every competency and talent, increments the cohort count,
//! and feeds the record's top-3 core competencies and top-3 talents into
//! unordered pair co-occurrence counters.
//!
//! Invariants:
//! - Accumulator state is owned by one pipeline invocation and returned, not
//!   shared; nothing leaks across concurrent outcome pipelines.
//! - Streaming stops on an empty page or a short page (end-of-data without an
//!   extra round trip).
//! - Cancellation is checked between page fetches; partial accumulators are
//!   discarded without side effects.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::identifiers::BenchmarkId;
use crate::core::profile::PatternKey;
use crate::core::profile::PercentileThreshold;
use crate::core::profile::TOP_ATTRIBUTES_PER_RECORD;
use crate::core::record::AssessmentRecord;
use crate::core::taxonomy::CoreCompetency;
use crate::core::taxonomy::MacroCompetency;
use crate::core::taxonomy::Talent;
use crate::interfaces::DataSource;
use crate::runtime::engine::CancelToken;
use crate::runtime::engine::EngineError;

// ============================================================================
// SECTION: Accumulators
// ============================================================================

/// Null-safe running `{sum, count}` for one attribute.
///
/// # Invariants
/// - A null score contributes to neither the sum nor the count.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttributeAccumulator {
    /// Running sum of non-null scores.
    sum: f64,
    /// Count of non-null scores.
    count: u32,
}

impl AttributeAccumulator {
    /// Folds one optional score into the accumulator.
    pub const fn observe(&mut self, score: Option<f64>) {
        if let Some(value) = score {
            self.sum += value;
            self.count += 1;
        }
    }

    /// Returns the mean of observed scores, or `None` when nothing was observed.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }

    /// Returns the count of non-null observations.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }
}

/// Running co-occurrence statistics for one unordered attribute pair.
///
/// # Invariants
/// - `outcome_sum` accumulates the streamed record's outcome score once per
///   increment of `count`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PairAccumulator {
    /// Number of cohort records exhibiting the pair.
    pub count: u32,
    /// Sum of outcome scores across those records.
    pub outcome_sum: f64,
}

/// Owned aggregation state for one outcome pipeline.
///
/// # Invariants
/// - `top_performer_count` counts every streamed record, even records that
///   contribute to no attribute accumulator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortAccumulators {
    /// Realized top-performer count.
    pub top_performer_count: u32,
    /// Macro competency accumulators (K, C, G).
    pub macros: [AttributeAccumulator; MacroCompetency::COUNT],
    /// Core competency accumulators in declaration order.
    pub cores: [AttributeAccumulator; CoreCompetency::COUNT],
    /// Talent accumulators in declaration order.
    pub talents: [AttributeAccumulator; Talent::COUNT],
    /// Co-occurrence counters for core competency pairs.
    pub competency_pairs: BTreeMap<PatternKey, PairAccumulator>,
    /// Co-occurrence counters for talent pairs.
    pub talent_pairs: BTreeMap<PatternKey, PairAccumulator>,
}

impl CohortAccumulators {
    /// Folds one streamed record into the aggregation state.
    pub fn observe_record(&mut self, record: &AssessmentRecord, outcome_value: f64) {
        self.top_performer_count += 1;

        for competency in MacroCompetency::ALL {
            self.macros[competency.index()].observe(record.macro_score(competency));
        }
        for competency in CoreCompetency::ALL {
            self.cores[competency.index()].observe(record.core_score(competency));
        }
        for talent in Talent::ALL {
            self.talents[talent.index()].observe(record.talent_score(talent));
        }

        let top_competencies = top_ranked(
            CoreCompetency::ALL.iter().map(|competency| {
                (competency.code(), record.core_score(*competency))
            }),
        );
        count_pairs(&top_competencies, outcome_value, &mut self.competency_pairs);

        let top_talents = top_ranked(
            Talent::ALL.iter().map(|talent| (talent.code(), record.talent_score(*talent))),
        );
        count_pairs(&top_talents, outcome_value, &mut self.talent_pairs);
    }
}

/// Selects a record's top-ranked non-null attributes by score descending.
///
/// The sort is stable, so attributes tying on score keep their taxonomy
/// declaration order and the selection is deterministic for identical input.
fn top_ranked(
    scores: impl Iterator<Item = (&'static str, Option<f64>)>,
) -> Vec<(&'static str, f64)> {
    let mut present: Vec<(&'static str, f64)> =
        scores.filter_map(|(code, score)| score.map(|value| (code, value))).collect();
    present.sort_by(|left, right| right.1.total_cmp(&left.1));
    present.truncate(TOP_ATTRIBUTES_PER_RECORD);
    present
}

/// Increments every unordered pair among the top-ranked attribute set.
fn count_pairs(
    top: &[(&'static str, f64)],
    outcome_value: f64,
    counters: &mut BTreeMap<PatternKey, PairAccumulator>,
) {
    for (left_index, (left_code, _)) in top.iter().enumerate() {
        for (right_code, _) in &top[left_index + 1..] {
            let entry = counters
                .entry(PatternKey::from_codes(left_code, right_code))
                .or_default();
            entry.count += 1;
            entry.outcome_sum += outcome_value;
        }
    }
}

// ============================================================================
// SECTION: Chunked Aggregator
// ============================================================================

/// Streams one outcome's top-performer subset in bounded pages.
///
/// # Invariants
/// - At most `page_size` records are held in memory at a time.
#[derive(Debug, Clone, Copy)]
pub struct ChunkedAggregator<'a, D: DataSource + ?Sized> {
    /// Read-only record source.
    source: &'a D,
    /// Fixed page size for the scan.
    page_size: usize,
}

impl<'a, D: DataSource + ?Sized> ChunkedAggregator<'a, D> {
    /// Creates an aggregator over the given source with the given page size.
    #[must_use]
    pub const fn new(source: &'a D, page_size: usize) -> Self {
        Self { source, page_size }
    }

    /// Streams every record at or above the threshold and returns the owned
    /// aggregation state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DataAccess`] on page fetch failure and
    /// [`EngineError::Cancelled`] when the token is cancelled between pages;
    /// partial accumulators are discarded in both cases.
    pub fn stream(
        &self,
        benchmark_id: BenchmarkId,
        threshold: &PercentileThreshold,
        cancel: &CancelToken,
    ) -> Result<CohortAccumulators, EngineError> {
        let mut accumulators = CohortAccumulators::default();
        let mut page_offset = 0_usize;

        loop {
            if cancel.is_cancelled() {
                return Err(EngineError::Cancelled);
            }

            let page = self.source.scan_top_performers(
                benchmark_id,
                threshold.outcome,
                threshold.value,
                page_offset,
                self.page_size,
            )?;
            let fetched = page.len();

            for record in &page {
                let outcome_value =
                    record.outcome_score(threshold.outcome).unwrap_or_default();
                accumulators.observe_record(record, outcome_value);
            }

            tracing::trace!(
                outcome = %threshold.outcome,
                page_offset,
                fetched,
                "aggregated page"
            );

            // A short page signals end-of-data without an extra round trip.
            if fetched == 0 || fetched < self.page_size {
                break;
            }
            page_offset += fetched;
        }

        Ok(accumulators)
    }
}
