// crates/talent-bench-core/src/runtime/mod.rs
// ============================================================================
// Module: Talent Bench Runtime
// Description: Statistical engine stages and orchestration.
// Purpose: Wire threshold, baseline, aggregation, mining, and assembly into
// one idempotent batch job per invocation.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime implements the per-outcome pipeline: percentile threshold,
//! chunked streaming aggregation, pattern mining, and profile assembly, plus
//! the engine orchestrator that runs pipelines over a bounded worker pool and
//! atomically replaces the benchmark's profile set at the end.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod aggregate;
pub mod assemble;
pub mod baseline;
pub mod engine;
pub mod memory;
pub mod patterns;
pub mod threshold;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use aggregate::AttributeAccumulator;
pub use aggregate::ChunkedAggregator;
pub use aggregate::CohortAccumulators;
pub use aggregate::PairAccumulator;
pub use assemble::assemble_profile;
pub use baseline::compute_baselines;
pub use engine::CancelToken;
pub use engine::Engine;
pub use engine::EngineConfig;
pub use engine::EngineError;
pub use memory::InMemoryDataSource;
pub use memory::InMemoryProfileStore;
pub use patterns::mine_patterns;
pub use threshold::compute_threshold;
