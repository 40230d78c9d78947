// crates/talent-bench-store-sqlite/src/lib.rs
// ============================================================================
// Module: Talent Bench SQLite Store
// Description: SQLite-backed DataSource and ProfileStore implementations.
// Purpose: Provide a durable single-file backend for benchmark profiling.
// Dependencies: talent-bench-core, rusqlite, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This crate implements the engine's record-access and profile-output
//! interfaces over a single `SQLite` database file. Assessment scores live in
//! one `REAL` column per attribute (NULL = "not answered") so the four access
//! operations map directly onto `COUNT`, `ORDER BY ... OFFSET`, filtered
//! scans, and `AVG`. The profile replace is one transaction: delete then bulk
//! insert, never two independent calls.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteBenchmarkStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
