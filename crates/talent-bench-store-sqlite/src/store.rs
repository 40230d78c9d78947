// crates/talent-bench-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Benchmark Store
// Description: Durable DataSource and ProfileStore backed by SQLite.
// Purpose: Persist assessment records and profile sets with transactional
// replace semantics.
// Dependencies: talent-bench-core, rusqlite, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The store keeps one row per assessed individual in `assessments` with one
//! nullable `REAL` column per taxonomy attribute, and one row per
//! `(benchmark, outcome)` profile in `profiles` as canonical JSON. Loads and
//! scans are ordered by `record_id` so pagination is stable for identical
//! stored data. The profile replace (delete + bulk insert) commits as a
//! single transaction; partial failure rolls back and surfaces as an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;
use rusqlite::params_from_iter;
use rusqlite::types::Value as SqlValue;
use serde::Deserialize;
use talent_bench_core::AssessmentRecord;
use talent_bench_core::Attribute;
use talent_bench_core::BenchmarkId;
use talent_bench_core::CoreCompetency;
use talent_bench_core::DataSource;
use talent_bench_core::DataSourceError;
use talent_bench_core::MacroCompetency;
use talent_bench_core::Outcome;
use talent_bench_core::ProfileStore;
use talent_bench_core::ProfileStoreError;
use talent_bench_core::Talent;
use talent_bench_core::TopPerformerProfile;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Total number of score columns in the `assessments` table.
const SCORE_COLUMN_COUNT: usize =
    MacroCompetency::COUNT + CoreCompetency::COUNT + Talent::COUNT + Outcome::COUNT;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` benchmark store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Creates a configuration with defaults for the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Invalid store data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
}

impl From<rusqlite::Error> for SqliteStoreError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Db(error.to_string())
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Durable benchmark store backed by a single `SQLite` database.
///
/// # Invariants
/// - The connection is serialized behind a mutex, so the store is shareable
///   across engine workers.
/// - Scans are ordered by `record_id` and stable for identical stored data.
#[derive(Debug)]
pub struct SqliteBenchmarkStore {
    /// Serialized `SQLite` connection.
    connection: Mutex<Connection>,
}

impl SqliteBenchmarkStore {
    /// Opens (or creates) the store at the configured path.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or the
    /// schema cannot be initialized.
    pub fn open(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        let mut connection = Connection::open(&config.path)
            .map_err(|error| SqliteStoreError::Io(error.to_string()))?;
        connection
            .execute_batch(&format!(
                "PRAGMA journal_mode = {};",
                config.journal_mode.pragma_value()
            ))
            .map_err(SqliteStoreError::from)?;
        connection
            .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
            .map_err(SqliteStoreError::from)?;
        connection
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
            .map_err(SqliteStoreError::from)?;
        initialize_schema(&mut connection)?;
        Ok(Self { connection: Mutex::new(connection) })
    }

    /// Opens a fresh in-memory store (tests and embedded use).
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the schema cannot be initialized.
    pub fn in_memory() -> Result<Self, SqliteStoreError> {
        let mut connection =
            Connection::open_in_memory().map_err(SqliteStoreError::from)?;
        initialize_schema(&mut connection)?;
        Ok(Self { connection: Mutex::new(connection) })
    }

    /// Bulk-inserts assessment records for a benchmark.
    ///
    /// Record identifiers continue from the highest existing identifier, so
    /// repeated ingestion keeps the scan order stable.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the insert cannot be committed.
    pub fn insert_assessments(
        &self,
        benchmark_id: BenchmarkId,
        records: &[AssessmentRecord],
    ) -> Result<(), SqliteStoreError> {
        let benchmark = to_sql_id(benchmark_id)
            .map_err(|error| SqliteStoreError::Invalid(error.to_string()))?;
        let mut guard = self.lock();
        let tx = guard.transaction().map_err(SqliteStoreError::from)?;

        let mut next_id: i64 = tx
            .query_row(
                "SELECT COALESCE(MAX(record_id), 0) FROM assessments WHERE benchmark_id = ?1",
                params![benchmark],
                |row| row.get(0),
            )
            .map_err(SqliteStoreError::from)?;

        let sql = insert_assessment_sql();
        {
            let mut statement = tx.prepare(&sql).map_err(SqliteStoreError::from)?;
            for record in records {
                next_id += 1;
                let mut values: Vec<SqlValue> =
                    Vec::with_capacity(SCORE_COLUMN_COUNT + 2);
                values.push(SqlValue::Integer(benchmark));
                values.push(SqlValue::Integer(next_id));
                push_scores(&mut values, record);
                statement
                    .execute(params_from_iter(values))
                    .map_err(SqliteStoreError::from)?;
            }
        }

        tx.commit().map_err(SqliteStoreError::from)
    }

    /// Loads the persisted profile set for a benchmark in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when loading or deserialization fails.
    pub fn load_profiles(
        &self,
        benchmark_id: BenchmarkId,
    ) -> Result<Vec<TopPerformerProfile>, SqliteStoreError> {
        let benchmark = to_sql_id(benchmark_id)
            .map_err(|error| SqliteStoreError::Invalid(error.to_string()))?;
        let guard = self.lock();
        let mut statement = guard
            .prepare(
                "SELECT profile_json FROM profiles WHERE benchmark_id = ?1 ORDER BY rowid",
            )
            .map_err(SqliteStoreError::from)?;
        let rows = statement
            .query_map(params![benchmark], |row| row.get::<_, Vec<u8>>(0))
            .map_err(SqliteStoreError::from)?;

        let mut profiles = Vec::new();
        for row in rows {
            let bytes = row.map_err(SqliteStoreError::from)?;
            let profile = serde_json::from_slice(&bytes)
                .map_err(|error| SqliteStoreError::Invalid(error.to_string()))?;
            profiles.push(profile);
        }
        Ok(profiles)
    }

    /// Locks the connection, recovering from poisoned locks.
    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.connection.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// SECTION: Data Source Implementation
// ============================================================================

impl DataSource for SqliteBenchmarkStore {
    fn count_non_null(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
    ) -> Result<u64, DataSourceError> {
        let benchmark = to_sql_id(benchmark_id)?;
        let column = attribute.column();
        let sql =
            format!("SELECT COUNT({column}) FROM assessments WHERE benchmark_id = ?1");
        let count: i64 = self
            .lock()
            .query_row(&sql, params![benchmark], |row| row.get(0))
            .map_err(|error| DataSourceError::Io(error.to_string()))?;
        u64::try_from(count)
            .map_err(|_| DataSourceError::Invalid(format!("negative count: {count}")))
    }

    fn value_at_ascending_rank(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
        rank: u64,
    ) -> Result<Option<f64>, DataSourceError> {
        let benchmark = to_sql_id(benchmark_id)?;
        let offset = i64::try_from(rank)
            .map_err(|_| DataSourceError::Invalid(format!("rank out of range: {rank}")))?;
        let column = attribute.column();
        let sql = format!(
            "SELECT {column} FROM assessments \
             WHERE benchmark_id = ?1 AND {column} IS NOT NULL \
             ORDER BY {column} ASC LIMIT 1 OFFSET ?2"
        );
        self.lock()
            .query_row(&sql, params![benchmark, offset], |row| row.get(0))
            .optional()
            .map_err(|error| DataSourceError::Io(error.to_string()))
    }

    fn scan_top_performers(
        &self,
        benchmark_id: BenchmarkId,
        outcome: Outcome,
        threshold: f64,
        page_offset: usize,
        page_size: usize,
    ) -> Result<Vec<AssessmentRecord>, DataSourceError> {
        let benchmark = to_sql_id(benchmark_id)?;
        let offset = i64::try_from(page_offset).map_err(|_| {
            DataSourceError::Invalid(format!("page offset out of range: {page_offset}"))
        })?;
        let limit = i64::try_from(page_size).map_err(|_| {
            DataSourceError::Invalid(format!("page size out of range: {page_size}"))
        })?;
        let columns = score_columns().join(", ");
        let filter = outcome.key();
        let sql = format!(
            "SELECT {columns} FROM assessments \
             WHERE benchmark_id = ?1 AND {filter} >= ?2 \
             ORDER BY record_id ASC LIMIT ?3 OFFSET ?4"
        );

        let guard = self.lock();
        let mut statement =
            guard.prepare(&sql).map_err(|error| DataSourceError::Io(error.to_string()))?;
        let rows = statement
            .query_map(params![benchmark, threshold, limit, offset], record_from_row)
            .map_err(|error| DataSourceError::Io(error.to_string()))?;

        let mut page = Vec::new();
        for row in rows {
            page.push(row.map_err(|error| DataSourceError::Io(error.to_string()))?);
        }
        Ok(page)
    }

    fn mean_non_null(
        &self,
        benchmark_id: BenchmarkId,
        attribute: Attribute,
    ) -> Result<f64, DataSourceError> {
        let benchmark = to_sql_id(benchmark_id)?;
        let column = attribute.column();
        let sql = format!("SELECT AVG({column}) FROM assessments WHERE benchmark_id = ?1");
        let mean: Option<f64> = self
            .lock()
            .query_row(&sql, params![benchmark], |row| row.get(0))
            .map_err(|error| DataSourceError::Io(error.to_string()))?;
        // AVG over zero non-null observations is NULL; the interface contract
        // flattens that to a 0.0 baseline.
        Ok(mean.unwrap_or_default())
    }
}

// ============================================================================
// SECTION: Profile Store Implementation
// ============================================================================

impl ProfileStore for SqliteBenchmarkStore {
    fn replace_profiles(
        &self,
        benchmark_id: BenchmarkId,
        profiles: &[TopPerformerProfile],
    ) -> Result<(), ProfileStoreError> {
        let benchmark = to_sql_id(benchmark_id)
            .map_err(|error| ProfileStoreError::Invalid(error.to_string()))?;
        let mut guard = self.lock();
        let tx = guard
            .transaction()
            .map_err(|error| ProfileStoreError::Io(error.to_string()))?;

        tx.execute("DELETE FROM profiles WHERE benchmark_id = ?1", params![benchmark])
            .map_err(|error| ProfileStoreError::Io(error.to_string()))?;
        {
            let mut statement = tx
                .prepare(
                    "INSERT INTO profiles (benchmark_id, outcome, profile_json) \
                     VALUES (?1, ?2, ?3)",
                )
                .map_err(|error| ProfileStoreError::Io(error.to_string()))?;
            for profile in profiles {
                let bytes = serde_json::to_vec(profile)
                    .map_err(|error| ProfileStoreError::Invalid(error.to_string()))?;
                statement
                    .execute(params![benchmark, profile.outcome.key(), bytes])
                    .map_err(|error| ProfileStoreError::Io(error.to_string()))?;
            }
        }

        tx.commit().map_err(|error| ProfileStoreError::Io(error.to_string()))
    }
}

// ============================================================================
// SECTION: Schema and Row Mapping
// ============================================================================

/// Initializes the schema, creating tables on first open and verifying the
/// stored version otherwise.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(SqliteStoreError::from)?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(SqliteStoreError::from)?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(SqliteStoreError::from)?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(SqliteStoreError::from)?;
            let score_columns = score_columns()
                .iter()
                .map(|column| format!("{column} REAL"))
                .collect::<Vec<_>>()
                .join(",\n                    ");
            tx.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS assessments (
                    benchmark_id INTEGER NOT NULL,
                    record_id INTEGER NOT NULL,
                    {score_columns},
                    PRIMARY KEY (benchmark_id, record_id)
                );
                CREATE INDEX IF NOT EXISTS idx_assessments_benchmark
                    ON assessments (benchmark_id);
                CREATE TABLE IF NOT EXISTS profiles (
                    benchmark_id INTEGER NOT NULL,
                    outcome TEXT NOT NULL,
                    profile_json BLOB NOT NULL,
                    PRIMARY KEY (benchmark_id, outcome)
                );"
            ))
            .map_err(SqliteStoreError::from)?;
        }
        Some(found) if found == SCHEMA_VERSION => {}
        Some(found) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "expected {SCHEMA_VERSION}, found {found}"
            )));
        }
    }
    tx.commit().map_err(SqliteStoreError::from)
}

/// Returns every score column name in taxonomy declaration order.
fn score_columns() -> Vec<&'static str> {
    let mut columns = Vec::with_capacity(SCORE_COLUMN_COUNT);
    columns.extend(MacroCompetency::ALL.iter().map(|competency| competency.column()));
    columns.extend(CoreCompetency::ALL.iter().map(|competency| competency.column()));
    columns.extend(Talent::ALL.iter().map(|talent| talent.column()));
    columns.extend(Outcome::ALL.iter().map(|outcome| outcome.key()));
    columns
}

/// Builds the parameterized insert statement for one assessment row.
fn insert_assessment_sql() -> String {
    let columns = score_columns().join(", ");
    let placeholders = (1..=SCORE_COLUMN_COUNT + 2)
        .map(|position| format!("?{position}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO assessments (benchmark_id, record_id, {columns}) VALUES ({placeholders})")
}

/// Appends a record's scores as SQL values in column order.
fn push_scores(values: &mut Vec<SqlValue>, record: &AssessmentRecord) {
    let scores = record
        .macro_scores
        .iter()
        .chain(&record.core_scores)
        .chain(&record.talent_scores)
        .chain(&record.outcome_scores);
    for score in scores {
        values.push(score.map_or(SqlValue::Null, SqlValue::Real));
    }
}

/// Maps one scanned row back into an assessment record.
///
/// Column order matches [`score_columns`].
fn record_from_row(row: &Row<'_>) -> Result<AssessmentRecord, rusqlite::Error> {
    let mut record = AssessmentRecord::default();
    let mut position = 0;
    for slot in &mut record.macro_scores {
        *slot = row.get(position)?;
        position += 1;
    }
    for slot in &mut record.core_scores {
        *slot = row.get(position)?;
        position += 1;
    }
    for slot in &mut record.talent_scores {
        *slot = row.get(position)?;
        position += 1;
    }
    for slot in &mut record.outcome_scores {
        *slot = row.get(position)?;
        position += 1;
    }
    Ok(record)
}

/// Converts a benchmark identifier into an `SQLite` integer key.
fn to_sql_id(benchmark_id: BenchmarkId) -> Result<i64, DataSourceError> {
    i64::try_from(benchmark_id.get()).map_err(|_| {
        DataSourceError::Invalid(format!("benchmark id out of range: {benchmark_id}"))
    })
}
