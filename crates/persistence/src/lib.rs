// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Star-schema persistence for the EV charging reliability pipeline.
//!
//! This crate owns every persisted row. It is built on Diesel over `SQLite`
//! and exposes three groups of operations on a single [`Persistence`]
//! handle:
//!
//! - **Schema store**: [`Persistence::open`] and [`Persistence::ensure_schema`]
//! - **Loader**: [`Persistence::load_dimensions`] and [`Persistence::load_facts`]
//! - **Aggregator**: [`Persistence::station_kpis`] and [`Persistence::daily_series`]
//!
//! ## Schema
//!
//! | Table | Key | Role |
//! |-------|-----|------|
//! | `dim_station` | `station_id` | station dimension, insert-if-absent |
//! | `dim_time` | `date_key` (`YYYYMMDD`) | time dimension, insert-if-absent |
//! | `fact_charging` | `session_id` | one row per session, upserted |
//!
//! The schema is applied by an embedded Diesel migration made of
//! `CREATE ... IF NOT EXISTS` statements. It is never dropped by normal
//! operation.
//!
//! ## Referential Integrity
//!
//! `fact_charging` declares foreign keys to both dimensions and every
//! connection runs with `PRAGMA foreign_keys = ON`. Loading facts whose
//! station or date key was never loaded into the dimensions fails with
//! [`PersistenceError::ForeignKeyViolation`] and rolls the fact batch back.
//!
//! ## Concurrency
//!
//! A handle is single-writer and performs no locking. Loads must complete
//! before aggregations start; sequencing is the caller's responsibility.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use evcharge_domain::{
    DailyPoint, SessionId, StationDimension, StationKpi, TimeDimension, TransformedRecord,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{DimensionLoadSummary, FactRow};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `open_in_memory()` receives a unique sequential ID so
/// in-memory stores never share state.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Handle on a star-schema store.
///
/// The handle owns its connection; dropping it closes the connection on
/// every exit path, including after a failed load.
pub struct Persistence {
    conn: SqliteConnection,
    /// Set once the star-schema tables have been seen on this connection.
    schema_ready: bool,
}

impl Persistence {
    /// Opens a file-based store, creating the file if needed.
    ///
    /// Foreign key enforcement and WAL mode are enabled. No tables are
    /// created; call [`Persistence::ensure_schema`] before loading.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or configured.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::establish(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn,
            schema_ready: false,
        })
    }

    /// Opens an isolated in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or configured.
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        // Use atomic counter instead of timestamp to eliminate collisions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:evcharge_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::establish(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self {
            conn,
            schema_ready: false,
        })
    }

    /// Creates the star-schema tables if they do not exist.
    ///
    /// Safe to call on an initialized store; existing tables and rows are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the migration cannot be applied.
    pub fn ensure_schema(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::run_migrations(&mut self.conn)?;

        if !backend::sqlite::star_schema_present(&mut self.conn)? {
            return Err(PersistenceError::MigrationFailed(String::from(
                "star schema tables missing after migration",
            )));
        }

        self.schema_ready = true;
        info!("Star schema is ready");
        Ok(())
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Returns the connection once the star schema is known to exist.
    ///
    /// A store initialized by an earlier process passes without a call to
    /// `ensure_schema` on this handle.
    fn schema_conn(&mut self) -> Result<&mut SqliteConnection, PersistenceError> {
        if !self.schema_ready {
            if !backend::sqlite::star_schema_present(&mut self.conn)? {
                return Err(PersistenceError::SchemaNotInitialized);
            }
            self.schema_ready = true;
        }
        Ok(&mut self.conn)
    }

    // ========================================================================
    // Loader
    // ========================================================================

    /// Inserts missing station and time dimension rows for `records`.
    ///
    /// Must run before [`Persistence::load_facts`] for the same records.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::SchemaNotInitialized`] if the schema does
    /// not exist, or a storage error if the batch cannot be written.
    pub fn load_dimensions(
        &mut self,
        records: &[TransformedRecord],
    ) -> Result<DimensionLoadSummary, PersistenceError> {
        mutations::load_dimensions(self.schema_conn()?, records)
    }

    /// Upserts one fact row per record.
    ///
    /// Returns the number of records written.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::SchemaNotInitialized`] if the schema does
    /// not exist, [`PersistenceError::ForeignKeyViolation`] if a record's
    /// dimensions were not loaded first, or a storage error if the batch
    /// cannot be written.
    pub fn load_facts(&mut self, records: &[TransformedRecord]) -> Result<usize, PersistenceError> {
        mutations::load_facts(self.schema_conn()?, records)
    }

    // ========================================================================
    // Aggregator
    // ========================================================================

    /// Reliability KPIs per station, ordered by station id.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema does not exist or the query fails.
    pub fn station_kpis(&mut self) -> Result<Vec<StationKpi>, PersistenceError> {
        queries::station_kpis(self.schema_conn()?)
    }

    /// Mean energy and duration per calendar date, ordered by date.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema does not exist or the query fails.
    pub fn daily_series(&mut self) -> Result<Vec<DailyPoint>, PersistenceError> {
        queries::daily_series(self.schema_conn()?)
    }

    // ========================================================================
    // Table inspection
    // ========================================================================

    /// Number of rows in the station dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema does not exist or the query fails.
    pub fn count_stations(&mut self) -> Result<u64, PersistenceError> {
        queries::count_stations(self.schema_conn()?)
    }

    /// Number of rows in the time dimension.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema does not exist or the query fails.
    pub fn count_dates(&mut self) -> Result<u64, PersistenceError> {
        queries::count_dates(self.schema_conn()?)
    }

    /// Number of rows in the fact table.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema does not exist or the query fails.
    pub fn count_facts(&mut self) -> Result<u64, PersistenceError> {
        queries::count_facts(self.schema_conn()?)
    }

    /// The stored fact for a session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema does not exist or the query fails.
    pub fn get_fact(&mut self, session_id: SessionId) -> Result<Option<FactRow>, PersistenceError> {
        queries::get_fact(self.schema_conn()?, session_id)
    }

    /// The station dimension, ordered by station id.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema does not exist or the query fails.
    pub fn list_stations(&mut self) -> Result<Vec<StationDimension>, PersistenceError> {
        queries::list_stations(self.schema_conn()?)
    }

    /// The time dimension, ordered by date key.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema does not exist or the query fails.
    pub fn list_dates(&mut self) -> Result<Vec<TimeDimension>, PersistenceError> {
        queries::list_dates(self.schema_conn()?)
    }
}
