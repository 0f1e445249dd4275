// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite-specific backend utilities.
//!
//! This module is limited to:
//! - Connection initialization
//! - Migration execution
//! - SQLite-specific configuration (PRAGMA statements)
//! - Catalog inspection (`sqlite_master`)

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Star-schema migrations, embedded at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Tables every loader and aggregator operation depends on.
const STAR_SCHEMA_TABLES: [&str; 3] = ["dim_station", "dim_time", "fact_charging"];

/// Helper row struct for PRAGMA queries.
///
/// This is a justified use of raw SQL as Diesel has no PRAGMA DSL.
#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Helper row struct for catalog queries.
#[derive(QueryableByName)]
struct TableCountRow {
    #[diesel(sql_type = BigInt)]
    table_count: i64,
}

/// Verifies that foreign key enforcement is enabled.
///
/// Referential integrity between facts and dimensions is enforced by the
/// database, so a connection without it cannot be used.
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    let foreign_keys_enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaRow>(conn)?
        .foreign_keys;

    if foreign_keys_enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    debug!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Run pending migrations on the provided connection.
///
/// Already-applied migrations are skipped, so this is safe to call on a
/// store that is already initialized.
///
/// # Errors
///
/// Returns an error if migration execution fails.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    info!(applied = applied.len(), "Applied star schema migrations");
    Ok(())
}

/// Returns whether all star-schema tables exist.
///
/// # Errors
///
/// Returns an error if the catalog cannot be queried.
pub fn star_schema_present(conn: &mut SqliteConnection) -> Result<bool, PersistenceError> {
    // NOTE: catalog lookup is raw SQL (justified - Diesel has no sqlite_master DSL)
    let row: TableCountRow = diesel::sql_query(
        "SELECT COUNT(*) AS table_count FROM sqlite_master \
         WHERE type = 'table' AND name IN ('dim_station', 'dim_time', 'fact_charging')",
    )
    .get_result(conn)?;

    Ok(usize::try_from(row.table_count).is_ok_and(|count| count == STAR_SCHEMA_TABLES.len()))
}

/// Open a `SQLite` connection with foreign key enforcement enabled.
///
/// No tables are created; see [`run_migrations`].
///
/// # Arguments
///
/// * `database_url` - The `SQLite` database URL (e.g., a shared in-memory URL or file path)
///
/// # Errors
///
/// Returns an error if the connection cannot be established or configured.
pub fn establish(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!("Opening SQLite store at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

    Ok(conn)
}

/// Enable WAL mode for file-based `SQLite` databases.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(())
}
