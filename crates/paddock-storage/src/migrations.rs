//! Database schema migrations.
//!
//! Creates the `races` and `sports` tables plus the schema_migrations
//! bookkeeping table. Column order matches the list and by-id templates.

use rusqlite::Connection;
use tracing::info;

use paddock_core::error::PaddockError;

/// Run all pending database migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), PaddockError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| PaddockError::Storage(format!("Failed to create migrations table: {}", e)))?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| PaddockError::Storage(format!("Failed to query migration version: {}", e)))?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: listing_tables");
    }

    Ok(())
}

/// Version 1: races and sports tables.
fn apply_v1(conn: &Connection) -> Result<(), PaddockError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS races (
            id                      INTEGER PRIMARY KEY,
            meeting_id              INTEGER,
            name                    TEXT,
            number                  INTEGER,
            visible                 INTEGER,
            advertised_start_time   DATETIME
        );

        CREATE TABLE IF NOT EXISTS sports (
            id                      INTEGER PRIMARY KEY,
            meeting_id              INTEGER,
            name                    TEXT,
            number                  INTEGER,
            visible                 INTEGER,
            home_team               TEXT,
            away_team               TEXT,
            advertised_start_time   DATETIME,
            betting_closed_time     DATETIME
        );

        INSERT INTO schema_migrations (version, name) VALUES (1, 'listing_tables');
        ",
    )
    .map_err(|e| PaddockError::Storage(format!("Migration v1 failed: {}", e)))?;

    Ok(())
}
