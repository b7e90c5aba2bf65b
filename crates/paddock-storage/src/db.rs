//! Database connection management.
//!
//! Wraps a single rusqlite Connection in a Mutex for thread-safe access.
//! Concurrent listing calls serialize on the mutex.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::info;

use paddock_core::config::StoreConfig;
use paddock_core::error::PaddockError;

use crate::migrations;

/// Thread-safe SQLite database wrapper.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a database at the given path.
    ///
    /// Configures WAL mode and runs all pending migrations.
    pub fn new(path: &Path) -> Result<Self, PaddockError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| PaddockError::Storage(format!("Failed to open database: {}", e)))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| PaddockError::Storage(format!("Failed to set pragmas: {}", e)))?;

        info!("Database opened at {}", path.display());

        Self::migrated(conn)
    }

    /// Open an in-memory database.
    pub fn in_memory() -> Result<Self, PaddockError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| PaddockError::Storage(format!("Failed to open in-memory db: {}", e)))?;

        Self::migrated(conn)
    }

    /// Open the database a store section points at.
    pub fn from_config(config: &StoreConfig) -> Result<Self, PaddockError> {
        if config.is_in_memory() {
            Self::in_memory()
        } else {
            Self::new(Path::new(&config.db_path))
        }
    }

    fn migrated(conn: Connection) -> Result<Self, PaddockError> {
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.with_conn(migrations::run_migrations)?;
        Ok(db)
    }

    /// Execute a closure with a reference to the underlying connection.
    ///
    /// The mutex is held for the duration of the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, PaddockError>
    where
        F: FnOnce(&Connection) -> Result<T, PaddockError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| PaddockError::Storage(format!("Database lock poisoned: {}", e)))?;
        f(&conn)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}
