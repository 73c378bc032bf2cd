//! Database connection and schema management.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use tracing::info;

use crate::storage::error::{StorageError, StorageResult};

/// Database connection wrapper.
///
/// Manages the SQLite connection and schema initialization. The connection sits
/// behind a mutex so one `Database` can be shared by every request handler.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Opens a new database connection at the specified path.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    ///
    /// # Errors
    /// * `StorageError::Connection` - If the database connection fails
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        let db = Self { conn: Mutex::new(conn) };
        db.init_schema()?;
        Ok(db)
    }

    /// Opens an in-memory database for testing.
    ///
    /// # Errors
    /// * `StorageError::Connection` - If the database connection fails
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn: Mutex::new(conn) };
        db.init_schema()?;
        Ok(db)
    }

    /// Locks and returns the underlying connection.
    ///
    /// # Errors
    /// * `StorageError::LockPoisoned` - If a previous holder panicked
    pub fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Creates the jobs, job_artifacts, and config tables.
    fn init_schema(&self) -> StorageResult<()> {
        info!("Initializing database schema");
        let conn = self.conn()?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id INTEGER PRIMARY KEY,
                engine_type TEXT NOT NULL
            )
            "#,
            [],
        )?;

        // One row per (job, data type); the training pipeline overwrites in place.
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS job_artifacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                job_id INTEGER NOT NULL,
                data_type TEXT NOT NULL DEFAULT '',
                data TEXT NOT NULL DEFAULT '{}',
                created_at TEXT NOT NULL,
                UNIQUE (job_id, data_type)
            )
            "#,
            [],
        )?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS config (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                config_type TEXT NOT NULL,
                config_key TEXT NOT NULL,
                config_val TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (config_type, config_key)
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_job_artifacts_job_id ON job_artifacts(job_id)",
            [],
        )?;

        Ok(())
    }
}
