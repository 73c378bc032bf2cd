//! Repository implementations for data persistence.
//!
//! Read access to training jobs and their artifact records, plus the
//! configuration key/value store, using SQLite as the backing store. The
//! write methods exist for the training side and for seeding.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use modelpack_training::{ArtifactDataType, ArtifactRecord, EngineType, JobId, JobRecord};
use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::storage::database::Database;
use crate::storage::error::{StorageError, StorageResult};

/// `config_type` used for values seeded by the system rather than edited by users.
pub const CONFIG_TYPE_SYSTEM: &str = "system";

// ============================================================================
// Repository Traits
// ============================================================================

/// Repository trait for training job lookups.
pub trait JobRepository: Send + Sync {
    /// Retrieves a job by ID, `None` if it does not exist.
    fn fetch_job(&self, job_id: JobId) -> StorageResult<Option<JobRecord>>;

    /// Inserts or replaces a job.
    fn upsert_job(&self, job: &JobRecord) -> StorageResult<()>;
}

/// Repository trait for artifact records attached to jobs.
pub trait ArtifactRepository: Send + Sync {
    /// Retrieves the record of `data_type` for a job, `None` if absent.
    fn fetch_artifact_record(
        &self,
        job_id: JobId,
        data_type: ArtifactDataType,
    ) -> StorageResult<Option<ArtifactRecord>>;

    /// Inserts a record, replacing any existing one for the same job and data type.
    fn upsert_artifact_record(&self, record: &ArtifactRecord) -> StorageResult<()>;
}

/// Key/value configuration store.
pub trait ConfigStore: Send + Sync {
    /// Looks up a value by key across all config types.
    fn get_string(&self, key: &str) -> StorageResult<Option<String>>;

    /// Inserts or updates a value.
    fn set_string(&self, config_type: &str, key: &str, value: &str) -> StorageResult<()>;
}

// ============================================================================
// Row Parsing Helpers
// ============================================================================

/// Parses an RFC3339 timestamp string into a `DateTime<Utc>`.
fn parse_timestamp(value: &str, column_name: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::InvalidData(format!("{column_name}: {e}")))
}

// ============================================================================
// SQLite Job Repository
// ============================================================================

/// SQLite implementation of JobRepository.
pub struct SqliteJobRepository {
    db: Arc<Database>,
}

impl SqliteJobRepository {
    /// Creates a new SQLite job repository.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl JobRepository for SqliteJobRepository {
    fn fetch_job(&self, job_id: JobId) -> StorageResult<Option<JobRecord>> {
        let engine_tag: Option<String> = self
            .db
            .conn()?
            .query_row("SELECT engine_type FROM jobs WHERE id = ?1", params![job_id.0], |row| {
                row.get(0)
            })
            .optional()?;

        let Some(engine_tag) = engine_tag else {
            return Ok(None);
        };
        let engine_type = engine_tag.parse::<EngineType>()?;
        Ok(Some(JobRecord::new(job_id, engine_type)))
    }

    fn upsert_job(&self, job: &JobRecord) -> StorageResult<()> {
        self.db.conn()?.execute(
            "INSERT INTO jobs (id, engine_type) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET engine_type = excluded.engine_type",
            params![job.id.0, job.engine_type.as_str()],
        )?;
        debug!(job_id = %job.id, engine_type = %job.engine_type, "Upserted job");
        Ok(())
    }
}

// ============================================================================
// SQLite Artifact Repository
// ============================================================================

/// SQLite implementation of ArtifactRepository.
pub struct SqliteArtifactRepository {
    db: Arc<Database>,
}

impl SqliteArtifactRepository {
    /// Creates a new SQLite artifact repository.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl ArtifactRepository for SqliteArtifactRepository {
    fn fetch_artifact_record(
        &self,
        job_id: JobId,
        data_type: ArtifactDataType,
    ) -> StorageResult<Option<ArtifactRecord>> {
        let row: Option<(String, String)> = self
            .db
            .conn()?
            .query_row(
                "SELECT data, created_at FROM job_artifacts
                 WHERE job_id = ?1 AND data_type = ?2
                 ORDER BY id LIMIT 1",
                params![job_id.0, data_type.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((data, created_at)) = row else {
            return Ok(None);
        };
        Ok(Some(ArtifactRecord {
            job_id,
            data_type,
            data,
            created_at: parse_timestamp(&created_at, "created_at")?,
        }))
    }

    fn upsert_artifact_record(&self, record: &ArtifactRecord) -> StorageResult<()> {
        self.db.conn()?.execute(
            "INSERT INTO job_artifacts (job_id, data_type, data, created_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(job_id, data_type) DO UPDATE SET data = excluded.data",
            params![
                record.job_id.0,
                record.data_type.as_str(),
                record.data,
                record.created_at.to_rfc3339()
            ],
        )?;
        debug!(job_id = %record.job_id, data_type = %record.data_type, "Upserted artifact record");
        Ok(())
    }
}

// ============================================================================
// SQLite Config Store
// ============================================================================

/// SQLite implementation of ConfigStore over the `config` table.
pub struct SqliteConfigStore {
    db: Arc<Database>,
}

impl SqliteConfigStore {
    /// Creates a new SQLite config store.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl ConfigStore for SqliteConfigStore {
    fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        let value: Option<String> = self
            .db
            .conn()?
            .query_row(
                "SELECT config_val FROM config WHERE config_key = ?1 ORDER BY id LIMIT 1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_string(&self, config_type: &str, key: &str, value: &str) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.db.conn()?.execute(
            "INSERT INTO config (config_type, config_key, config_val, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(config_type, config_key)
             DO UPDATE SET config_val = excluded.config_val, updated_at = excluded.updated_at",
            params![config_type, key, value, now],
        )?;
        debug!(config_type, key, "Stored config value");
        Ok(())
    }
}
