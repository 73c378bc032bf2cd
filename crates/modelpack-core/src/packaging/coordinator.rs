//! Download orchestration: resolve, plan, archive.

use std::path::PathBuf;
use std::sync::Arc;

use modelpack_training::{JobId, ManifestCandidate, file_name, normalize_path};
use tracing::{info, warn};

use crate::config::{Config, PackagingConfig};
use crate::packaging::archiver::Archiver;
use crate::packaging::cancel::CancelFlag;
use crate::packaging::error::{PackagingError, PackagingResult};
use crate::packaging::planner::BundlePlanner;
use crate::packaging::report::Report;
use crate::packaging::resolver::ArtifactResolver;
use crate::storage::{
    ArtifactRepository, ConfigStore, Database, JobRepository, SqliteArtifactRepository,
    SqliteConfigStore, SqliteJobRepository,
};

/// Builds downloadable model packages.
///
/// Constructed once at startup and shared by reference across request handlers.
pub struct DownloadCoordinator {
    resolver: ArtifactResolver,
    jobs: Arc<dyn JobRepository>,
    config_store: Arc<dyn ConfigStore>,
    settings: PackagingConfig,
}

impl DownloadCoordinator {
    pub fn new(
        artifacts: Arc<dyn ArtifactRepository>,
        jobs: Arc<dyn JobRepository>,
        config_store: Arc<dyn ConfigStore>,
        settings: PackagingConfig,
    ) -> Self {
        Self {
            resolver: ArtifactResolver::new(artifacts),
            jobs,
            config_store,
            settings,
        }
    }

    /// Wire the coordinator to SQLite-backed collaborators sharing one database.
    pub fn with_database(db: &Arc<Database>, settings: PackagingConfig) -> Self {
        Self::new(
            Arc::new(SqliteArtifactRepository::new(Arc::clone(db))),
            Arc::new(SqliteJobRepository::new(Arc::clone(db))),
            Arc::new(SqliteConfigStore::new(Arc::clone(db))),
            settings,
        )
    }

    /// Open the configured database and wire the coordinator to it.
    pub fn open(config: &Config) -> crate::error::Result<Self> {
        let db = Arc::new(Database::open(&config.database.path)?);
        Ok(Self::with_database(&db, config.packaging.clone()))
    }

    /// Package `model_name` from job `job_id` and return the archive path.
    pub fn get_packaged_model(&self, job_id: JobId, model_name: &str) -> Result<PathBuf, Report> {
        self.get_packaged_model_with_cancel(job_id, model_name, &CancelFlag::new())
    }

    /// Like `get_packaged_model`, aborting the archive copy once `cancel` is set.
    pub fn get_packaged_model_with_cancel(
        &self,
        job_id: JobId,
        model_name: &str,
        cancel: &CancelFlag,
    ) -> Result<PathBuf, Report> {
        self.package(job_id, model_name, cancel).map_err(Report::from)
    }

    /// Manifest entries for a job.
    pub fn list_models(&self, job_id: JobId) -> Result<Vec<ManifestCandidate>, Report> {
        self.resolver.list_candidates(job_id).map_err(Report::from)
    }

    fn package(
        &self,
        job_id: JobId,
        model_name: &str,
        cancel: &CancelFlag,
    ) -> PackagingResult<PathBuf> {
        let primary = self.resolver.resolve(job_id, model_name)?;

        let job = self
            .jobs
            .fetch_job(job_id)?
            .ok_or_else(|| PackagingError::NotFound(format!("job {job_id}")))?;

        let spec = BundlePlanner::plan(job.engine_type, &primary);

        let destination = self.output_dir()?;
        let base_name = file_name(&normalize_path(&primary)).to_string();

        let archive = Archiver::with_cancel(cancel.clone()).build(&destination, &base_name, &spec)?;
        info!(
            job_id = %job_id,
            model_name,
            engine_type = %job.engine_type,
            archive = %archive.display(),
            "Packaged model"
        );
        Ok(archive)
    }

    /// Directory from the config store, falling back to the static setting.
    fn output_dir(&self) -> PackagingResult<PathBuf> {
        let key = self.settings.output_dir_key.as_str();
        match self.config_store.get_string(key)? {
            Some(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
            _ => {
                warn!(
                    key,
                    fallback = %self.settings.output_dir.display(),
                    "Output directory not configured, using fallback"
                );
                Ok(self.settings.output_dir.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CONFIG_TYPE_SYSTEM;
    use modelpack_training::{ArtifactDataType, ArtifactRecord, EngineType, JobRecord};
    use std::path::Path;
    use tempfile::TempDir;

    fn coordinator(db: &Arc<Database>, fallback: &Path) -> DownloadCoordinator {
        DownloadCoordinator::with_database(
            db,
            PackagingConfig {
                output_dir_key: "PATH_STATIC_TEST".to_string(),
                output_dir: fallback.to_path_buf(),
            },
        )
    }

    fn seed(db: &Arc<Database>, job_id: i64, engine: EngineType, manifest: &str) {
        SqliteJobRepository::new(Arc::clone(db)).upsert_job(&JobRecord::new(job_id, engine)).unwrap();
        SqliteArtifactRepository::new(Arc::clone(db))
            .upsert_artifact_record(&ArtifactRecord::new(
                job_id,
                ArtifactDataType::BestModelManifest,
                manifest,
            ))
            .unwrap();
    }

    #[test]
    fn test_output_dir_prefers_config_store() {
        let temp = TempDir::new().unwrap();
        let db = Arc::new(Database::open_in_memory().unwrap());
        let coordinator = coordinator(&db, temp.path());
        assert_eq!(coordinator.output_dir().unwrap(), temp.path());

        SqliteConfigStore::new(Arc::clone(&db))
            .set_string(CONFIG_TYPE_SYSTEM, "PATH_STATIC_TEST", "/srv/static")
            .unwrap();
        assert_eq!(coordinator.output_dir().unwrap(), PathBuf::from("/srv/static"));
    }

    #[test]
    fn test_missing_job_is_not_found() {
        let temp = TempDir::new().unwrap();
        let db = Arc::new(Database::open_in_memory().unwrap());
        SqliteArtifactRepository::new(Arc::clone(&db))
            .upsert_artifact_record(&ArtifactRecord::new(
                3,
                ArtifactDataType::BestModelManifest,
                r#"{"c":{"s":[["/x/m.kaier",1.0]]}}"#,
            ))
            .unwrap();

        let report = coordinator(&db, temp.path()).get_packaged_model(JobId(3), "m").unwrap_err();
        assert_eq!(report.code, "FL0006");
        assert!(report.cause.unwrap().contains("job 3"));
    }

    #[test]
    fn test_tabular_job_packages_model_only() {
        let temp = TempDir::new().unwrap();
        let model = temp.path().join("model.kaier");
        std::fs::write(&model, b"tabular").unwrap();
        let manifest = format!(r#"{{"c":{{"s":[["{}",0.7]]}}}}"#, model.display());

        let db = Arc::new(Database::open_in_memory().unwrap());
        seed(&db, 8, EngineType::TabularRegression, &manifest);

        let archive = coordinator(&db, temp.path()).get_packaged_model(JobId(8), "model").unwrap();
        assert_eq!(archive, temp.path().join("model.kaier.zip"));
        let zip = zip::ZipArchive::new(std::fs::File::open(&archive).unwrap()).unwrap();
        assert_eq!(zip.len(), 1);
    }
}
