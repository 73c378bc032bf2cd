//! Locates a trained model file inside a job's best-model manifest.

use std::sync::Arc;

use modelpack_training::{
    ArtifactDataType, BestModelManifest, JobId, ManifestCandidate, TrainingError,
    find_model_path, list_candidates, model_file_name,
};
use tracing::debug;

use crate::packaging::error::{PackagingError, PackagingResult};
use crate::storage::ArtifactRepository;

/// Resolves `(job, model name)` to the model path recorded by the training pipeline.
pub struct ArtifactResolver {
    artifacts: Arc<dyn ArtifactRepository>,
}

impl ArtifactResolver {
    pub fn new(artifacts: Arc<dyn ArtifactRepository>) -> Self {
        Self { artifacts }
    }

    /// Return the manifest path whose file name ends with `<model_name>.kaier`.
    ///
    /// When several entries match, the first in manifest traversal order wins
    /// (category key ascending, then stage key ascending, then result order).
    /// The path is returned verbatim.
    ///
    /// # Errors
    /// * `NotFound` - no record, empty payload, invalid name, or no matching entry
    /// * `MalformedMetadata` - the payload is not a best-model manifest
    pub fn resolve(&self, job_id: JobId, model_name: &str) -> PackagingResult<String> {
        if model_name.is_empty() || model_name.contains(['/', '\\']) {
            return Err(PackagingError::NotFound(format!("invalid model name {model_name:?}")));
        }

        let manifest = self.load_manifest(job_id)?;
        let path = find_model_path(&manifest, model_name).ok_or_else(|| {
            PackagingError::NotFound(format!(
                "no manifest entry for {} in job {job_id}",
                model_file_name(model_name)
            ))
        })?;

        debug!(job_id = %job_id, model_name, path, "Resolved model artifact");
        Ok(path.to_string())
    }

    /// Every manifest entry for a job, in traversal order.
    pub fn list_candidates(&self, job_id: JobId) -> PackagingResult<Vec<ManifestCandidate>> {
        let manifest = self.load_manifest(job_id)?;
        Ok(list_candidates(&manifest))
    }

    fn load_manifest(&self, job_id: JobId) -> PackagingResult<BestModelManifest> {
        let record = self
            .artifacts
            .fetch_artifact_record(job_id, ArtifactDataType::BestModelManifest)?
            .filter(|record| record.has_payload())
            .ok_or_else(|| {
                PackagingError::NotFound(format!("no best-model manifest for job {job_id}"))
            })?;

        BestModelManifest::parse(&record.data).map_err(|e| match e {
            TrainingError::MalformedManifest(reason) => {
                PackagingError::MalformedMetadata { job_id, reason }
            }
            other => PackagingError::MalformedMetadata { job_id, reason: other.to_string() },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, SqliteArtifactRepository};
    use modelpack_training::ArtifactRecord;

    const SCENARIO_MANIFEST: &str = r#"{"cls":{"stage1":[["/data/42/resnet50.kaier", 0.91]]}}"#;

    fn resolver_with(job_id: i64, payload: Option<&str>) -> ArtifactResolver {
        let db = Arc::new(Database::open_in_memory().unwrap());
        let repo = SqliteArtifactRepository::new(db);
        if let Some(payload) = payload {
            repo.upsert_artifact_record(&ArtifactRecord::new(
                job_id,
                ArtifactDataType::BestModelManifest,
                payload,
            ))
            .unwrap();
        }
        ArtifactResolver::new(Arc::new(repo))
    }

    #[test]
    fn test_resolve_scenario_path() {
        let resolver = resolver_with(42, Some(SCENARIO_MANIFEST));
        assert_eq!(resolver.resolve(JobId(42), "resnet50").unwrap(), "/data/42/resnet50.kaier");
    }

    #[test]
    fn test_resolve_unknown_model_is_not_found() {
        let resolver = resolver_with(42, Some(SCENARIO_MANIFEST));
        let err = resolver.resolve(JobId(42), "nonexistent").unwrap_err();
        assert!(matches!(err, PackagingError::NotFound(_)));
    }

    #[test]
    fn test_resolve_missing_record_is_not_found() {
        let resolver = resolver_with(42, None);
        assert!(matches!(
            resolver.resolve(JobId(42), "resnet50").unwrap_err(),
            PackagingError::NotFound(_)
        ));
    }

    #[test]
    fn test_resolve_empty_payload_is_not_found() {
        for payload in ["", "   ", "{}"] {
            let resolver = resolver_with(42, Some(payload));
            assert!(
                matches!(resolver.resolve(JobId(42), "resnet50").unwrap_err(), PackagingError::NotFound(_)),
                "payload: {payload:?}"
            );
        }
    }

    #[test]
    fn test_resolve_malformed_payload() {
        for payload in ["[1,2,3]", r#"{"cls":{"stage1":[[0.91, "/data/42/resnet50.kaier"]]}}"#, "{"] {
            let resolver = resolver_with(42, Some(payload));
            let err = resolver.resolve(JobId(42), "resnet50").unwrap_err();
            assert!(
                matches!(err, PackagingError::MalformedMetadata { job_id: JobId(42), .. }),
                "payload: {payload:?}"
            );
        }
    }

    #[test]
    fn test_resolve_rejects_names_with_separators() {
        let resolver = resolver_with(42, Some(SCENARIO_MANIFEST));
        for name in ["", "42/resnet50", r"42\resnet50"] {
            assert!(matches!(
                resolver.resolve(JobId(42), name).unwrap_err(),
                PackagingError::NotFound(_)
            ));
        }
    }

    #[test]
    fn test_list_candidates() {
        let resolver = resolver_with(42, Some(SCENARIO_MANIFEST));
        let candidates = resolver.list_candidates(JobId(42)).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].model_name.as_deref(), Some("resnet50"));
    }
}
