use crate::error::{TrainingError, TrainingResult};
use crate::job::JobId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag on an artifact record describing what its `data` payload holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactDataType {
    /// Per-category, per-stage best result files (`best_model_dict`).
    #[serde(rename = "best_model_dict")]
    BestModelManifest,
}

impl ArtifactDataType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BestModelManifest => "best_model_dict",
        }
    }
}

impl std::fmt::Display for ArtifactDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A result payload written by the training pipeline for a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub job_id: JobId,
    pub data_type: ArtifactDataType,
    /// Raw payload text. For `BestModelManifest` this is a JSON manifest.
    pub data: String,
    pub created_at: DateTime<Utc>,
}

impl ArtifactRecord {
    #[must_use]
    pub fn new(job_id: impl Into<JobId>, data_type: ArtifactDataType, data: impl Into<String>) -> Self {
        Self { job_id: job_id.into(), data_type, data: data.into(), created_at: Utc::now() }
    }

    /// Empty or whitespace-only payloads carry no manifest.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        !self.data.trim().is_empty()
    }
}

/// One `(file path, metric value)` result tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry(pub String, pub f64);

impl ResultEntry {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn metric(&self) -> f64 {
        self.1
    }
}

/// Typed best-model manifest: category -> stage -> ordered result tuples.
///
/// Keys are held in `BTreeMap`s, so traversal is ascending by category and
/// then by stage, with results in payload order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestModelManifest {
    pub categories: BTreeMap<String, BTreeMap<String, Vec<ResultEntry>>>,
}

impl BestModelManifest {
    /// Decode a manifest payload, rejecting anything that is not the exact nested shape.
    pub fn parse(payload: &str) -> TrainingResult<Self> {
        serde_json::from_str(payload).map_err(|e| TrainingError::MalformedManifest(e.to_string()))
    }

    pub fn to_payload(&self) -> TrainingResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn insert(&mut self, category: &str, stage: &str, entry: ResultEntry) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .entry(stage.to_string())
            .or_default()
            .push(entry);
    }

    /// Every `(category, stage, entry)` triple in traversal order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &ResultEntry)> {
        self.categories.iter().flat_map(|(category, stages)| {
            stages.iter().flat_map(move |(stage, results)| {
                results.iter().map(move |entry| (category.as_str(), stage.as_str(), entry))
            })
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}
