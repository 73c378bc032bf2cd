use crate::error::{TrainingError, TrainingResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier for a training job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub i64);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for JobId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Training pipeline that produced a job's artifacts.
///
/// Serialized with the pipeline's wire tags (`vcls-sl`, `vcls-ml`, `vad`, `tcls`, `treg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineType {
    #[serde(rename = "vcls-sl")]
    VisionClassificationSingleLabel,
    #[serde(rename = "vcls-ml")]
    VisionClassificationMultiLabel,
    #[serde(rename = "vad")]
    VisionAnomalyDetection,
    #[serde(rename = "tcls")]
    TabularClassification,
    #[serde(rename = "treg")]
    TabularRegression,
}

impl EngineType {
    pub const ALL: [Self; 5] = [
        Self::VisionClassificationSingleLabel,
        Self::VisionClassificationMultiLabel,
        Self::VisionAnomalyDetection,
        Self::TabularClassification,
        Self::TabularRegression,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VisionClassificationSingleLabel => "vcls-sl",
            Self::VisionClassificationMultiLabel => "vcls-ml",
            Self::VisionAnomalyDetection => "vad",
            Self::TabularClassification => "tcls",
            Self::TabularRegression => "treg",
        }
    }

    /// Whether packages for this engine carry the `config.kaml` descriptor.
    #[must_use]
    pub fn bundles_descriptor(self) -> bool {
        matches!(self, Self::VisionClassificationSingleLabel | Self::VisionClassificationMultiLabel)
    }
}

impl std::fmt::Display for EngineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineType {
    type Err = TrainingError;

    fn from_str(s: &str) -> TrainingResult<Self> {
        Self::ALL
            .into_iter()
            .find(|engine| engine.as_str() == s)
            .ok_or_else(|| TrainingError::UnknownEngineType(s.to_string()))
    }
}

/// A training job as seen by the packaging backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub engine_type: EngineType,
}

impl JobRecord {
    #[must_use]
    pub fn new(id: impl Into<JobId>, engine_type: EngineType) -> Self {
        Self { id: id.into(), engine_type }
    }
}
