use thiserror::Error;

pub type TrainingResult<T> = std::result::Result<T, TrainingError>;

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("unknown engine type: {0}")]
    UnknownEngineType(String),

    #[error("malformed manifest: {0}")]
    MalformedManifest(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
