//! Failure taxonomy of the packaging pipeline.

use std::path::PathBuf;

use modelpack_training::{JobId, TrainingError};
use thiserror::Error;
use zip::result::ZipError;

use crate::storage::StorageError;

/// Errors raised while resolving, planning, or archiving a model package.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// Missing artifact record, empty payload, missing job, or no manifest match.
    #[error("not found: {0}")]
    NotFound(String),

    /// The manifest payload does not decode into the expected nested shape.
    #[error("malformed manifest for job {job_id}: {reason}")]
    MalformedMetadata { job_id: JobId, reason: String },

    /// The job's engine tag is not one the packager knows.
    #[error("invalid engine type: {0}")]
    InvalidEngineType(String),

    /// A planned source file cannot be opened.
    #[error("cannot open {}: {source}", path.display())]
    SourceOpenFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive file cannot be created or finalized.
    #[error("cannot write archive {}: {source}", path.display())]
    ArchiveCreateFailure {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    /// An entry cannot be started inside the archive.
    #[error("cannot create archive entry {entry}: {source}")]
    EntryCreateFailure {
        entry: String,
        #[source]
        source: ZipError,
    },

    /// Streaming bytes into an entry failed.
    #[error("cannot copy into archive entry {entry}: {source}")]
    CopyFailure {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    /// The request was cancelled while the archive was being written.
    #[error("packaging cancelled")]
    Cancelled,

    /// The persistence or configuration collaborator failed.
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for PackagingError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Training(TrainingError::UnknownEngineType(tag)) => {
                Self::InvalidEngineType(tag)
            }
            other => Self::Storage(other),
        }
    }
}

/// Result type for packaging operations.
pub type PackagingResult<T> = std::result::Result<T, PackagingError>;

impl PackagingError {
    /// Stable error code reported to callers.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "FL0006",
            Self::MalformedMetadata { .. } => "RQ0012",
            Self::InvalidEngineType(_) => "RQ1001",
            Self::SourceOpenFailure { .. } => "FL0002",
            Self::ArchiveCreateFailure { .. } => "ZF001",
            Self::EntryCreateFailure { .. } => "ZF002",
            Self::CopyFailure { .. } => "ZF003",
            Self::Cancelled => "RQ0001",
            Self::Storage(_) => "DB0021",
        }
    }

    /// Short fixed message paired with `code`.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Invalid Metric",
            Self::MalformedMetadata { .. } => "Json Fail",
            Self::InvalidEngineType(_) => "Invalid engine type",
            Self::SourceOpenFailure { .. } => "File Open Error",
            Self::ArchiveCreateFailure { .. } => "Failed to add zip file",
            Self::EntryCreateFailure { .. } => "Failed to create zip entry",
            Self::CopyFailure { .. } => "Failed to copy to zip",
            Self::Cancelled => "Invalid request",
            Self::Storage(_) => "Select query error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_engine_tag_maps_to_invalid_engine_type() {
        let err: PackagingError =
            StorageError::Training(TrainingError::UnknownEngineType("vseg".to_string())).into();
        assert!(matches!(&err, PackagingError::InvalidEngineType(tag) if tag == "vseg"));
        assert_eq!(err.code(), "RQ1001");
    }

    #[test]
    fn test_other_storage_errors_keep_db_code() {
        let err: PackagingError = StorageError::LockPoisoned.into();
        assert!(matches!(err, PackagingError::Storage(StorageError::LockPoisoned)));
        assert_eq!(err.code(), "DB0021");
    }

    #[test]
    fn test_source_open_display_names_path() {
        let err = PackagingError::SourceOpenFailure {
            path: PathBuf::from("/data/42/config.kaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/data/42/config.kaml"));
        assert_eq!(err.code(), "FL0002");
        assert_eq!(err.message(), "File Open Error");
    }
}
