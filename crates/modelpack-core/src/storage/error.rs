//! Error types for the storage layer.

use modelpack_training::TrainingError;
use thiserror::Error;

/// Errors that can occur in the storage layer.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connection(#[from] rusqlite::Error),

    /// A stored value could not be mapped to a domain type.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A stored training value was rejected by the training domain types.
    #[error("Training data error: {0}")]
    Training(#[from] TrainingError),

    /// The connection mutex was poisoned by a panicking holder.
    #[error("Database lock poisoned")]
    LockPoisoned,
}

/// Result type alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
