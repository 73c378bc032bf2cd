//! Error types for Modelpack Core.

use crate::packaging::PackagingError;
use crate::storage::StorageError;
use thiserror::Error;

/// Core error type for Modelpack operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Packaging errors
    #[error("Packaging error: {0}")]
    Packaging(#[from] PackagingError),
}

/// Result type alias for Modelpack operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_storage_conversion() {
        let storage_err = StorageError::InvalidData("created_at".to_string());
        let core_err: CoreError = storage_err.into();
        match core_err {
            CoreError::Storage(StorageError::InvalidData(msg)) => {
                assert_eq!(msg, "created_at");
            }
            _ => panic!("Expected Storage error variant"),
        }
    }

    #[test]
    fn test_core_error_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
    }

    #[test]
    fn test_core_error_config_display() {
        let err = CoreError::Config("Invalid configuration".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("Invalid configuration"));
    }

    #[test]
    fn test_core_error_packaging_conversion() {
        let core_err: CoreError = PackagingError::Cancelled.into();
        assert!(matches!(core_err, CoreError::Packaging(PackagingError::Cancelled)));
        assert!(core_err.to_string().contains("Packaging error"));
    }
}
