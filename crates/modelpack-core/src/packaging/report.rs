//! Structured failure report handed to the transport layer.

use serde::Serialize;
use tracing::error;

use crate::packaging::error::PackagingError;

/// Stable code, fixed message, and the underlying cause of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub code: &'static str,
    pub message: &'static str,
    pub cause: Option<String>,
}

impl Report {
    /// Build a report from a packaging error and log it.
    #[must_use]
    pub fn from_error(err: &PackagingError) -> Self {
        let report = Self { code: err.code(), message: err.message(), cause: Some(err.to_string()) };
        error!(code = report.code, message = report.message, cause = %err, "Packaging failed");
        report
    }
}

impl From<PackagingError> for Report {
    fn from(err: PackagingError) -> Self {
        Self::from_error(&err)
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Report {}
