//! Modelpack Training
//!
//! Training-side domain types consumed by the packaging backend:
//! - Job records and their engine type (`JobRecord`, `EngineType`)
//! - Artifact records and the typed best-model manifest
//! - File layout conventions for model and descriptor files
//! - Manifest search (`find_model_path`)

pub mod artifacts;
pub mod error;
pub mod job;
pub mod layout;
pub mod registry;

pub use artifacts::{ArtifactDataType, ArtifactRecord, BestModelManifest, ResultEntry};
pub use error::{TrainingError, TrainingResult};
pub use job::{EngineType, JobId, JobRecord};
pub use layout::{
    DESCRIPTOR_EXTENSION, DESCRIPTOR_FILE_NAME, MODEL_EXTENSION, descriptor_entry_name, file_name,
    model_file_name, normalize_path, parent_dir,
};
pub use registry::{ManifestCandidate, find_model_path, list_candidates};
