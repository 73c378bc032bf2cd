//! Storage layer for Modelpack Core.
//!
//! Persistence over SQLite using the Repository pattern: training jobs, their
//! artifact records, and the key/value configuration table.

// SQL strings don't need hash-less raw strings
#![allow(clippy::needless_raw_string_hashes)]

pub mod database;
pub mod error;
pub mod repositories;

pub use database::Database;
pub use error::{StorageError, StorageResult};
pub use repositories::{
    ArtifactRepository, CONFIG_TYPE_SYSTEM, ConfigStore, JobRepository, SqliteArtifactRepository,
    SqliteConfigStore, SqliteJobRepository,
};
