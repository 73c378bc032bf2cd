//! Modelpack Core - trained model packaging backend.
//!
//! This crate provides:
//! - Resolution of trained model files from a job's best-model manifest
//! - Bundle planning per engine type and zip archive assembly
//! - SQLite persistence for jobs, artifact records, and configuration values
//! - Application configuration loading
//!
//! # Example
//!
//! ```rust,no_run
//! use modelpack_core::{Config, DownloadCoordinator};
//! use modelpack_training::JobId;
//!
//! fn main() -> modelpack_core::Result<()> {
//!     let config = Config::load()?;
//!     let coordinator = DownloadCoordinator::open(&config)?;
//!     match coordinator.get_packaged_model(JobId(42), "resnet50") {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(report) => eprintln!("{report}"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod packaging;
pub mod storage;

pub use config::Config;
pub use error::{CoreError, Result};
pub use packaging::{
    Archiver, ArtifactResolver, BundleEntry, BundlePlanner, BundleSpec, CancelFlag,
    DownloadCoordinator, PackagingError, PackagingResult, Report,
};
pub use storage::{
    ArtifactRepository, ConfigStore, Database, JobRepository, SqliteArtifactRepository,
    SqliteConfigStore, SqliteJobRepository, StorageError,
};
