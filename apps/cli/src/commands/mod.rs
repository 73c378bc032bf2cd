//! Command implementations for the modelpack CLI.

pub mod models;
pub mod package;

use std::sync::Arc;

use modelpack_core::{Config, DownloadCoordinator};

/// Open the configured database and build a shareable coordinator.
fn open_coordinator(config: &Config) -> anyhow::Result<Arc<DownloadCoordinator>> {
    Ok(Arc::new(DownloadCoordinator::open(config)?))
}
