//! Decides which files go into a model package and under which names.
//!
//! Planning is pure: it never touches the filesystem. A planned source that
//! does not exist surfaces later as `SourceOpenFailure` from the archiver.

use std::path::{Path, PathBuf};

use modelpack_training::{
    DESCRIPTOR_FILE_NAME, EngineType, descriptor_entry_name, file_name, normalize_path, parent_dir,
};
use tracing::debug;

/// One file to place in the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub source: PathBuf,
    pub entry_name: String,
}

impl BundleEntry {
    pub fn new(source: impl Into<PathBuf>, entry_name: impl Into<String>) -> Self {
        Self { source: source.into(), entry_name: entry_name.into() }
    }
}

/// Ordered package contents. The primary model file is always first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleSpec {
    entries: Vec<BundleEntry>,
}

impl BundleSpec {
    #[must_use]
    pub fn new(entries: Vec<BundleEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    #[must_use]
    pub fn primary(&self) -> Option<&BundleEntry> {
        self.entries.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BundleEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a BundleSpec {
    type Item = &'a BundleEntry;
    type IntoIter = std::slice::Iter<'a, BundleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Stateless bundle planner.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundlePlanner;

impl BundlePlanner {
    /// Plan the package for a resolved model path.
    ///
    /// * primary: `(path, file name)`
    /// * vision classification (single/multi label): plus `(<dir>/config.kaml, <model>.kaml)`
    /// * anomaly detection, tabular classification/regression: primary only
    #[must_use]
    pub fn plan(engine_type: EngineType, primary_path: &str) -> BundleSpec {
        let normalized = normalize_path(primary_path);
        let model_file = file_name(&normalized).to_string();

        let mut entries = vec![BundleEntry::new(Path::new(&normalized), model_file.clone())];

        if engine_type.bundles_descriptor() {
            let descriptor = format!("{}{}", parent_dir(&normalized), DESCRIPTOR_FILE_NAME);
            entries.push(BundleEntry::new(descriptor, descriptor_entry_name(&model_file)));
        } else {
            // TODO: companion files for vad/tcls/treg once the training side settles their layout.
            debug!(engine_type = %engine_type, "companion bundling not implemented");
        }

        BundleSpec::new(entries)
    }
}
