//! Writes a planned bundle into a single zip archive.
//!
//! The archive is staged as `<base>.zip.<random>.part` next to the final path
//! and renamed into place once complete. Failures abort immediately and leave
//! the `.part` file on disk; nothing is rolled back or removed.

use std::fs::{self, File};
use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::packaging::cancel::CancelFlag;
use crate::packaging::error::{PackagingError, PackagingResult};
use crate::packaging::planner::BundleSpec;

const CHUNK_SIZE: usize = 64 * 1024;

/// Suffix of archives still being written.
pub const PART_SUFFIX: &str = ".part";

/// Zip archive builder.
#[derive(Debug, Clone, Default)]
pub struct Archiver {
    cancel: Option<CancelFlag>,
}

impl Archiver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the copy loop once `cancel` is set.
    #[must_use]
    pub fn with_cancel(cancel: CancelFlag) -> Self {
        Self { cancel: Some(cancel) }
    }

    /// `<destination_dir>/<archive_base_name>.zip`
    #[must_use]
    pub fn archive_path(destination_dir: &Path, archive_base_name: &str) -> PathBuf {
        destination_dir.join(format!("{archive_base_name}.zip"))
    }

    /// Create the archive, replacing any existing file, and return its absolute path.
    ///
    /// Entries are written in plan order, deflate-compressed, with a fixed
    /// timestamp so identical inputs produce identical bytes. The final path
    /// is replaced by rename, so readers holding the previous archive keep
    /// reading the previous bytes.
    pub fn build(
        &self,
        destination_dir: &Path,
        archive_base_name: &str,
        spec: &BundleSpec,
    ) -> PackagingResult<PathBuf> {
        let archive_path = Self::archive_path(destination_dir, archive_base_name);
        let create_failure = |source: ZipError| PackagingError::ArchiveCreateFailure {
            path: archive_path.clone(),
            source,
        };

        let (file, part_path) = tempfile::Builder::new()
            .prefix(&format!("{archive_base_name}.zip."))
            .suffix(PART_SUFFIX)
            .tempfile_in(destination_dir)
            .and_then(|staged| staged.keep().map_err(|e| e.error))
            .map_err(|e| create_failure(e.into()))?;

        let mut zip = ZipWriter::new(file);
        self.write_entries(&mut zip, spec)?;
        zip.finish().map_err(create_failure)?;

        fs::rename(&part_path, &archive_path).map_err(|e| create_failure(e.into()))?;
        let absolute = std::path::absolute(&archive_path).map_err(|e| create_failure(e.into()))?;
        info!(path = %absolute.display(), entries = spec.len(), "Built model archive");
        Ok(absolute)
    }

    fn write_entries<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        spec: &BundleSpec,
    ) -> PackagingResult<()> {
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        for entry in spec {
            let mut source = File::open(&entry.source).map_err(|source| {
                PackagingError::SourceOpenFailure { path: entry.source.clone(), source }
            })?;

            zip.start_file(entry.entry_name.as_str(), options).map_err(|source| {
                PackagingError::EntryCreateFailure { entry: entry.entry_name.clone(), source }
            })?;

            let copied = self.copy_into(&mut source, zip).map_err(|err| match err {
                CopyError::Cancelled => PackagingError::Cancelled,
                CopyError::Io(source) => {
                    PackagingError::CopyFailure { entry: entry.entry_name.clone(), source }
                }
            })?;
            debug!(entry = %entry.entry_name, source = %entry.source.display(), bytes = copied, "Added archive entry");
        }
        Ok(())
    }

    fn copy_into<R: Read, W: Write>(&self, reader: &mut R, writer: &mut W) -> Result<u64, CopyError> {
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut copied = 0u64;
        loop {
            if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
                return Err(CopyError::Cancelled);
            }
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(CopyError::Io(e)),
            };
            writer.write_all(&buffer[..read]).map_err(CopyError::Io)?;
            copied += read as u64;
        }
        Ok(copied)
    }
}

enum CopyError {
    Cancelled,
    Io(std::io::Error),
}
