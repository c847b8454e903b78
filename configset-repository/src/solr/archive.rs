//! Zip packaging of a configset.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::ArchiveError;
use configset_shared::ConfigFileSet;

/// A zip archive on local disk. The file is removed when this value is dropped.
#[derive(Debug)]
pub struct TemporaryArchive {
    file: NamedTempFile,
    entries: usize,
}

impl TemporaryArchive {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of members written.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Read the finished archive.
    pub async fn read(&self) -> Result<Vec<u8>, ArchiveError> {
        tokio::fs::read(self.path())
            .await
            .map_err(ArchiveError::finalize)
    }
}

/// Packages a `ConfigFileSet` into a uniquely named temporary zip file.
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
    /// Directory for archives; the system temp directory when `None`.
    temp_dir: Option<PathBuf>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write archives into `dir` instead of the system temp directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: Some(dir.into()),
        }
    }

    /// Build a zip archive holding every file of the set, byte for byte.
    ///
    /// Each member is named by its filename key. The archive is finalized
    /// before it is returned.
    pub fn build_zip(&self, files: &ConfigFileSet) -> Result<TemporaryArchive, ArchiveError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("configset-").suffix(".zip");
        let file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(ArchiveError::CreateError)?;

        let handle = file.reopen().map_err(ArchiveError::CreateError)?;
        let mut zip = ZipWriter::new(handle);
        for (name, content) in files.iter() {
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
            zip.start_file(name, options)
                .map_err(|e| ArchiveError::write(name, e))?;
            zip.write_all(content)
                .map_err(|e| ArchiveError::write(name, e))?;
        }

        zip.finish().map_err(ArchiveError::finalize)?;

        debug!(
            path = %file.path().display(),
            entries = files.len(),
            "Built configset archive"
        );

        Ok(TemporaryArchive {
            file,
            entries: files.len(),
        })
    }
}
