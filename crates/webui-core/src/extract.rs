//! Zip extraction into the target directory.

use crate::error::{fs_err, ProvisionError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Unpacks a downloaded archive.
pub trait ArchiveExtractor {
    /// Extract every entry of `archive` under `dest`, which already exists.
    /// Returns the number of entries in the archive.
    fn extract(&self, archive: &Path, dest: &Path) -> Result<usize, ProvisionError>;
}

/// Standard zip (stored/deflate), directory structure preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipExtractor;

impl ArchiveExtractor for ZipExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<usize, ProvisionError> {
        let file = File::open(archive).map_err(fs_err("open", archive))?;
        let archive_err = |source| ProvisionError::Archive {
            path: archive.to_path_buf(),
            source,
        };
        let mut zip = zip::ZipArchive::new(BufReader::new(file)).map_err(archive_err)?;
        let entries = zip.len();
        zip.extract(dest).map_err(archive_err)?;
        Ok(entries)
    }
}
