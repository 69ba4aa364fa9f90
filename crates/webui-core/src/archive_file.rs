//! Scratch file for the downloaded release archive.
//!
//! Replaces whatever sits at the scratch path, takes sequential writes
//! through a buffer, and flushes + fsyncs on `finish`. The handle is closed
//! on drop, so an aborted transfer leaves the partial file behind but never
//! an open descriptor.

use crate::error::{fs_err, ProvisionError};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const WRITE_BUF: usize = 64 * 1024;

pub struct ArchiveFile {
    writer: BufWriter<File>,
    path: PathBuf,
    written: u64,
}

impl ArchiveFile {
    /// Create the scratch file at `path`, removing any previous file there first.
    /// Missing parent directories are created.
    pub fn create(path: &Path) -> Result<Self, ProvisionError> {
        match fs::remove_file(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed stale archive"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(fs_err("remove", path)(e)),
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(fs_err("create", parent))?;
        }
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(fs_err("create", path))?;
        Ok(ArchiveFile {
            writer: BufWriter::with_capacity(WRITE_BUF, file),
            path: path.to_path_buf(),
            written: 0,
        })
    }

    /// Append `data` at the current end of the file.
    pub fn write_chunk(&mut self, data: &[u8]) -> Result<(), ProvisionError> {
        self.writer
            .write_all(data)
            .map_err(fs_err("write", &self.path))?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Bytes accepted so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and sync to disk, then close. Returns the file length.
    pub fn finish(self) -> Result<u64, ProvisionError> {
        let path = self.path;
        let file = self
            .writer
            .into_inner()
            .map_err(|e| fs_err("write", &path)(e.into_error()))?;
        file.sync_all().map_err(fs_err("sync", &path))?;
        Ok(self.written)
    }
}
