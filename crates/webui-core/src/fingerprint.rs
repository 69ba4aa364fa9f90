//! Directory fingerprint for diagnostics.
//!
//! SHA-256 of every regular file under a directory, taken in path order,
//! then SHA-256 over the concatenated digests. Logged when the installed
//! bundle is already current; nothing compares it against a reference.

use crate::error::{fs_err, ProvisionError};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const BUF_SIZE: usize = 64 * 1024;
const DIGEST_LEN: usize = 32;

/// SHA-256 of a file's content, read in chunks.
pub fn file_digest(path: &Path) -> Result<[u8; DIGEST_LEN], ProvisionError> {
    let mut f = File::open(path).map_err(fs_err("open", path))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f.read(&mut buf).map_err(fs_err("read", path))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&hasher.finalize());
    Ok(digest)
}

/// Fingerprint of all regular files under `dir`, as lowercase hex.
/// Symlinks are followed; a link to a file counts as that file's content.
pub fn directory_fingerprint(dir: &Path) -> Result<String, ProvisionError> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            fs_err("walk", &path)(io::Error::from(e))
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();

    // One fixed-width slot per file.
    let mut slots = Vec::with_capacity(files.len() * DIGEST_LEN);
    for path in &files {
        slots.extend_from_slice(&file_digest(path)?);
    }

    let fingerprint = hex::encode(Sha256::digest(&slots));
    tracing::debug!(
        dir = %dir.display(),
        files = files.len(),
        "computed directory fingerprint"
    );
    Ok(fingerprint)
}
