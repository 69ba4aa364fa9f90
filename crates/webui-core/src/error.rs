//! Error taxonomy for provisioning.
//!
//! Every failure is fatal to the call and propagates unchanged; the
//! underlying filesystem, curl or zip error is kept as the `source`.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse classification of a [`ProvisionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Read/delete/create/write failure on a local path.
    Filesystem,
    /// Stream could not be opened, returned a non-2xx status, or was interrupted.
    Network,
    /// Corrupt or unreadable archive.
    Archive,
}

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("failed to {op} {}", path.display())]
    Filesystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("GET {url} failed")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },

    #[error("failed to extract archive {}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

impl ProvisionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProvisionError::Filesystem { .. } => ErrorKind::Filesystem,
            ProvisionError::Curl { .. } | ProvisionError::Http { .. } => ErrorKind::Network,
            ProvisionError::Archive { .. } => ErrorKind::Archive,
        }
    }
}

/// `map_err` adapter for I/O failures on `path`.
pub(crate) fn fs_err(op: &'static str, path: &Path) -> impl FnOnce(io::Error) -> ProvisionError {
    let path = path.to_path_buf();
    move |source| ProvisionError::Filesystem { op, path, source }
}

/// `map_err` adapter for curl failures while fetching `url`.
pub(crate) fn curl_err(url: &str) -> impl FnOnce(curl::Error) -> ProvisionError {
    let url = url.to_string();
    move |source| ProvisionError::Curl { url, source }
}
