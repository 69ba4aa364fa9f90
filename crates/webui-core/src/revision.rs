//! Installed-revision marker.
//!
//! The release archive carries a `revision` file at its root whose trimmed
//! content is the tag it was built from. It is only ever read here.

use crate::error::{fs_err, ProvisionError};
use std::fs;
use std::io;
use std::path::Path;

/// Name of the marker file inside the target directory.
pub const REVISION_FILE: &str = "revision";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledRevision {
    tag: String,
}

impl InstalledRevision {
    /// Read the marker under `dir`. A missing marker (or missing `dir`) is `Ok(None)`;
    /// any other failure to read it (permissions, not UTF-8) is an error.
    pub fn read(dir: &Path) -> Result<Option<Self>, ProvisionError> {
        let path = dir.join(REVISION_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            // A file at `dir` yields NotADirectory, which has no stable ErrorKind yet.
            Err(e) if e.kind() == io::ErrorKind::NotFound || dir.is_file() => return Ok(None),
            Err(e) => return Err(fs_err("read", &path)(e)),
        };
        Ok(Some(Self {
            tag: raw.trim().to_string(),
        }))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Exact equality of the trimmed tags.
    pub fn matches(&self, expected: &str) -> bool {
        self.tag == expected.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn missing_dir_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_eq!(InstalledRevision::read(&missing).unwrap(), None);
    }

    #[test]
    fn missing_marker_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html/>").unwrap();
        assert_eq!(InstalledRevision::read(dir.path()).unwrap(), None);
    }

    #[test]
    fn marker_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(REVISION_FILE), "v1.2.3\n").unwrap();
        let rev = InstalledRevision::read(dir.path()).unwrap().unwrap();
        assert_eq!(rev.tag(), "v1.2.3");
        assert!(rev.matches("v1.2.3"));
        assert!(!rev.matches("v1.2.4"));
        assert!(!rev.matches("v1.2"));
    }

    #[test]
    fn non_utf8_marker_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(REVISION_FILE), [0xff, 0xfe, 0x00]).unwrap();
        let err = InstalledRevision::read(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Filesystem);
    }

    #[test]
    fn unreadable_marker_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the marker should be: exists, but cannot be read as text.
        fs::create_dir(dir.path().join(REVISION_FILE)).unwrap();
        let err = InstalledRevision::read(dir.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Filesystem);
    }

    #[cfg(unix)]
    #[test]
    fn marker_in_unsearchable_dir_is_filesystem_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("webUI");
        fs::create_dir(&target).unwrap();
        fs::write(target.join(REVISION_FILE), "v1").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o000)).unwrap();

        let res = InstalledRevision::read(&target);
        fs::set_permissions(&target, fs::Permissions::from_mode(0o755)).unwrap();
        // root ignores permission bits; only assert when access was actually denied.
        match res {
            Err(err) => assert_eq!(err.kind(), ErrorKind::Filesystem),
            Ok(rev) => assert_eq!(rev.map(|r| r.tag().to_string()).as_deref(), Some("v1")),
        }
    }

    #[test]
    fn target_that_is_a_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("webUI");
        fs::write(&file, "not a directory").unwrap();
        assert_eq!(InstalledRevision::read(&file).unwrap(), None);
    }
}
