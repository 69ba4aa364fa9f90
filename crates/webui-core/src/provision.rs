//! Web UI provisioning: check the installed revision, otherwise purge,
//! download and extract the tagged release.
//!
//! ```text
//! [check marker] --match--> [fingerprint & log] --> done
//! [check marker] --mismatch/absent--> [purge] --> [download] --> [create dir] --> [extract] --> done
//! ```
//!
//! Any failure ends the call. Nothing is retried or rolled back: a partial
//! scratch archive or a half-extracted target stays on disk.

use crate::config::ProvisionConfig;
use crate::error::{fs_err, ProvisionError};
use crate::extract::{ArchiveExtractor, ZipExtractor};
use crate::fetch::{ArchiveFetcher, CurlFetcher};
use crate::fingerprint::directory_fingerprint;
use crate::progress::{ProgressStats, ProgressTracker};
use crate::revision::InstalledRevision;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the release archive for `tag`.
pub fn archive_file_name(bundle: &str, tag: &str) -> String {
    format!("{bundle}-{tag}.zip")
}

/// `<base>/releases/download/<tag>/<bundle>-<tag>.zip`. One trailing `/` on `base` is ignored.
pub fn release_url(base: &str, bundle: &str, tag: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    format!(
        "{}/releases/download/{}/{}",
        base,
        tag,
        archive_file_name(bundle, tag)
    )
}

/// What a successful [`Provisioner::ensure_provisioned`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// Marker matched; the directory was left untouched.
    AlreadyInstalled { tag: String, fingerprint: String },
    /// The release was downloaded and extracted.
    Installed {
        tag: String,
        bytes_downloaded: u64,
        /// Scratch archive, unless it was removed after extraction.
        archive_path: Option<PathBuf>,
    },
}

pub struct Provisioner<F, X> {
    fetcher: F,
    extractor: X,
}

impl Provisioner<CurlFetcher, ZipExtractor> {
    /// libcurl download and zip extraction, tuned from `cfg`.
    pub fn from_config(cfg: &ProvisionConfig) -> Self {
        Self::new(CurlFetcher::new(cfg.curl_options()), ZipExtractor)
    }
}

impl<F: ArchiveFetcher, X: ArchiveExtractor> Provisioner<F, X> {
    pub fn new(fetcher: F, extractor: X) -> Self {
        Self { fetcher, extractor }
    }

    #[cfg(test)]
    pub(crate) fn fetcher(&self) -> &F {
        &self.fetcher
    }

    #[cfg(test)]
    pub(crate) fn extractor(&self) -> &X {
        &self.extractor
    }

    /// Make `cfg.target_dir` hold the release tagged `cfg.expected_tag`.
    ///
    /// `on_progress` is called roughly every `cfg.progress_interval_bytes`
    /// downloaded bytes. Callers must not run two of these against the same
    /// target concurrently.
    pub fn ensure_provisioned(
        &self,
        cfg: &ProvisionConfig,
        mut on_progress: Option<&mut dyn FnMut(&ProgressStats)>,
    ) -> Result<ProvisionOutcome, ProvisionError> {
        let target = cfg.target_dir.as_path();
        let tag = cfg.expected_tag.as_str();

        match InstalledRevision::read(target)? {
            Some(installed) if installed.matches(tag) => {
                tracing::info!(
                    tag,
                    dir = %target.display(),
                    "web UI static files exist and are the correct revision"
                );
                tracing::info!("verifying web UI static files");
                // Logged only; there is no reference value to compare against.
                let fingerprint = directory_fingerprint(target)?;
                tracing::info!(%fingerprint, "web UI fingerprint");
                return Ok(ProvisionOutcome::AlreadyInstalled {
                    tag: installed.tag().to_string(),
                    fingerprint,
                });
            }
            Some(installed) => tracing::info!(
                installed = installed.tag(),
                expected = tag,
                "installed web UI revision is stale"
            ),
            None => tracing::info!(dir = %target.display(), "no web UI installation found"),
        }

        purge(target)?;

        let archive_path = cfg
            .temp_dir
            .join(archive_file_name(&cfg.bundle_name, tag));
        let url = release_url(&cfg.download_base_url, &cfg.bundle_name, tag);
        tracing::info!(%url, archive = %archive_path.display(), "downloading web UI archive");

        let mut tracker = ProgressTracker::new(cfg.progress_interval_bytes);
        let bytes_downloaded = self.fetcher.fetch(&url, &archive_path, &mut |n| {
            if let Some(stats) = tracker.advance(n) {
                tracing::debug!(bytes = stats.bytes_done, "download progress");
                if let Some(cb) = on_progress.as_mut() {
                    cb(&stats);
                }
            }
        })?;
        let stats = tracker.snapshot();
        tracing::info!(
            bytes = bytes_downloaded,
            bytes_per_sec = stats.bytes_per_sec() as u64,
            "downloading web UI archive done"
        );

        tracing::info!(dir = %target.display(), "extracting web UI archive");
        fs::create_dir_all(target).map_err(fs_err("create", target))?;
        let entries = self.extractor.extract(&archive_path, target)?;
        tracing::info!(entries, "extracting web UI archive done");

        check_installed(target, tag);

        let archive_path = if cfg.remove_archive {
            fs::remove_file(&archive_path).map_err(fs_err("remove", &archive_path))?;
            None
        } else {
            Some(archive_path)
        };

        Ok(ProvisionOutcome::Installed {
            tag: tag.to_string(),
            bytes_downloaded,
            archive_path,
        })
    }
}

/// Remove `target` whatever it is. Absent is fine.
fn purge(target: &Path) -> Result<(), ProvisionError> {
    let meta = match fs::symlink_metadata(target) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(fs_err("inspect", target)(e)),
    };
    if meta.is_dir() {
        fs::remove_dir_all(target).map_err(fs_err("remove", target))?;
    } else {
        fs::remove_file(target).map_err(fs_err("remove", target))?;
    }
    tracing::info!(dir = %target.display(), "removed stale web UI directory");
    Ok(())
}

/// Warn when the fresh bundle does not carry the expected marker: the next run will download again.
fn check_installed(target: &Path, tag: &str) {
    match InstalledRevision::read(target) {
        Ok(Some(rev)) if rev.matches(tag) => {}
        Ok(Some(rev)) => tracing::warn!(
            found = rev.tag(),
            expected = tag,
            "extracted web UI carries a different revision"
        ),
        Ok(None) => tracing::warn!("extracted web UI has no revision marker"),
        Err(e) => tracing::warn!("cannot read extracted revision marker: {}", e),
    }
}
