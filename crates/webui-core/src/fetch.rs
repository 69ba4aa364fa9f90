//! Single-stream HTTP GET of the release archive.
//!
//! Blocking libcurl easy transfer; each received chunk is appended to the
//! scratch [`ArchiveFile`] and its length reported to the caller.

use crate::archive_file::ArchiveFile;
use crate::error::{curl_err, ProvisionError};
use std::path::Path;
use std::time::Duration;

/// Downloads a URL into a local file.
pub trait ArchiveFetcher {
    /// GET `url` into a fresh file at `dest`, calling `on_bytes` with the length
    /// of every chunk received. Returns the number of bytes written.
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
        on_bytes: &mut dyn FnMut(u64),
    ) -> Result<u64, ProvisionError>;
}

/// Transfer knobs for [`CurlFetcher`]. `None` leaves libcurl's default in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlOptions {
    pub connect_timeout: Option<Duration>,
    /// Abort when no data arrives for this long.
    pub stall_timeout: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: CurlOptions,
}

impl CurlFetcher {
    pub fn new(opts: CurlOptions) -> Self {
        Self { opts }
    }
}

impl ArchiveFetcher for CurlFetcher {
    fn fetch(
        &self,
        url: &str,
        dest: &Path,
        on_bytes: &mut dyn FnMut(u64),
    ) -> Result<u64, ProvisionError> {
        let mut file = ArchiveFile::create(dest)?;
        let mut write_failure: Option<ProvisionError> = None;

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(curl_err(url))?;
        easy.follow_location(true).map_err(curl_err(url))?;
        easy.max_redirections(10).map_err(curl_err(url))?;
        easy.fail_on_error(true).map_err(curl_err(url))?;
        if let Some(t) = self.opts.connect_timeout {
            easy.connect_timeout(t).map_err(curl_err(url))?;
        }
        if let Some(t) = self.opts.stall_timeout {
            easy.low_speed_limit(1).map_err(curl_err(url))?;
            easy.low_speed_time(t).map_err(curl_err(url))?;
        }

        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| match file.write_chunk(data) {
                    Ok(()) => {
                        on_bytes(data.len() as u64);
                        Ok(data.len())
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %file.path().display(),
                            written = file.written(),
                            "archive write failed: {}",
                            e
                        );
                        write_failure = Some(e);
                        Ok(0) // abort transfer
                    }
                })
                .map_err(curl_err(url))?;
            transfer.perform()
        };

        if let Some(e) = write_failure {
            return Err(e);
        }
        if let Err(source) = performed {
            tracing::debug!(
                path = %file.path().display(),
                written = file.written(),
                "download aborted, partial archive left in place"
            );
            if source.is_http_returned_error() {
                let status = easy.response_code().map_err(curl_err(url))?;
                return Err(ProvisionError::Http {
                    url: url.to_string(),
                    status,
                });
            }
            return Err(ProvisionError::Curl {
                url: url.to_string(),
                source,
            });
        }

        let status = easy.response_code().map_err(curl_err(url))?;
        if !(200..300).contains(&status) {
            return Err(ProvisionError::Http {
                url: url.to_string(),
                status,
            });
        }

        file.finish()
    }
}
