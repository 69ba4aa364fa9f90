//! Tracing setup: append to a log file under the XDG state dir, or write to stderr.

use anyhow::Result;
use std::fs::{self, File};
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::APP_NAME;

const DEFAULT_FILTER: &str = "info,webui_core=debug,webui_provision=debug";

/// Append-mode log file; every event writes through a shared `&File`.
struct LogFile(File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = &'a File;

    fn make_writer(&'a self) -> Self::Writer {
        &self.0
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `$XDG_STATE_HOME/webui-provision/webui-provision.log`, parent created.
fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_NAME)?;
    Ok(xdg_dirs.place_state_file(format!("{APP_NAME}.log"))?)
}

fn install<W>(writer: W) -> Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Log to the state file. Errors (unwritable state dir, subscriber already set)
/// are returned so the caller can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    install(LogFile(file))?;
    tracing::info!("logging to {}", path.display());
    Ok(())
}

/// Log to stderr. Never fails; a second global subscriber is silently ignored.
pub fn init_logging_stderr() {
    let _ = install(std::io::stderr);
}
