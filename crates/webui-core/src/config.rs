use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::CurlOptions;
use crate::progress::DEFAULT_PROGRESS_INTERVAL;

/// XDG prefix for config, state and data directories.
pub const APP_NAME: &str = "webui-provision";

/// Release tag baked in at build time (`WEBUI_TAG`), with a fallback for dev builds.
pub const DEFAULT_WEBUI_TAG: &str = match option_env!("WEBUI_TAG") {
    Some(tag) => tag,
    None => "r1",
};

/// Release host baked in at build time (`WEBUI_REPO`).
pub const DEFAULT_WEBUI_REPO: &str = match option_env!("WEBUI_REPO") {
    Some(repo) => repo,
    None => "https://github.com/Suwayomi/Tachidesk-WebUI-preview",
};

pub const DEFAULT_BUNDLE_NAME: &str = "Tachidesk-WebUI";

/// Everything the provisioner needs, loaded from `~/.config/webui-provision/config.toml`.
///
/// Missing keys fall back to [`ProvisionConfig::default`]. The build-time tag and
/// host and the host temp dir are only written when they differ from those
/// defaults, so a rebuilt binary picks up its own tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    /// Directory holding the extracted bundle. Deleted and rebuilt on a tag mismatch.
    pub target_dir: PathBuf,
    /// Tag the installed bundle must carry in its `revision` file.
    #[serde(skip_serializing_if = "is_build_tag")]
    pub expected_tag: String,
    /// Release host, e.g. `https://github.com/<owner>/<repo>`.
    #[serde(skip_serializing_if = "is_build_repo")]
    pub download_base_url: String,
    /// Archive name prefix: `<bundle_name>-<tag>.zip`.
    pub bundle_name: String,
    /// Scratch directory for the downloaded archive.
    #[serde(skip_serializing_if = "is_host_temp_dir")]
    pub temp_dir: PathBuf,
    /// Emit a progress event every this many downloaded bytes.
    pub progress_interval_bytes: u64,
    /// Connect timeout in seconds (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    /// Abort a transfer that delivers nothing for this many seconds. None = wait indefinitely.
    pub stall_timeout_secs: Option<u64>,
    /// Delete the scratch archive after a successful extraction.
    pub remove_archive: bool,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            target_dir: default_target_dir(),
            expected_tag: DEFAULT_WEBUI_TAG.to_string(),
            download_base_url: DEFAULT_WEBUI_REPO.to_string(),
            bundle_name: DEFAULT_BUNDLE_NAME.to_string(),
            temp_dir: std::env::temp_dir(),
            progress_interval_bytes: DEFAULT_PROGRESS_INTERVAL,
            connect_timeout_secs: Some(30),
            stall_timeout_secs: None,
            remove_archive: false,
        }
    }
}

#[allow(clippy::ptr_arg)] // serde passes &FieldType
fn is_build_tag(tag: &String) -> bool {
    tag == DEFAULT_WEBUI_TAG
}

#[allow(clippy::ptr_arg)] // serde passes &FieldType
fn is_build_repo(repo: &String) -> bool {
    repo == DEFAULT_WEBUI_REPO
}

#[allow(clippy::ptr_arg)] // serde passes &FieldType
fn is_host_temp_dir(dir: &PathBuf) -> bool {
    *dir == std::env::temp_dir()
}

impl ProvisionConfig {
    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            stall_timeout: self.stall_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// `~/.local/share/webui-provision/webUI`, or `./webUI` when XDG dirs are unavailable.
pub fn default_target_dir() -> PathBuf {
    xdg::BaseDirectories::with_prefix(APP_NAME)
        .ok()
        .and_then(|dirs| dirs.place_data_file("webUI").ok())
        .unwrap_or_else(|| PathBuf::from("webUI"))
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_NAME)?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ProvisionConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<ProvisionConfig> {
    if !path.exists() {
        let default_cfg = ProvisionConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: ProvisionConfig = toml::from_str(&data)?;
    Ok(cfg)
}
