//! `webui-provision url` – print the release URL for the configured tag.

use webui_core::config::ProvisionConfig;
use webui_core::provision::release_url;

pub fn run_url(cfg: &ProvisionConfig) {
    println!(
        "{}",
        release_url(&cfg.download_base_url, &cfg.bundle_name, &cfg.expected_tag)
    );
}
