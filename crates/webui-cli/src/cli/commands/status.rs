//! `webui-provision status` – installed vs expected revision.

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use webui_core::config::ProvisionConfig;
use webui_core::revision::InstalledRevision;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub target_dir: PathBuf,
    pub expected_tag: String,
    pub installed_tag: Option<String>,
    pub up_to_date: bool,
}

impl StatusReport {
    pub fn collect(cfg: &ProvisionConfig) -> Result<Self> {
        let installed = InstalledRevision::read(&cfg.target_dir)?;
        let up_to_date = installed
            .as_ref()
            .is_some_and(|r| r.matches(&cfg.expected_tag));
        Ok(Self {
            target_dir: cfg.target_dir.clone(),
            expected_tag: cfg.expected_tag.clone(),
            installed_tag: installed.map(|r| r.tag().to_string()),
            up_to_date,
        })
    }
}

pub fn run_status(cfg: &ProvisionConfig, json: bool) -> Result<()> {
    let report = StatusReport::collect(cfg)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("{:<10} {}", "TARGET", report.target_dir.display());
    println!("{:<10} {}", "EXPECTED", report.expected_tag);
    println!(
        "{:<10} {}",
        "INSTALLED",
        report.installed_tag.as_deref().unwrap_or("-")
    );
    println!(
        "{:<10} {}",
        "STATE",
        if report.up_to_date { "up-to-date" } else { "stale" }
    );
    Ok(())
}
