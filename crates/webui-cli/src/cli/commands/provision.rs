//! `webui-provision provision` – install or verify the web UI bundle.

use anyhow::{Context, Result};
use std::io::Write;
use webui_core::config::ProvisionConfig;
use webui_core::progress::ProgressStats;
use webui_core::provision::{ProvisionOutcome, Provisioner};

pub fn run_provision(cfg: &ProvisionConfig, quiet: bool) -> Result<()> {
    let provisioner = Provisioner::from_config(cfg);

    let mut last: Option<ProgressStats> = None;
    let mut print_mark = |stats: &ProgressStats| {
        last = Some(stats.clone());
        let mut err = std::io::stderr().lock();
        let _ = write!(err, " *");
        let _ = err.flush();
    };
    let on_progress: Option<&mut dyn FnMut(&ProgressStats)> = if quiet {
        None
    } else {
        Some(&mut print_mark)
    };

    let outcome = provisioner
        .ensure_provisioned(cfg, on_progress)
        .with_context(|| format!("provisioning web UI into {}", cfg.target_dir.display()));
    if let Some(stats) = &last {
        eprintln!(" {}", format_rate(stats));
    }

    match outcome? {
        ProvisionOutcome::AlreadyInstalled { tag, fingerprint } => {
            println!("web UI {tag} already installed ({fingerprint})");
        }
        ProvisionOutcome::Installed {
            tag,
            bytes_downloaded,
            archive_path,
        } => {
            println!(
                "installed web UI {tag} into {} ({bytes_downloaded} bytes downloaded)",
                cfg.target_dir.display()
            );
            if let Some(p) = archive_path {
                println!("archive kept at {}", p.display());
            }
        }
    }
    Ok(())
}

/// `"<n> KiB/s"` for the average rate up to `stats`.
pub fn format_rate(stats: &ProgressStats) -> String {
    format!("{:.1} KiB/s", stats.bytes_per_sec() / 1024.0)
}
