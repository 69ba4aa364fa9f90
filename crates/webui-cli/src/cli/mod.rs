//! CLI for provisioning the web UI bundle.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use webui_core::config::{self, ProvisionConfig};

use commands::{run_completions, run_fingerprint, run_provision, run_status, run_url};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "webui-provision")]
#[command(about = "Install or verify the tagged web UI bundle", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Per-invocation overrides for values from config.toml.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Directory holding the extracted web UI.
    #[arg(long, value_name = "DIR")]
    pub target_dir: Option<PathBuf>,
    /// Release tag the installed web UI must match.
    #[arg(long, value_name = "TAG")]
    pub tag: Option<String>,
    /// Release host base URL (e.g. https://github.com/<owner>/<repo>).
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
    /// Archive name prefix (<bundle>-<tag>.zip).
    #[arg(long, value_name = "NAME")]
    pub bundle_name: Option<String>,
    /// Scratch directory for the downloaded archive.
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn apply(&self, cfg: &mut ProvisionConfig) {
        if let Some(d) = &self.target_dir {
            cfg.target_dir = d.clone();
        }
        if let Some(t) = &self.tag {
            cfg.expected_tag = t.clone();
        }
        if let Some(u) = &self.base_url {
            cfg.download_base_url = u.clone();
        }
        if let Some(b) = &self.bundle_name {
            cfg.bundle_name = b.clone();
        }
        if let Some(d) = &self.temp_dir {
            cfg.temp_dir = d.clone();
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Ensure the target directory holds the expected release, downloading it if needed.
    Provision {
        #[command(flatten)]
        overrides: ConfigOverrides,
        /// Delete the downloaded archive after extraction.
        #[arg(long)]
        remove_archive: bool,
        /// Do not print download progress markers.
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show installed vs expected revision.
    Status {
        #[command(flatten)]
        overrides: ConfigOverrides,
        /// Print a JSON object instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print the content fingerprint of a directory (default: the target dir).
    Fingerprint {
        /// Directory to fingerprint.
        dir: Option<PathBuf>,
    },

    /// Print the release URL that would be downloaded.
    Url {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Provision {
                overrides,
                remove_archive,
                quiet,
            } => {
                let mut cfg = load_config(&overrides)?;
                cfg.remove_archive |= remove_archive;
                run_provision(&cfg, quiet)?;
            }
            CliCommand::Status { overrides, json } => run_status(&load_config(&overrides)?, json)?,
            CliCommand::Fingerprint { dir } => {
                let dir = match dir {
                    Some(d) => d,
                    None => load_config(&ConfigOverrides::default())?.target_dir,
                };
                run_fingerprint(&dir)?;
            }
            CliCommand::Url { overrides } => run_url(&load_config(&overrides)?),
            CliCommand::Completions { shell } => run_completions(shell)?,
        }

        Ok(())
    }
}

/// config.toml (created with defaults on first use) plus command-line overrides.
fn load_config(overrides: &ConfigOverrides) -> Result<ProvisionConfig> {
    let mut cfg = config::load_or_init()?;
    overrides.apply(&mut cfg);
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
