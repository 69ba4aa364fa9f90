//! Tests for status, fingerprint, url, completions.

use super::parse;
use crate::cli::commands::StatusReport;
use crate::cli::CliCommand;
use clap::Parser;
use clap_complete::Shell;
use std::fs;
use std::path::Path;
use webui_core::config::ProvisionConfig;

#[test]
fn cli_parse_status() {
    match parse(&["webui-provision", "status"]) {
        CliCommand::Status { overrides, json } => {
            assert!(overrides.tag.is_none());
            assert!(!json);
        }
        _ => panic!("expected Status"),
    }
}

#[test]
fn cli_parse_status_json() {
    match parse(&["webui-provision", "status", "--json", "--tag", "r7"]) {
        CliCommand::Status { overrides, json } => {
            assert!(json);
            assert_eq!(overrides.tag.as_deref(), Some("r7"));
        }
        _ => panic!("expected Status --json"),
    }
}

#[test]
fn cli_parse_fingerprint() {
    match parse(&["webui-provision", "fingerprint"]) {
        CliCommand::Fingerprint { dir } => assert!(dir.is_none()),
        _ => panic!("expected Fingerprint"),
    }
    match parse(&["webui-provision", "fingerprint", "/srv/webUI"]) {
        CliCommand::Fingerprint { dir } => {
            assert_eq!(dir.as_deref(), Some(Path::new("/srv/webUI")))
        }
        _ => panic!("expected Fingerprint with dir"),
    }
}

#[test]
fn cli_parse_url() {
    match parse(&["webui-provision", "url", "--tag", "v2"]) {
        CliCommand::Url { overrides } => assert_eq!(overrides.tag.as_deref(), Some("v2")),
        _ => panic!("expected Url"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["webui-provision", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_rejects_unknown_subcommand() {
    assert!(crate::cli::Cli::try_parse_from(["webui-provision", "install"]).is_err());
}

#[test]
fn status_report_up_to_date_and_stale() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ProvisionConfig {
        target_dir: dir.path().to_path_buf(),
        expected_tag: "v1.2.3".to_string(),
        ..ProvisionConfig::default()
    };

    let missing = StatusReport::collect(&cfg).unwrap();
    assert_eq!(missing.installed_tag, None);
    assert!(!missing.up_to_date);

    fs::write(dir.path().join("revision"), "v1.2.3\n").unwrap();
    let current = StatusReport::collect(&cfg).unwrap();
    assert_eq!(current.installed_tag.as_deref(), Some("v1.2.3"));
    assert!(current.up_to_date);

    fs::write(dir.path().join("revision"), "v1.0.0").unwrap();
    let stale = StatusReport::collect(&cfg).unwrap();
    assert!(!stale.up_to_date);

    let json = serde_json::to_value(&stale).unwrap();
    assert_eq!(json["installed_tag"], "v1.0.0");
    assert_eq!(json["up_to_date"], false);
}
