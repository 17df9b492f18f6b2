//! Integration tests for dry-run mode
//!
//! These tests verify that dry-run mode validates and plans the export but
//! never contacts the platform.

use clap::Parser;
use mockito::{Matcher, Server};
use ndws::cli::{run, Cli};
use ndws::config::{NdwsConfig, PlatformConfig};
use ndws::core::export::ExportCoordinator;
use ndws::domain::errors::{EXIT_INVALID_INPUT, EXIT_SUCCESS};
use ndws::domain::{ExportRequest, Split};
use std::io::Write;
use tempfile::NamedTempFile;

fn request() -> ExportRequest {
    ExportRequest::builder()
        .bucket("my-bucket")
        .start_date("2020-01-01")
        .end_date("2021-01-01")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_dry_run_coordinator_makes_no_call() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut config = NdwsConfig::default();
    config.application.dry_run = true;
    config.platform = PlatformConfig {
        base_url: server.url(),
        ..Default::default()
    };

    let coordinator = ExportCoordinator::from_config(&config).unwrap();
    assert!(coordinator.is_dry_run());

    let summary = coordinator.execute_export(&request()).await.unwrap();

    assert!(summary.dry_run);
    assert!(summary.jobs.is_empty());
    assert!(summary.is_successful());
    assert_eq!(summary.destination, "gs://my-bucket/next_day_wildfire_spread");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_dry_run_summary_covers_every_day() {
    let coordinator = {
        let mut config = NdwsConfig::default();
        config.application.dry_run = true;
        ExportCoordinator::from_config(&config).unwrap()
    };

    let summary = coordinator.execute_export(&request()).await.unwrap();

    let days: i64 = summary.splits.iter().map(|s| s.days).sum();
    assert_eq!(days, 367);
    assert_eq!(summary.splits.len(), 3);
    assert!(summary
        .splits
        .iter()
        .any(|s| s.split == Split::Train && s.windows > 0));
}

#[tokio::test]
async fn test_dry_run_flag_from_cli() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[platform]\nbase_url = \"{}\"", server.url()).unwrap();
    let config_path = file.path().to_string_lossy().to_string();

    let code = run(Cli::parse_from([
        "ndws",
        "--config",
        config_path.as_str(),
        "--bucket=my-bucket",
        "--start_date=2020-01-01",
        "--end_date=2021-01-01",
        "--dry-run",
    ]))
    .await
    .unwrap();

    assert_eq!(code, EXIT_SUCCESS);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_dry_run_still_validates_arguments() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[application]\ndry_run = true").unwrap();
    let config_path = file.path().to_string_lossy().to_string();

    let code = run(Cli::parse_from([
        "ndws",
        "--config",
        config_path.as_str(),
        "--bucket=my-bucket",
        "--start_date=2020-01-01",
        "--end_date=2020-01-01",
    ]))
    .await
    .unwrap();

    assert_eq!(code, EXIT_INVALID_INPUT);
}
