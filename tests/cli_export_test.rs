//! End-to-end tests of the export command over snapshot files

mod common;

use catalog_feed::cli::commands::export::ExportArgs;
use common::product;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tokio::sync::watch;

fn write_inputs(dir: &Path, domain_id: u32) -> (String, String) {
    let snapshot = common::snapshot((1..=7).map(product).collect());
    let catalog_path = dir.join("catalog.json");
    fs::write(&catalog_path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();

    let config_path = dir.join("catalog-feed.toml");
    let output_path = dir.join("feed.jsonl");
    fs::write(
        &config_path,
        format!(
            "[feed]\ndomain_id = {domain_id}\npage_size = 3\n\n[export]\noutput_path = {:?}\n\n[logging]\nlocal_enabled = false\n",
            output_path.to_string_lossy()
        ),
    )
    .unwrap();

    (
        config_path.to_string_lossy().to_string(),
        catalog_path.to_string_lossy().to_string(),
    )
}

fn args(catalog: String) -> ExportArgs {
    ExportArgs {
        catalog,
        output: None,
        cursor: None,
        page_size: None,
        dry_run: false,
    }
}

#[tokio::test]
async fn test_export_command_writes_feed() {
    let dir = TempDir::new().unwrap();
    let (config, catalog) = write_inputs(dir.path(), 1);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let code = args(catalog).execute(&config, shutdown_rx).await.unwrap();
    assert_eq!(code, 0);

    let contents = fs::read_to_string(dir.path().join("feed.jsonl")).unwrap();
    assert_eq!(contents.lines().count(), 7);
}

#[tokio::test]
async fn test_export_command_cursor_and_output_overrides() {
    let dir = TempDir::new().unwrap();
    let (config, catalog) = write_inputs(dir.path(), 1);
    let output = dir.path().join("resumed.jsonl");
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut args = args(catalog);
    args.output = Some(output.to_string_lossy().to_string());
    args.cursor = Some(4.into());

    assert_eq!(args.execute(&config, shutdown_rx).await.unwrap(), 0);
    let contents = fs::read_to_string(output).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(!dir.path().join("feed.jsonl").exists());
}

#[tokio::test]
async fn test_dry_run_keeps_previous_feed() {
    let dir = TempDir::new().unwrap();
    let (config, catalog) = write_inputs(dir.path(), 1);
    let feed = dir.path().join("feed.jsonl");

    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    assert_eq!(args(catalog.clone()).execute(&config, shutdown_rx).await.unwrap(), 0);
    let exported = fs::read_to_string(&feed).unwrap();
    assert_eq!(exported.lines().count(), 7);

    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut dry_run = args(catalog);
    dry_run.dry_run = true;
    assert_eq!(dry_run.execute(&config, shutdown_rx).await.unwrap(), 0);

    assert_eq!(fs::read_to_string(&feed).unwrap(), exported);
}

#[tokio::test]
async fn test_dry_run_creates_no_output() {
    let dir = TempDir::new().unwrap();
    let (config, catalog) = write_inputs(dir.path(), 1);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut dry_run = args(catalog);
    dry_run.dry_run = true;
    assert_eq!(dry_run.execute(&config, shutdown_rx).await.unwrap(), 0);
    assert!(!dir.path().join("feed.jsonl").exists());
}

#[tokio::test]
async fn test_export_command_unknown_domain() {
    let dir = TempDir::new().unwrap();
    let (config, catalog) = write_inputs(dir.path(), 9);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    assert_eq!(args(catalog).execute(&config, shutdown_rx).await.unwrap(), 2);
}

#[tokio::test]
async fn test_export_command_missing_catalog() {
    let dir = TempDir::new().unwrap();
    let (config, _) = write_inputs(dir.path(), 1);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    let missing = dir.path().join("missing.json").to_string_lossy().to_string();
    assert_eq!(args(missing).execute(&config, shutdown_rx).await.unwrap(), 5);
}

#[tokio::test]
async fn test_export_command_interrupted() {
    let dir = TempDir::new().unwrap();
    let (config, catalog) = write_inputs(dir.path(), 1);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    shutdown_tx.send(true).unwrap();

    assert_eq!(args(catalog).execute(&config, shutdown_rx).await.unwrap(), 1);
}
