//! Tests for the show-config command

use crate::common::{create_test_services, library_file, test_settings};
use audioshelf::cli::commands::config::{execute, ConfigArgs};
use audioshelf::cli::OutputFormat;
use audioshelf::core::services::Services;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_show_config_human() {
    let (services, _temp) = create_test_services();
    services
        .store
        .apply(Some("/music"), Some("tunes.example.dev"))
        .unwrap();

    let result = execute(ConfigArgs { raw: true }, &services, OutputFormat::Human).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_show_config_json() {
    let (services, _temp) = create_test_services();

    let result = execute(ConfigArgs::default(), &services, OutputFormat::Json).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_show_config_does_not_create_library_file() {
    let temp = TempDir::new().unwrap();
    let services = Arc::new(Services::open(test_settings(temp.path())).unwrap());

    execute(ConfigArgs { raw: true }, &services, OutputFormat::Human)
        .await
        .unwrap();

    assert!(!library_file(temp.path()).exists());
}
