//! Tests for the list command

use crate::common::{create_test_services, library_file, test_settings, MusicTree};
use audioshelf::cli::commands::list::{execute, ListArgs};
use audioshelf::cli::OutputFormat;
use audioshelf::core::services::Services;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_list_empty_library() {
    let (services, _temp) = create_test_services();

    let result = execute(ListArgs::default(), &services, OutputFormat::Human).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_list_human_and_json() {
    let (services, _temp) = create_test_services();
    let music = MusicTree::small();
    services.store.apply(Some(&music.root()), None).unwrap();
    services.store.apply(Some("/no/such/dir"), None).unwrap();

    execute(ListArgs { urls: true }, &services, OutputFormat::Human)
        .await
        .unwrap();
    execute(ListArgs::default(), &services, OutputFormat::Json)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_does_not_create_library_file() {
    let temp = TempDir::new().unwrap();
    let services = Arc::new(Services::open(test_settings(temp.path())).unwrap());

    execute(ListArgs::default(), &services, OutputFormat::Json)
        .await
        .unwrap();

    assert!(!library_file(temp.path()).exists());
}
