//! Library store integration tests
//!
//! Persistence round-trips, idempotent updates, rejected updates
//! leaving the file untouched, and concurrent readers and writers.

use crate::common::{library_file, test_settings, MusicTree};
use audioshelf::core::error::LibraryError;
use audioshelf::core::services::Services;
use audioshelf::core::store::{ConfigStore, Library};
use std::collections::BTreeSet;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_reload_yields_same_library() {
    let temp = TempDir::new().unwrap();
    let path = library_file(temp.path());

    let store = ConfigStore::load(&path).unwrap();
    store.apply(Some("/music/a"), Some("one.example.dev")).unwrap();
    store.apply(Some("/music/b"), None).unwrap();
    store.apply(None, Some("two.example.dev")).unwrap();
    let before = store.snapshot().unwrap();

    let reloaded = ConfigStore::load(&path).unwrap().snapshot().unwrap();

    assert_eq!(reloaded, before);
    assert_eq!(reloaded.directories, vec!["/music/a", "/music/b"]);
    assert_eq!(
        reloaded.tunnel_domains,
        vec!["one.example.dev", "two.example.dev"]
    );
}

#[test]
fn test_file_shape_matches_legacy_format() {
    let temp = TempDir::new().unwrap();
    let path = library_file(temp.path());

    let store = ConfigStore::load(&path).unwrap();
    store.apply(Some("/music"), Some("tunes.example.dev")).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "directories": ["/music"],
            "ngrok_domains": ["tunes.example.dev"]
        })
    );
}

#[test]
fn test_existing_file_is_loaded() {
    let temp = TempDir::new().unwrap();
    let path = library_file(temp.path());
    fs::write(
        &path,
        r#"{"directories":["/srv/music"],"ngrok_domains":["x.example.dev"]}"#,
    )
    .unwrap();

    let library = ConfigStore::load(&path).unwrap().snapshot().unwrap();

    assert_eq!(
        library,
        Library {
            directories: vec!["/srv/music".to_string()],
            tunnel_domains: vec!["x.example.dev".to_string()],
        }
    );
}

#[test]
fn test_repeated_apply_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let path = library_file(temp.path());
    let store = ConfigStore::load(&path).unwrap();

    let first = store.apply(Some("/music"), Some("tunes.example.dev")).unwrap();
    let after_first = fs::read(&path).unwrap();
    let second = store.apply(Some("/music"), Some("tunes.example.dev")).unwrap();

    assert!(first.changed());
    assert!(!second.changed());
    assert_eq!(fs::read(&path).unwrap(), after_first);
    assert_eq!(store.snapshot().unwrap().directories.len(), 1);
    assert_eq!(store.snapshot().unwrap().tunnel_domains.len(), 1);
}

#[test]
fn test_corrupt_file_is_fatal() {
    let temp = TempDir::new().unwrap();
    let path = library_file(temp.path());
    fs::write(&path, "{ not json").unwrap();

    let err = Services::new(test_settings(temp.path())).err().unwrap();

    assert!(matches!(err, LibraryError::ConfigLoad { .. }));
    assert!(err.is_fatal());
    // The broken file is left for the user to fix
    assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
}

#[tokio::test]
async fn test_invalid_update_leaves_file_byte_identical() {
    let temp = TempDir::new().unwrap();
    let music = MusicTree::small();
    let services = Services::new(test_settings(temp.path())).unwrap();
    services
        .updates
        .apply(&music.root(), "tunes.example.dev")
        .await
        .unwrap();
    let before = fs::read(library_file(temp.path())).unwrap();
    let snapshot = services.store.snapshot().unwrap();

    let result = services
        .updates
        .apply("/definitely/not/here", "other.example.dev")
        .await;

    assert!(matches!(result, Err(LibraryError::InvalidDirectory(_))));
    assert_eq!(fs::read(library_file(temp.path())).unwrap(), before);
    assert_eq!(services.store.snapshot().unwrap(), snapshot);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_and_listings() {
    let temp = TempDir::new().unwrap();
    let services = Arc::new(Services::new(test_settings(temp.path())).unwrap());

    let dirs: Vec<MusicTree> = (0..8)
        .map(|i| {
            MusicTree::with_files(&[(format!("track{i}.mp3").as_str(), "mp3")])
        })
        .collect();

    let mut tasks = Vec::new();
    for (i, dir) in dirs.iter().enumerate() {
        let services = Arc::clone(&services);
        let root = dir.root();
        tasks.push(tokio::spawn(async move {
            services
                .updates
                .apply(&root, &format!("d{i}.example.dev"))
                .await
                .map(|_| ())
        }));
    }
    for _ in 0..8 {
        let services = Arc::clone(&services);
        tasks.push(tokio::spawn(async move {
            let view = services.library_view().await?;
            // Every listed directory is complete; no torn entries
            for dir in &view.directories {
                assert!(dir.error.is_none(), "{:?}", dir.error);
                assert_eq!(dir.files.len(), 1);
            }
            Ok::<(), LibraryError>(())
        }));
    }

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let expected_dirs: BTreeSet<String> = dirs.iter().map(MusicTree::root).collect();
    let expected_domains: BTreeSet<String> =
        (0..8).map(|i| format!("d{i}.example.dev")).collect();

    let library = services.store.snapshot().unwrap();
    assert_eq!(library.directories.len(), 8);
    assert_eq!(
        library.directories.iter().cloned().collect::<BTreeSet<_>>(),
        expected_dirs
    );
    assert_eq!(
        library.tunnel_domains.iter().cloned().collect::<BTreeSet<_>>(),
        expected_domains
    );

    // Memory and disk agree
    let on_disk = ConfigStore::load(library_file(temp.path()))
        .unwrap()
        .snapshot()
        .unwrap();
    assert_eq!(on_disk, library);
}
