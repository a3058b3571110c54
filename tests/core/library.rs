//! Library scanning and listing integration tests

use crate::common::MusicTree;
use audioshelf::core::library::{
    decode_relative_path, encode_relative_path, mount_prefix, LibraryScanner, ListingService,
};
use audioshelf::core::error::LibraryError;
use audioshelf::core::store::Library;
use std::fs;
use std::path::Path;

fn relative_paths(tree: &MusicTree) -> Vec<String> {
    LibraryScanner::new()
        .collect(tree.path())
        .unwrap()
        .into_iter()
        .map(|entry| entry.relative_path)
        .collect()
}

#[test]
fn test_scan_finds_exactly_audio_files() {
    let tree = MusicTree::small();

    assert_eq!(
        relative_paths(&tree),
        vec![
            "jazz/take.flac",
            "loose.ogg",
            "rock/album%20one/01%20intro.mp3"
        ]
    );
}

#[test]
fn test_scan_reports_base_names() {
    let tree = MusicTree::small();

    let names: Vec<String> = LibraryScanner::new()
        .collect(tree.path())
        .unwrap()
        .into_iter()
        .map(|entry| entry.name)
        .collect();

    assert_eq!(names, vec!["take.flac", "loose.ogg", "01 intro.mp3"]);
}

#[test]
fn test_every_supported_extension_is_listed() {
    let tree = MusicTree::with_files(&[
        ("a.mp3", ""),
        ("b.wav", ""),
        ("c.ogg", ""),
        ("d.flac", ""),
        ("e.aac", ""),
        ("f.m4a", ""),
        ("g.mp4", ""),
        ("h", ""),
    ]);

    assert_eq!(
        relative_paths(&tree),
        vec!["a.mp3", "b.wav", "c.ogg", "d.flac", "e.aac"]
    );
}

#[test]
fn test_encoded_paths_round_trip() {
    let cases = [
        "plain/track.mp3",
        "with space/and#hash.flac",
        "percent%sign/q?.ogg",
        "unicode/Café del Mar.mp3",
        "amp&plus+/x.wav",
    ];

    for case in cases {
        let encoded = encode_relative_path(Path::new(case));
        assert!(!encoded.contains(' '), "{encoded}");
        assert!(!encoded.contains('#'), "{encoded}");
        assert!(!encoded.contains('?'), "{encoded}");
        assert_eq!(decode_relative_path(&encoded), case);
    }
}

#[test]
fn test_listing_keeps_going_past_missing_directory() {
    let tree = MusicTree::small();
    let library = Library {
        directories: vec!["/no/such/music".to_string(), tree.root()],
        tunnel_domains: vec!["tunes.example.dev".to_string()],
    };

    let view = ListingService::default().build_listing(&library);

    assert_eq!(view.directories.len(), 2);
    assert!(view.directories[0].error.is_some());
    assert!(view.directories[0].files.is_empty());
    assert!(view.directories[1].error.is_none());
    assert_eq!(view.directories[1].files.len(), 3);
    assert_eq!(view.directories[1].mount, mount_prefix(1));
    assert_eq!(view.tunnel_domains, vec!["tunes.example.dev"]);
    assert_eq!(view.file_count(), 3);
}

#[test]
fn test_file_urls_are_scoped_to_their_directory() {
    let first = MusicTree::with_files(&[("same.mp3", "first")]);
    let second = MusicTree::with_files(&[("same.mp3", "second")]);
    let library = Library {
        directories: vec![first.root(), second.root()],
        tunnel_domains: vec![],
    };

    let view = ListingService::default().build_listing(&library);

    let urls: Vec<String> = view
        .directories
        .iter()
        .map(|dir| dir.file_url(&dir.files[0]))
        .collect();
    assert_eq!(urls, vec!["/files/0/same.mp3", "/files/1/same.mp3"]);
}

#[test]
fn test_extension_match_is_case_sensitive() {
    let tree = MusicTree::with_files(&[("a.mp3", ""), ("b.txt", ""), ("c.FLAC", "")]);

    assert_eq!(relative_paths(&tree), vec!["a.mp3"]);
}

#[test]
fn test_scan_is_single_pass() {
    let tree = MusicTree::small();
    let mut scan = LibraryScanner::new().scan(tree.path()).unwrap();

    assert_eq!(scan.by_ref().count(), 3);
    assert!(scan.next().is_none());
}

#[test]
fn test_walk_error_ends_scan() {
    let tree = MusicTree::with_files(&[("a.mp3", ""), ("zz/inner.mp3", ""), ("zz/more.mp3", "")]);
    let mut scan = LibraryScanner::new().scan(tree.path()).unwrap();

    let first = scan.next().unwrap().unwrap();
    assert_eq!(first.relative_path, "a.mp3");

    // Removed before the walker descends into it
    fs::remove_dir_all(tree.join("zz")).unwrap();

    let rest: Vec<_> = scan.collect();
    assert_eq!(rest.len(), 1);
    match &rest[0] {
        Err(LibraryError::DirectoryUnreadable { path, .. }) => {
            assert_eq!(path, &tree.join("zz"));
        }
        other => panic!("Expected DirectoryUnreadable, got {other:?}"),
    }
}

#[test]
fn test_listing_after_subdirectory_removed() {
    let tree = MusicTree::with_files(&[("a.mp3", ""), ("zz/inner.mp3", "")]);
    fs::remove_dir_all(tree.join("zz")).unwrap();
    let library = Library {
        directories: vec![tree.root()],
        tunnel_domains: vec![],
    };

    let view = ListingService::default().build_listing(&library);

    assert!(view.directories[0].error.is_none());
    assert_eq!(view.directories[0].files.len(), 1);
    assert_eq!(view.directories[0].files[0].relative_path, "a.mp3");
}
