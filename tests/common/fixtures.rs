// Test fixtures for integration testing

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Directory tree of fake audio (and non-audio) files
#[allow(dead_code)] // Used in integration tests
pub struct MusicTree {
    pub dir: TempDir,
}

impl MusicTree {
    /// Small mixed tree used across tests
    ///
    /// Audio files, sorted by path:
    /// - `jazz/take.flac`
    /// - `loose.ogg`
    /// - `rock/album one/01 intro.mp3`
    #[allow(dead_code)] // Used in integration tests
    pub fn small() -> Self {
        Self::with_files(&[
            ("rock/album one/01 intro.mp3", "ID3-intro"),
            ("rock/album one/cover.jpg", "jpeg"),
            ("jazz/take.flac", "fLaC-take"),
            ("jazz/notes.txt", "liner notes"),
            ("loose.ogg", "OggS-loose"),
            ("shout.MP3", "upper-case extension"),
        ])
    }

    /// Tree with the given `(relative_path, content)` files
    #[allow(dead_code)] // Used in integration tests
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        for (path, content) in files {
            let full_path = dir.path().join(path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create directories");
            }
            std::fs::write(&full_path, content).expect("Failed to write file");
        }
        Self { dir }
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Root as the string stored in the library file
    #[allow(dead_code)] // Used in integration tests
    pub fn root(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}
