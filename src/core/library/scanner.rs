//! Audio file discovery.
//!
//! Walks a directory tree and yields every file whose name ends in
//! one of the recognized audio extensions. Matching is by filename
//! suffix only and is case-sensitive (`song.FLAC` is not listed).
//!
//! Traversal is fail-fast: the first error anywhere under the root
//! ends the scan with `DirectoryUnreadable`, rather than silently
//! skipping the unreadable subtree.

use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fs;
use std::io;
use std::iter::FusedIterator;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::core::error::{LibraryError, Result};
use crate::core::types::FileEntry;

/// Recognized audio extensions, including the leading dot
pub const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav", ".ogg", ".flac", ".aac"];

/// Bytes escaped inside a single path segment: everything except
/// RFC 3986 unreserved characters
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Check a file name against [`AUDIO_EXTENSIONS`]
///
/// The extension is everything from the last `.` on, so a file named
/// just `.mp3` counts.
pub fn is_audio_file(name: &str) -> bool {
    name.rfind('.')
        .map(|dot| AUDIO_EXTENSIONS.contains(&&name[dot..]))
        .unwrap_or(false)
}

/// Percent-encode a relative path for use in a URL
///
/// Each component is escaped on its own and the results are joined
/// with `/`, so the separator survives as a real path separator.
pub fn encode_relative_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => {
                Some(percent_encode(segment.as_encoded_bytes(), SEGMENT).to_string())
            }
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Inverse of [`encode_relative_path`]
pub fn decode_relative_path(encoded: &str) -> String {
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}

/// Scanner for audio files under a directory root
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryScanner {
    /// Follow symbolic links while walking
    follow_links: bool,
}

impl LibraryScanner {
    /// Create a scanner that does not follow symlinks
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow symbolic links into linked directories
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    /// Start a lazy scan of `root`
    ///
    /// # Errors
    ///
    /// - `DirectoryUnreadable`: root missing, not a directory, or
    ///   cannot be listed
    pub fn scan(&self, root: impl AsRef<Path>) -> Result<Scan> {
        let root = root.as_ref();
        let unreadable = |source: io::Error| LibraryError::DirectoryUnreadable {
            path: root.to_path_buf(),
            source,
        };

        let metadata = fs::metadata(root).map_err(unreadable)?;
        if !metadata.is_dir() {
            return Err(unreadable(io::Error::new(
                io::ErrorKind::NotADirectory,
                "not a directory",
            )));
        }

        // Surface permission problems on the root itself before iteration
        fs::read_dir(root).map_err(unreadable)?;

        let walker = WalkDir::new(root)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter();

        Ok(Scan {
            root: root.to_path_buf(),
            walker,
            finished: false,
        })
    }

    /// Scan `root` to completion
    ///
    /// Returns the first traversal error instead of a partial list.
    pub fn collect(&self, root: impl AsRef<Path>) -> Result<Vec<FileEntry>> {
        self.scan(root)?.collect()
    }
}

/// Lazy, single-pass sequence of audio files under one root
///
/// Entries come out in file-name order within each directory. After
/// an error is yielded the iterator is exhausted.
pub struct Scan {
    root: PathBuf,
    walker: walkdir::IntoIter,
    finished: bool,
}

impl Scan {
    /// Root directory this scan walks
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry(&self, path: &Path, name: String) -> FileEntry {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        FileEntry {
            name,
            relative_path: encode_relative_path(relative),
        }
    }
}

impl Iterator for Scan {
    type Item = Result<FileEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.walker.next() {
                None => {
                    self.finished = true;
                    return None;
                }
                Some(Ok(entry)) => {
                    if entry.file_type().is_dir() {
                        continue;
                    }

                    let name = entry.file_name().to_string_lossy().into_owned();
                    if !is_audio_file(&name) {
                        continue;
                    }

                    return Some(Ok(self.entry(entry.path(), name)));
                }
                Some(Err(e)) => {
                    self.finished = true;
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    tracing::debug!("Walk error under {:?}: {}", self.root, e);
                    return Some(Err(LibraryError::DirectoryUnreadable {
                        path,
                        source: e.into(),
                    }));
                }
            }
        }
    }
}

impl FusedIterator for Scan {}
