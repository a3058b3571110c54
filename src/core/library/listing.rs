//! Per-request library listing.
//!
//! Builds the [`LibraryView`] shown on the index page by scanning
//! every configured directory from scratch. Nothing is cached, so the
//! page always reflects what is on disk right now.

use crate::core::library::scanner::LibraryScanner;
use crate::core::store::Library;
use crate::core::types::{DirectoryListing, LibraryView};

/// URL prefix under which configured directories are mounted
pub const FILES_PREFIX: &str = "/files";

/// Mount point for the directory at `index` in the library
pub fn mount_prefix(index: usize) -> String {
    format!("{FILES_PREFIX}/{index}")
}

/// Composes the scanner over a library snapshot
#[derive(Debug, Clone, Default)]
pub struct ListingService {
    scanner: LibraryScanner,
}

impl ListingService {
    pub fn new(scanner: LibraryScanner) -> Self {
        Self { scanner }
    }

    /// Scan every directory in `library`, in order
    ///
    /// A directory that cannot be scanned gets an inline error and
    /// an empty file list; the remaining directories are unaffected.
    pub fn build_listing(&self, library: &Library) -> LibraryView {
        let directories = library
            .directories
            .iter()
            .enumerate()
            .map(|(index, path)| self.list_directory(index, path))
            .collect();

        LibraryView {
            directories,
            tunnel_domains: library.tunnel_domains.clone(),
        }
    }

    fn list_directory(&self, index: usize, path: &str) -> DirectoryListing {
        let (files, error) = match self.scanner.collect(path) {
            Ok(files) => (files, None),
            Err(e) => {
                tracing::warn!(directory = %path, error = %e, "Directory scan failed");
                (Vec::new(), Some(e.message()))
            }
        };

        DirectoryListing {
            index,
            path: path.to_string(),
            mount: mount_prefix(index),
            files,
            error,
        }
    }
}
