//! Persisted library configuration.
//!
//! The library is the list of watched directories and tunnel domains,
//! stored as pretty-printed JSON:
//!
//! ```json
//! {
//!   "directories": ["/music"],
//!   "ngrok_domains": ["tunes.example.dev"]
//! }
//! ```
//!
//! [`ConfigStore`] owns the only in-memory copy behind a lock. Every
//! mutation is written to disk before it becomes visible in memory,
//! so readers never see state that failed to persist.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tempfile::NamedTempFile;

use crate::core::error::{LibraryError, Result};

/// Directories and tunnel domains, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub directories: Vec<String>,

    #[serde(default, rename = "ngrok_domains")]
    pub tunnel_domains: Vec<String>,
}

impl Library {
    /// Append a directory unless an identical string is present.
    /// Returns whether the library changed.
    pub fn add_directory(&mut self, path: &str) -> bool {
        push_unique(&mut self.directories, path)
    }

    /// Append a tunnel domain unless an identical string is present.
    /// Returns whether the library changed.
    pub fn add_domain(&mut self, domain: &str) -> bool {
        push_unique(&mut self.tunnel_domains, domain)
    }

    /// Serialize with 2-space indentation and a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

fn push_unique(items: &mut Vec<String>, value: &str) -> bool {
    if items.iter().any(|existing| existing == value) {
        return false;
    }
    items.push(value.to_string());
    true
}

/// What a [`ConfigStore::apply`] call actually added
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Applied {
    pub directory_added: bool,
    pub domain_added: bool,
}

impl Applied {
    pub fn changed(&self) -> bool {
        self.directory_added || self.domain_added
    }
}

/// Lock-guarded owner of the library and its file
///
/// Writers are serialized by `writer` for the whole read-modify-save
/// cycle; `library` is only write-locked for the final swap, so readers
/// never wait on disk I/O.
pub struct ConfigStore {
    path: PathBuf,
    library: RwLock<Library>,
    writer: Mutex<()>,
}

impl ConfigStore {
    /// Load the library from `path`
    ///
    /// A missing file yields an empty library which is written out
    /// immediately as the new baseline. A file that exists but cannot
    /// be read or parsed is a `ConfigLoad` error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let library = match read_library(&path)? {
            Some(library) => library,
            None => {
                let library = Library::default();
                save(&path, &library)?;
                tracing::info!(path = ?path, "Created default library config");
                library
            }
        };

        Ok(Self::loaded(path, library))
    }

    /// Load the library from `path` without ever writing to it
    ///
    /// A missing file yields an empty library in memory only. Used by
    /// commands that just inspect the library.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let library = read_library(&path)?.unwrap_or_default();
        Ok(Self::loaded(path, library))
    }

    fn loaded(path: PathBuf, library: Library) -> Self {
        tracing::info!(
            path = ?path,
            directories = library.directories.len(),
            domains = library.tunnel_domains.len(),
            "Library config loaded"
        );

        Self {
            path,
            library: RwLock::new(library),
            writer: Mutex::new(()),
        }
    }

    /// Location of the persisted library file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consistent copy of the current library
    pub fn snapshot(&self) -> Result<Library> {
        Ok(self.read()?.clone())
    }

    /// Add a directory and/or domain, persist, then commit in memory
    ///
    /// Concurrent updates are serialized. If nothing is new, the file
    /// is not rewritten. On save failure the in-memory library is
    /// untouched. Readers keep seeing the previous library until the
    /// save has succeeded.
    pub fn apply(&self, directory: Option<&str>, domain: Option<&str>) -> Result<Applied> {
        let _writer = self
            .writer
            .lock()
            .map_err(|_| LibraryError::StoreUnavailable("writer lock poisoned".to_string()))?;

        let mut next = self.snapshot()?;
        let applied = Applied {
            directory_added: directory.map(|d| next.add_directory(d)).unwrap_or(false),
            domain_added: domain.map(|d| next.add_domain(d)).unwrap_or(false),
        };

        if !applied.changed() {
            return Ok(applied);
        }

        save_with_retry(&self.path, &next)?;
        *self.write()? = next;

        Ok(applied)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Library>> {
        self.library
            .read()
            .map_err(|_| LibraryError::StoreUnavailable("library lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Library>> {
        self.library
            .write()
            .map_err(|_| LibraryError::StoreUnavailable("library lock poisoned".to_string()))
    }
}

/// Read and parse `path`; `None` when the file does not exist
fn read_library(path: &Path) -> Result<Option<Library>> {
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| LibraryError::ConfigLoad {
                path: path.to_path_buf(),
                reason: format!("invalid JSON: {e}"),
            }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LibraryError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

/// Write the library atomically to `path`
///
/// The JSON is written to a temporary file in the same directory and
/// renamed over the target, so the previous file stays intact if
/// anything fails midway.
pub fn save(path: &Path, library: &Library) -> Result<()> {
    let json = library.to_json()?;
    write_atomic(path, json.as_bytes()).map_err(|source| LibraryError::ConfigSave {
        path: path.to_path_buf(),
        source,
    })
}

/// One retry, then the error goes back to the caller
fn save_with_retry(path: &Path, library: &Library) -> Result<()> {
    match save(path, library) {
        Err(LibraryError::ConfigSave { source, .. }) => {
            tracing::warn!(path = ?path, error = %source, "Library save failed, retrying once");
            save(path, library)
        }
        other => other,
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
