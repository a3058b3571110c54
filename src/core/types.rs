//! Core data types shared by the HTTP and CLI adapters.

use serde::{Deserialize, Serialize};

/// One audio file found during a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Base name of the file
    pub name: String,

    /// Path relative to the directory root, percent-encoded per
    /// segment with `/` kept as the separator
    pub relative_path: String,
}

/// Scan result for a single configured directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    /// Position of the directory in the library
    pub index: usize,

    /// Directory root as configured
    pub path: String,

    /// URL prefix the directory's files are served under
    pub mount: String,

    pub files: Vec<FileEntry>,

    /// Set when the directory could not be scanned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DirectoryListing {
    /// Download URL for one of this directory's files
    pub fn file_url(&self, file: &FileEntry) -> String {
        format!("{}/{}", self.mount, file.relative_path)
    }
}

/// Everything the listing page shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryView {
    pub directories: Vec<DirectoryListing>,
    pub tunnel_domains: Vec<String>,
}

impl LibraryView {
    /// Total number of audio files across all directories
    pub fn file_count(&self) -> usize {
        self.directories.iter().map(|d| d.files.len()).sum()
    }
}

/// Form submitted to `/update`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateForm {
    #[serde(default)]
    pub directory: String,

    /// Tunnel domain; the form field is named after the tunnel client
    #[serde(default)]
    pub ngrok: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
