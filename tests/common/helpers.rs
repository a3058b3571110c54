// Test helper functions

use audioshelf::core::services::Services;
use audioshelf::core::settings::Settings;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Settings pointing at a library file inside `dir`, tunnels disabled
#[allow(dead_code)] // Used in integration tests
pub fn test_settings(dir: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.library.config_file = library_file(dir);
    settings.server.static_dir = dir.join("static");
    settings.tunnel.enabled = false;
    settings
}

/// Location of the library file used by [`test_settings`]
#[allow(dead_code)] // Used in integration tests
pub fn library_file(dir: &Path) -> PathBuf {
    dir.join("config.json")
}

/// Create test services with a temporary library file
///
/// Keep the returned TempDir alive for the duration of the test.
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services() -> (Arc<Services>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let services =
        Services::new(test_settings(temp_dir.path())).expect("Failed to create services");
    (Arc::new(services), temp_dir)
}
