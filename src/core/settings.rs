//! Server settings for the audioshelf service.
//!
//! Settings describe how the process runs (listen address, where the
//! library file lives, which tunnel binary to use). They are loaded
//! once at startup from an optional TOML file and environment
//! variables, with sensible defaults for all values. The mutable
//! library (directories and tunnel domains) lives in
//! [`crate::core::store`], not here.

use crate::core::error::{LibraryError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "audioshelf.toml";

/// Main settings structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub library: LibrarySettings,
    #[serde(default)]
    pub tunnel: TunnelSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    /// Also the port every tunnel forwards to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

/// Library persistence settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// JSON file holding directories and tunnel domains
    #[serde(default = "default_config_file")]
    pub config_file: PathBuf,
}

/// Tunnel process settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TunnelSettings {
    /// Executable name or path of the reverse-tunnel client
    #[serde(default = "default_tunnel_binary")]
    pub binary: String,

    /// When false, domains are still stored but no process is started
    #[serde(default = "default_tunnel_enabled")]
    pub enabled: bool,
}

/// Log output settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_config_file() -> PathBuf {
    PathBuf::from("config.json")
}

fn default_tunnel_binary() -> String {
    "ngrok".to_string()
}

fn default_tunnel_enabled() -> bool {
    true
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            config_file: default_config_file(),
        }
    }
}

impl Default for TunnelSettings {
    fn default() -> Self {
        Self {
            binary: default_tunnel_binary(),
            enabled: default_tunnel_enabled(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

impl Settings {
    /// Load settings from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LibraryError::Settings(format!("Failed to read settings file: {e}")))?;

        let settings: Settings = toml::from_str(&contents)?;
        Ok(settings)
    }

    /// Load settings with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings, optionally from an explicit TOML file
    ///
    /// Without `path`, the file is taken from `AUDIOSHELF_CONFIG`
    /// when set, otherwise `./audioshelf.toml` if it exists.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Ok(path) = env::var("AUDIOSHELF_CONFIG") {
            Self::from_file(path)?
        } else if Path::new(DEFAULT_SETTINGS_FILE).exists() {
            Self::from_file(DEFAULT_SETTINGS_FILE)?
        } else {
            Self::default()
        };

        settings.merge_env();
        settings.validate()?;

        Ok(settings)
    }

    /// Merge settings with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(host) = env::var("AUDIOSHELF_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("AUDIOSHELF_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(dir) = env::var("AUDIOSHELF_STATIC_DIR") {
            self.server.static_dir = PathBuf::from(dir);
        }
        if let Ok(file) = env::var("AUDIOSHELF_LIBRARY_FILE") {
            self.library.config_file = PathBuf::from(file);
        }
        if let Ok(binary) = env::var("AUDIOSHELF_TUNNEL_BINARY") {
            self.tunnel.binary = binary;
        }
        if let Ok(enabled) = env::var("AUDIOSHELF_TUNNEL_ENABLED") {
            if let Ok(e) = enabled.parse() {
                self.tunnel.enabled = e;
            }
        }
        if let Ok(format) = env::var("AUDIOSHELF_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Validate settings values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(LibraryError::Settings(
                "Server port must be non-zero".to_string(),
            ));
        }

        if self.library.config_file.as_os_str().is_empty() {
            return Err(LibraryError::Settings(
                "Library config file path must not be empty".to_string(),
            ));
        }

        if self.tunnel.binary.trim().is_empty() {
            return Err(LibraryError::Settings(
                "Tunnel binary must not be empty".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(LibraryError::Settings(format!(
                "Unknown log format '{}' (expected 'pretty' or 'json')",
                self.logging.format
            )));
        }

        Ok(())
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log effective settings
    pub fn log_config(&self) {
        tracing::info!("Settings loaded:");
        tracing::info!("  Listen address: {}", self.bind_address());
        tracing::info!("  Static dir: {:?}", self.server.static_dir);
        tracing::info!("  Library file: {:?}", self.library.config_file);
        tracing::info!(
            "  Tunnel binary: {} ({})",
            self.tunnel.binary,
            if self.tunnel.enabled { "enabled" } else { "disabled" }
        );
    }
}
