//! audioshelf - a self-hosted audio library browser
//!
//! Lists audio files from a set of local directories as a web page,
//! streams them over HTTP and can expose the server through ngrok
//! tunnels. Directories and tunnel domains are persisted in a small
//! JSON file and can be added at runtime from the page's form.
//!
//! # Architecture
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - settings, error, types
//!   - store (persisted library file)
//!   - library (directory scanning, listing)
//!   - tunnel (ngrok process supervision)
//!   - update (form validation and apply)
//!   - services (unified service container)
//!
//! - **http**: axum adapter (depends on core)
//!   - handlers, middleware, HTML rendering
//!
//! - **cli**: clap adapter (depends on core and http)

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP adapter
pub mod http;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use self::core::error::{LibraryError, Result};
pub use self::core::services::Services;
pub use self::core::settings::Settings;
pub use self::core::store::{ConfigStore, Library};
pub use self::core::types::*;
