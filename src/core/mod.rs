//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of the transport (HTTP or CLI).
//!
//! # Architecture
//!
//! - **settings**: Process settings (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Listing data structures
//! - **store**: Persisted library (directories and tunnel domains)
//! - **library**: Directory scanning and listing
//! - **tunnel**: Reverse-tunnel process launcher
//! - **update**: Validated library updates
//! - **services**: Unified service container

pub mod error;
pub mod library;
pub mod services;
pub mod settings;
pub mod store;
pub mod tunnel;
pub mod types;
pub mod update;

// Re-export key types for convenience
pub use error::{LibraryError, Result};
pub use services::Services;
pub use settings::Settings;
