//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod add;
pub mod completions;
pub mod config;
pub mod list;
pub mod serve;

// Re-export argument types for use in mod.rs
pub use add::AddArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use list::ListArgs;
pub use serve::ServeArgs;
