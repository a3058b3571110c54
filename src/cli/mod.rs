//! CLI adapter for audioshelf
//!
//! Runs the web server and offers offline access to the library file.
//! This module is parallel to `http/` - both depend on `core/` but the
//! CLI only reaches into `http/` to start the server.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!          +------------+------------+
//!          |                         |
//!          v                         v
//! +------------------+      +------------------+
//! |      http/       |<-----|      cli/        |
//! | (axum adapter)   |      | (clap adapter)   |
//! +------------------+      +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::services::Services;
use crate::core::settings::Settings;

/// audioshelf - browse and share a local audio library over HTTP
///
/// Serves configured directories as a browsable list of audio files
/// and can expose the server through reverse tunnels.
#[derive(Parser, Debug)]
#[command(name = "audioshelf")]
#[command(version)]
#[command(about = "Self-hosted audio library browser", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Settings file (TOML); defaults to $AUDIOSHELF_CONFIG or ./audioshelf.toml
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Command to run; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (and tunnels for configured domains)
    Serve(commands::ServeArgs),

    /// Scan the library and print every audio file
    ///
    /// Read-only: a missing library file is treated as empty.
    List(commands::ListArgs),

    /// Add a directory and/or tunnel domain to the library file
    ///
    /// Does not start tunnels. Run while the server is stopped; a
    /// running server does not reload the file.
    Add(commands::AddArgs),

    /// Show effective settings and library contents
    ///
    /// Read-only: a missing library file is treated as empty.
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  audioshelf completions bash > ~/.local/share/bash-completion/completions/audioshelf
    ///   zsh:   audioshelf completions zsh > ~/.zfunc/_audioshelf
    ///   fish:  audioshelf completions fish > ~/.config/fish/completions/audioshelf.fish
    Completions(commands::CompletionsArgs),
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over `default_filter`. Logs go to stderr so JSON
/// command output on stdout stays clean.
pub fn init_logging(format: &str, default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    // A subscriber may already be installed (tests, embedding)
    let _ = if format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Serve(commands::ServeArgs::default()));

    // Handle completions command early (doesn't need settings)
    if let Commands::Completions(args) = command {
        return commands::completions::execute(args);
    }

    let settings = Settings::load_from(cli.config.as_deref())?;

    match command {
        Commands::Serve(args) => {
            init_logging(&settings.logging.format, "audioshelf=info,tower_http=debug");
            commands::serve::execute(args, settings).await
        }
        Commands::List(args) => {
            init_logging(&settings.logging.format, "audioshelf=warn");
            let services = Arc::new(Services::open(settings)?);
            commands::list::execute(args, &services, cli.format).await
        }
        Commands::Add(args) => {
            init_logging(&settings.logging.format, "audioshelf=warn");
            commands::add::execute(args, settings, cli.format).await
        }
        Commands::ShowConfig(args) => {
            init_logging(&settings.logging.format, "audioshelf=warn");
            let services = Arc::new(Services::open(settings)?);
            commands::config::execute(args, &services, cli.format).await
        }
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
