//! Add command - append a directory and/or tunnel domain
//!
//! Goes through the same validation as the web form. Tunnels are never
//! started from here; the next `serve` picks up new domains.

use crate::cli::output::{print_success, print_warning};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::settings::Settings;
use clap::Args;
use serde::Serialize;

/// Arguments for the add command
#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Directory to add; must exist
    #[arg(long, short = 'd')]
    pub directory: Option<String>,

    /// Tunnel domain to add
    #[arg(long)]
    pub domain: Option<String>,

    /// Library file (overrides settings)
    #[arg(long, short = 'l')]
    pub library: Option<std::path::PathBuf>,
}

/// Add response
#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub library_file: String,
    pub directory_added: bool,
    pub domain_added: bool,
}

/// Execute the add command
pub async fn execute(
    args: AddArgs,
    mut settings: Settings,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.directory.is_none() && args.domain.is_none() {
        return Err("Nothing to add: pass --directory and/or --domain".into());
    }

    if let Some(library) = &args.library {
        settings.library.config_file = library.clone();
    }
    settings.tunnel.enabled = false;

    let services = Services::new(settings)?;
    let outcome = services
        .updates
        .apply(
            args.directory.as_deref().unwrap_or(""),
            args.domain.as_deref().unwrap_or(""),
        )
        .await?;

    let response = AddResponse {
        library_file: services.store.path().display().to_string(),
        directory_added: outcome.directory_added,
        domain_added: outcome.domain_added,
    };

    match format {
        OutputFormat::Human => {
            if let Some(dir) = &args.directory {
                if response.directory_added {
                    print_success(&format!("Added directory {dir}"));
                } else {
                    print_warning(&format!("Directory already configured: {dir}"));
                }
            }
            if let Some(domain) = &args.domain {
                if response.domain_added {
                    print_success(&format!("Added tunnel domain {domain}"));
                } else {
                    print_warning(&format!("Tunnel domain already configured: {domain}"));
                }
            }
            println!("Library file: {}", response.library_file);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
