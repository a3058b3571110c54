//! Show-config command - effective settings and library contents

use crate::cli::output::{colors, print_header};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the show-config command
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Also print the raw library file
    #[arg(long, short = 'r')]
    pub raw: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub listen: String,
    pub static_dir: String,
    pub library_file: String,
    pub tunnel: TunnelInfo,
    pub directories: Vec<String>,
    pub tunnel_domains: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TunnelInfo {
    pub binary: String,
    pub enabled: bool,
}

/// Execute the show-config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = &services.settings;
    let library = services.store.snapshot()?;

    let response = ConfigResponse {
        listen: settings.bind_address(),
        static_dir: settings.server.static_dir.display().to_string(),
        library_file: services.store.path().display().to_string(),
        tunnel: TunnelInfo {
            binary: settings.tunnel.binary.clone(),
            enabled: settings.tunnel.enabled,
        },
        directories: library.directories.clone(),
        tunnel_domains: library.tunnel_domains.clone(),
    };

    match format {
        OutputFormat::Human => {
            print_header("Configuration:");
            println!("  listen: {}", response.listen);
            println!("  static_dir: {}", response.static_dir);
            println!("  library_file: {}", colors::file_path(&response.library_file));
            println!(
                "  tunnel: {} ({})",
                response.tunnel.binary,
                if response.tunnel.enabled { "enabled" } else { "disabled" }
            );
            print_header("Directories:");
            for dir in &response.directories {
                println!("  {}", colors::file_path(dir));
            }
            print_header("Tunnel domains:");
            for domain in &response.tunnel_domains {
                println!("  {}", colors::domain(domain));
            }
            if args.raw {
                println!();
                print!("{}", library.to_json()?);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
