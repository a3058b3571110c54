//! List command - scan the library and print every audio file

use crate::cli::output::{colors, pluralize, print_header, print_warning};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the list command
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Show the URL each file is served at instead of its relative path
    #[arg(long, short = 'u')]
    pub urls: bool,
}

/// Execute the list command
pub async fn execute(
    args: ListArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let view = services.library_view().await?;

    match format {
        OutputFormat::Human => {
            if view.directories.is_empty() {
                println!("No directories configured.");
                println!(
                    "{}",
                    colors::dim("Add one with: audioshelf add --directory <path>")
                );
                return Ok(());
            }

            for dir in &view.directories {
                print_header(&format!(
                    "{} ({})",
                    dir.path,
                    pluralize(dir.files.len(), "file", "files")
                ));
                if let Some(err) = &dir.error {
                    print_warning(err);
                    continue;
                }
                for file in &dir.files {
                    let shown = if args.urls {
                        dir.file_url(file)
                    } else {
                        file.relative_path.clone()
                    };
                    println!("  {}", colors::file_path(&shown));
                }
            }

            println!();
            println!(
                "{} in {}",
                colors::number(&pluralize(view.file_count(), "file", "files")),
                pluralize(view.directories.len(), "directory", "directories")
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}
