//! audioshelf entry point
//!
//! With no subcommand, starts the web server.

use audioshelf::cli::{output::print_error, run, Cli};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
