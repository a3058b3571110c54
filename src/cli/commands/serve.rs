//! Serve command - run the web server

use crate::core::error::LibraryError;
use crate::core::services::Services;
use crate::core::settings::Settings;
use crate::http;
use clap::Args;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Arguments for the serve command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind (overrides settings)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on; tunnels forward here too
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Library file holding directories and tunnel domains
    #[arg(long, short = 'l')]
    pub library: Option<PathBuf>,

    /// Store tunnel domains without starting any tunnel process
    #[arg(long)]
    pub no_tunnels: bool,
}

impl ServeArgs {
    /// Apply command-line overrides on top of loaded settings
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(library) = &self.library {
            settings.library.config_file = library.clone();
        }
        if self.no_tunnels {
            settings.tunnel.enabled = false;
        }
    }
}

/// Execute the serve command
///
/// Runs until Ctrl-C. Tunnel processes started here are not stopped
/// on shutdown.
pub async fn execute(
    args: ServeArgs,
    mut settings: Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    args.apply_to(&mut settings);
    settings.validate()?;

    tracing::info!("Starting audioshelf");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    settings.log_config();

    let addr = settings.bind_address();
    let services = Arc::new(Services::new(settings)?);
    let library = services.store.snapshot()?;
    tracing::info!(
        directories = library.directories.len(),
        domains = library.tunnel_domains.len(),
        "Library loaded from {:?}",
        services.store.path()
    );

    // Launch tasks are detached; their outcome is logged by the supervisor
    let _tunnels = services.start_tunnels()?;

    let listener = TcpListener::bind(&addr).await.map_err(LibraryError::from)?;
    tracing::info!("Serving music on http://{}", addr);

    run_server(listener, services, shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Serve the router on `listener` until `shutdown` resolves
pub async fn run_server<F>(
    listener: TcpListener,
    services: Arc<Services>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = http::router(services);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
