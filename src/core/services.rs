//! Unified service container for audioshelf
//!
//! Provides shared access to all core services.

use crate::core::error::{LibraryError, Result};
use crate::core::library::{LibraryScanner, ListingService};
use crate::core::settings::Settings;
use crate::core::store::ConfigStore;
use crate::core::tunnel::{TunnelOutcome, TunnelSupervisor};
use crate::core::types::LibraryView;
use crate::core::update::ConfigUpdateHandler;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Unified services container
///
/// The HTTP router and the CLI commands share this struct.
#[derive(Clone)]
pub struct Services {
    /// Persisted directories and tunnel domains
    pub store: Arc<ConfigStore>,

    /// Builds the listing page data
    pub listing: Arc<ListingService>,

    /// Starts tunnel processes
    pub tunnels: Arc<TunnelSupervisor>,

    /// Validates and applies form submissions
    pub updates: Arc<ConfigUpdateHandler>,

    /// Process settings
    pub settings: Arc<Settings>,
}

impl Services {
    /// Create services from settings, loading the library file
    ///
    /// # Errors
    ///
    /// - `ConfigLoad`: library file unreadable or unparsable
    pub fn new(settings: Settings) -> Result<Self> {
        let store = ConfigStore::load(&settings.library.config_file)?;
        Ok(Self::with_store(settings, store))
    }

    /// Create services for read-only use
    ///
    /// Like [`Services::new`] but a missing library file is not
    /// created.
    pub fn open(settings: Settings) -> Result<Self> {
        let store = ConfigStore::open(&settings.library.config_file)?;
        Ok(Self::with_store(settings, store))
    }

    /// Create services around an already loaded store
    pub fn with_store(settings: Settings, store: ConfigStore) -> Self {
        let store = Arc::new(store);
        let tunnels = Arc::new(TunnelSupervisor::new(
            &settings.tunnel,
            settings.server.port,
        ));
        let updates = Arc::new(ConfigUpdateHandler::new(
            Arc::clone(&store),
            Arc::clone(&tunnels),
        ));

        Self {
            store,
            listing: Arc::new(ListingService::new(LibraryScanner::new())),
            tunnels,
            updates,
            settings: Arc::new(settings),
        }
    }

    /// Snapshot the library and scan it on a blocking thread
    pub async fn library_view(&self) -> Result<LibraryView> {
        let library = self.store.snapshot()?;
        let listing = Arc::clone(&self.listing);

        tokio::task::spawn_blocking(move || listing.build_listing(&library))
            .await
            .map_err(|e| LibraryError::StoreUnavailable(format!("listing task failed: {e}")))
    }

    /// Filesystem root mounted at `/files/<index>`, if configured
    pub fn directory_root(&self, index: usize) -> Result<Option<PathBuf>> {
        Ok(self
            .store
            .snapshot()?
            .directories
            .get(index)
            .map(PathBuf::from))
    }

    /// Launch a tunnel for every domain already in the library
    pub fn start_tunnels(&self) -> Result<Vec<JoinHandle<TunnelOutcome>>> {
        let library = self.store.snapshot()?;
        if !library.tunnel_domains.is_empty() {
            tracing::info!(
                count = library.tunnel_domains.len(),
                "Starting tunnels for configured domains"
            );
        }
        Ok(self.tunnels.launch_all(&library.tunnel_domains))
    }
}
