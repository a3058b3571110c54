//! Library updates submitted through the web form or CLI.
//!
//! Validation rules:
//! - both fields are trimmed; an empty field is skipped
//! - a directory must exist on disk (stat succeeds), otherwise the
//!   whole update is rejected with `InvalidDirectory` and nothing is
//!   written
//! - a domain is accepted as-is
//!
//! A newly added domain gets a tunnel launched in the background; a
//! domain that was already known does not.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::core::error::{LibraryError, Result};
use crate::core::store::ConfigStore;
use crate::core::tunnel::{TunnelOutcome, TunnelSupervisor};

/// Result of a successful update
#[derive(Debug, Default)]
pub struct UpdateOutcome {
    pub directory_added: bool,
    pub domain_added: bool,

    /// Background launch task for a newly added domain
    pub tunnel: Option<JoinHandle<TunnelOutcome>>,
}

/// Validates and applies library additions
pub struct ConfigUpdateHandler {
    store: Arc<ConfigStore>,
    tunnels: Arc<TunnelSupervisor>,
}

impl ConfigUpdateHandler {
    pub fn new(store: Arc<ConfigStore>, tunnels: Arc<TunnelSupervisor>) -> Self {
        Self { store, tunnels }
    }

    /// Apply a form submission
    ///
    /// # Errors
    ///
    /// - `InvalidDirectory`: directory given but does not exist
    /// - `ConfigSave`: library could not be persisted
    pub async fn apply(&self, directory: &str, domain: &str) -> Result<UpdateOutcome> {
        let directory = non_empty(directory);
        let domain = non_empty(domain);

        if let Some(dir) = directory.as_deref() {
            validate_directory(dir).await?;
        }

        let store = Arc::clone(&self.store);
        let (dir, dom) = (directory.clone(), domain.clone());
        let applied = tokio::task::spawn_blocking(move || store.apply(dir.as_deref(), dom.as_deref()))
            .await
            .map_err(|e| LibraryError::StoreUnavailable(format!("update task failed: {e}")))??;

        tracing::info!(
            directory = ?directory,
            domain = ?domain,
            directory_added = applied.directory_added,
            domain_added = applied.domain_added,
            "Library updated"
        );

        let tunnel = match domain.as_deref() {
            Some(domain) if applied.domain_added => Some(self.tunnels.launch(domain)),
            _ => None,
        };

        Ok(UpdateOutcome {
            directory_added: applied.directory_added,
            domain_added: applied.domain_added,
            tunnel,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

async fn validate_directory(dir: &str) -> Result<()> {
    tokio::fs::metadata(dir)
        .await
        .map(|_| ())
        .map_err(|e| LibraryError::InvalidDirectory(format!("{dir}: {e}")))
}
