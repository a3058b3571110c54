//! Reverse-tunnel process launcher.
//!
//! Each configured domain gets one external tunnel process exposing
//! the local HTTP port, started as
//! `<binary> http --domain=<domain> <port>`.
//!
//! Launching is fire-and-forget: [`TunnelSupervisor::launch`] returns
//! as soon as a background task is scheduled. A failure to start the
//! binary is logged and never reaches the caller. Nothing is retried
//! or health-checked, and no state is kept between launches.

use std::process::Stdio;
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::core::error::LibraryError;
use crate::core::settings::TunnelSettings;

/// How a launch task ended; only used for logging and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TunnelOutcome {
    /// Tunnels are switched off in settings
    Disabled,
    /// The binary could not be started
    SpawnFailed,
    /// The process ran and exited with this code (None if killed by a signal)
    Exited(Option<i32>),
}

/// Starts tunnel processes for domains
#[derive(Debug, Clone)]
pub struct TunnelSupervisor {
    binary: String,
    port: u16,
    enabled: bool,
}

impl TunnelSupervisor {
    /// Create a supervisor forwarding to the server's listening `port`
    pub fn new(settings: &TunnelSettings, port: u16) -> Self {
        Self {
            binary: settings.binary.clone(),
            port,
            enabled: settings.enabled,
        }
    }

    /// Supervisor that records nothing and starts nothing
    pub fn disabled(port: u16) -> Self {
        Self {
            binary: TunnelSettings::default().binary,
            port,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Arguments passed to the tunnel binary for `domain`
    pub fn command_args(&self, domain: &str) -> Vec<String> {
        vec![
            "http".to_string(),
            format!("--domain={domain}"),
            self.port.to_string(),
        ]
    }

    /// Start a tunnel for `domain` in a detached task
    ///
    /// Must be called from within a tokio runtime. The returned handle
    /// may be dropped; the task keeps running and reaps the child
    /// when it exits.
    pub fn launch(&self, domain: &str) -> JoinHandle<TunnelOutcome> {
        let domain = domain.to_string();
        let binary = self.binary.clone();
        let args = self.command_args(&domain);
        let enabled = self.enabled;

        tokio::spawn(async move {
            if !enabled {
                tracing::info!(domain = %domain, "Tunnels disabled, not launching");
                return TunnelOutcome::Disabled;
            }

            let spawned = Command::new(&binary)
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            let mut child = match spawned {
                Ok(child) => child,
                Err(source) => {
                    let err = LibraryError::TunnelLaunch {
                        domain: domain.clone(),
                        source,
                    };
                    tracing::error!(binary = %binary, "{}", err);
                    return TunnelOutcome::SpawnFailed;
                }
            };

            tracing::info!(domain = %domain, pid = ?child.id(), "Tunnel running");

            match child.wait().await {
                Ok(status) => {
                    tracing::warn!(domain = %domain, status = %status, "Tunnel process exited");
                    TunnelOutcome::Exited(status.code())
                }
                Err(e) => {
                    tracing::error!(domain = %domain, error = %e, "Failed waiting on tunnel process");
                    TunnelOutcome::Exited(None)
                }
            }
        })
    }

    /// Launch one tunnel per domain, as done at startup
    pub fn launch_all(&self, domains: &[String]) -> Vec<JoinHandle<TunnelOutcome>> {
        domains.iter().map(|domain| self.launch(domain)).collect()
    }
}
