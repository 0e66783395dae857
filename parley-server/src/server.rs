use crate::config::RelayConfig;
use crate::error::ConfigError;
use crate::hub::{Hub, HubHandle};
use crate::signaling::build_router;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// A validated configuration with its hub already running.
pub struct RelayServer {
    config: RelayConfig,
    hub: HubHandle,
}

impl RelayServer {
    /// Validates `config` and spawns the hub. Must be called inside a tokio runtime.
    pub fn new(config: RelayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let hub = Hub::spawn(&config.hub);
        Ok(Self { config, hub })
    }

    pub fn hub(&self) -> &HubHandle {
        &self.hub
    }

    async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind(self.config.bind)
            .await
            .with_context(|| format!("failed to bind {}", self.config.bind))
    }

    /// Serves in the background; returns the bound address (useful with port 0).
    pub async fn listen(&self) -> Result<(SocketAddr, JoinHandle<()>)> {
        let listener = self.bind().await?;
        let addr = listener.local_addr()?;
        let app = build_router(self.hub.clone(), self.config.static_dir.clone());

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Relay server stopped: {}", e);
            }
        });

        info!("Signalling relay listening on ws://{}/ws", addr);
        Ok((addr, handle))
    }

    /// Serves until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let listener = self.bind().await?;
        let addr = listener.local_addr()?;
        let app = build_router(self.hub.clone(), self.config.static_dir.clone());

        info!("Signalling relay listening on ws://{}/ws", addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("relay server failed")?;

        info!("Signalling relay shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
