use anyhow::{Context, Result};
use parley_core::{NegotiationPayload, PeerId, PeerInfo, ServerMessage};
use parley_server::{HubError, HubHandle, Outbox};
use std::time::Duration;

/// Timeout for a single expected frame (ms).
pub const RECV_TIMEOUT_MS: u64 = 2000;

/// A session attached straight to the hub, without a socket in between.
pub struct TestClient {
    /// The identity the hub assigned.
    pub identity: PeerId,
    /// The `welcome` frame received on attach.
    pub welcome: ServerMessage,
    hub: HubHandle,
    outbox: Outbox,
}

impl TestClient {
    /// Attach a new session and consume its `welcome`.
    pub async fn connect(hub: &HubHandle) -> Result<Self> {
        let (identity, _, mut outbox) = hub.connect().await.context("Failed to attach")?;

        let welcome = tokio::time::timeout(Duration::from_millis(RECV_TIMEOUT_MS), outbox.next())
            .await
            .context("Timeout waiting for welcome")?
            .context("Outbox closed before welcome")?;

        Ok(Self {
            identity,
            welcome,
            hub: hub.clone(),
            outbox,
        })
    }

    /// Attach and join as `name`, consuming the `peer-list`.
    pub async fn joined(hub: &HubHandle, name: &str) -> Result<Self> {
        let mut client = Self::connect(hub).await?;
        client.join(name).await.context("Join failed")?;

        match client.recv().await? {
            ServerMessage::PeerList(_) => Ok(client),
            other => anyhow::bail!("Expected peer-list, got {:?}", other),
        }
    }

    pub fn info(&self, name: &str) -> PeerInfo {
        PeerInfo::new(self.identity, name)
    }

    pub async fn join(&self, name: &str) -> Result<Vec<PeerInfo>, HubError> {
        self.hub.join(self.identity, name).await
    }

    pub async fn signal(&self, target: PeerId, data: serde_json::Value) -> Result<()> {
        self.hub
            .signal(self.identity, target, NegotiationPayload(data))
            .await?;
        Ok(())
    }

    pub async fn mute(&self, muted: bool) -> Result<()> {
        self.hub.mute(self.identity, muted).await?;
        Ok(())
    }

    pub async fn subscribe_presence(&self) -> Result<()> {
        self.hub.subscribe_presence(self.identity).await?;
        Ok(())
    }

    pub async fn unsubscribe_presence(&self) -> Result<()> {
        self.hub.unsubscribe_presence(self.identity).await?;
        Ok(())
    }

    /// Report the disconnect the way the WebSocket task does.
    pub async fn disconnect(self) -> Result<PeerId> {
        self.hub.leave(self.identity).await?;
        Ok(self.identity)
    }

    /// Wait for the next queued frame.
    pub async fn recv(&mut self) -> Result<ServerMessage> {
        self.next_raw()
            .await?
            .context("Outbox closed (connection evicted)")
    }

    /// Like [`TestClient::recv`], but surfaces eviction as `None`.
    pub async fn next_raw(&mut self) -> Result<Option<ServerMessage>> {
        tokio::time::timeout(Duration::from_millis(RECV_TIMEOUT_MS), self.outbox.next())
            .await
            .context("Timeout waiting for frame")
    }

    /// Assert nothing is queued once the hub has handled every earlier command.
    pub async fn expect_silence(&mut self) -> Result<()> {
        self.hub.roster().await?;

        match self.outbox.try_next() {
            None => Ok(()),
            Some(msg) => anyhow::bail!("Expected no frame for {}, got {:?}", self.identity, msg),
        }
    }
}
