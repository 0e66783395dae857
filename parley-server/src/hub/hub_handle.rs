use crate::error::HubError;
use crate::hub::hub_command::{HubCommand, HubStats};
use crate::transport::{ConnectionHandle, Outbox};
use parley_core::{NegotiationPayload, NetworkConfig, PeerId, PeerInfo};
use tokio::sync::{mpsc, oneshot};

/// Cloneable front door to a running [`Hub`](crate::Hub).
///
/// Commands sent through one handle are processed in the order they were
/// sent, which is what keeps one client's frames ordered end to end.
#[derive(Clone)]
pub struct HubHandle {
    command_tx: mpsc::Sender<HubCommand>,
    outbound_capacity: usize,
}

impl HubHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<HubCommand>, outbound_capacity: usize) -> Self {
        Self {
            command_tx,
            outbound_capacity,
        }
    }

    async fn send(&self, cmd: HubCommand) -> Result<(), HubError> {
        self.command_tx.send(cmd).await.map_err(|_| HubError::Closed)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> HubCommand,
    ) -> Result<T, HubError> {
        let (reply, rx) = oneshot::channel();
        self.send(build(reply)).await?;
        rx.await.map_err(|_| HubError::Closed)
    }

    /// Creates an outbound queue sized for this hub and attaches it.
    /// The `welcome` frame is already queued when this returns.
    pub async fn connect(&self) -> Result<(PeerId, NetworkConfig, Outbox), HubError> {
        let (handle, outbox) = ConnectionHandle::channel(self.outbound_capacity);
        let (identity, network) = self.attach(handle).await?;
        Ok((identity, network, outbox))
    }

    pub async fn attach(
        &self,
        handle: ConnectionHandle,
    ) -> Result<(PeerId, NetworkConfig), HubError> {
        let proposed = PeerId::new();
        self.request(|reply| HubCommand::Attach {
            proposed,
            handle,
            reply,
        })
        .await
    }

    pub async fn join(
        &self,
        identity: PeerId,
        name: impl Into<String>,
    ) -> Result<Vec<PeerInfo>, HubError> {
        let name = name.into();
        let result = self
            .request(|reply| HubCommand::Join {
                identity,
                name,
                reply,
            })
            .await?;
        Ok(result?)
    }

    pub async fn leave(&self, identity: PeerId) -> Result<(), HubError> {
        self.send(HubCommand::Leave { identity }).await
    }

    pub async fn signal(
        &self,
        from: PeerId,
        target: PeerId,
        data: impl Into<NegotiationPayload>,
    ) -> Result<(), HubError> {
        self.send(HubCommand::Signal {
            from,
            target,
            data: data.into(),
        })
        .await
    }

    pub async fn mute(&self, identity: PeerId, muted: bool) -> Result<(), HubError> {
        self.send(HubCommand::Mute { identity, muted }).await
    }

    pub async fn subscribe_presence(&self, identity: PeerId) -> Result<(), HubError> {
        self.send(HubCommand::SetPresence {
            identity,
            subscribed: true,
        })
        .await
    }

    pub async fn unsubscribe_presence(&self, identity: PeerId) -> Result<(), HubError> {
        self.send(HubCommand::SetPresence {
            identity,
            subscribed: false,
        })
        .await
    }

    pub async fn roster(&self) -> Result<Vec<PeerInfo>, HubError> {
        self.request(|reply| HubCommand::Roster { reply }).await
    }

    pub async fn stats(&self) -> Result<HubStats, HubError> {
        self.request(|reply| HubCommand::Stats { reply }).await
    }
}
