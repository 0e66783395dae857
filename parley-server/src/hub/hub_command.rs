use crate::error::JoinError;
use crate::transport::ConnectionHandle;
use parley_core::{NegotiationPayload, NetworkConfig, PeerId, PeerInfo};
use serde::Serialize;
use tokio::sync::oneshot;

/// Requests from connection tasks to the hub.
#[derive(Debug)]
pub enum HubCommand {
    /// A new connection was accepted; `proposed` is a freshly generated identity.
    Attach {
        proposed: PeerId,
        handle: ConnectionHandle,
        reply: oneshot::Sender<(PeerId, NetworkConfig)>,
    },

    /// The client asked to claim a display name.
    Join {
        identity: PeerId,
        name: String,
        reply: oneshot::Sender<Result<Vec<PeerInfo>, JoinError>>,
    },

    /// The connection is gone (close frame, network error or eviction).
    Leave { identity: PeerId },

    /// Negotiation data addressed to another peer.
    Signal {
        from: PeerId,
        target: PeerId,
        data: NegotiationPayload,
    },

    Mute { identity: PeerId, muted: bool },

    SetPresence { identity: PeerId, subscribed: bool },

    Roster {
        reply: oneshot::Sender<Vec<PeerInfo>>,
    },

    Stats {
        reply: oneshot::Sender<HubStats>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubStats {
    pub sessions: usize,
    pub members: usize,
    pub presence_subscribers: usize,
}
