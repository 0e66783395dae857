use crate::model::network::{IcePolicy, IceServerConfig};
use crate::model::payload::NegotiationPayload;
use crate::model::peer::{PeerId, PeerInfo};
use serde::{Deserialize, Serialize};

/// Frames a browser sends to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "op",
    content = "d",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    Join {
        name: String,
    },
    Signal {
        target_identity: PeerId,
        data: NegotiationPayload,
    },
    Mute {
        muted: bool,
    },
    SubscribePresence,
    UnsubscribePresence,
}

/// Frames the relay sends to a browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "op",
    content = "d",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    Welcome {
        identity: PeerId,
        ice_servers: Vec<IceServerConfig>,
        ice_policy: IcePolicy,
    },
    JoinError {
        message: String,
    },
    PeerList(Vec<PeerInfo>),
    PeerJoined(PeerInfo),
    PeerLeft {
        identity: PeerId,
    },
    Signal {
        from: PeerId,
        data: NegotiationPayload,
    },
    Mute {
        identity: PeerId,
        muted: bool,
    },
    Presence(Vec<String>),
}

impl ServerMessage {
    /// Protocol name of the frame, as it appears in the `op` field.
    pub fn op(&self) -> &'static str {
        match self {
            Self::Welcome { .. } => "welcome",
            Self::JoinError { .. } => "join-error",
            Self::PeerList(_) => "peer-list",
            Self::PeerJoined(_) => "peer-joined",
            Self::PeerLeft { .. } => "peer-left",
            Self::Signal { .. } => "signal",
            Self::Mute { .. } => "mute",
            Self::Presence(_) => "presence",
        }
    }
}
