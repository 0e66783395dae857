mod network;
mod payload;
mod peer;
mod signaling;

pub use network::{IcePolicy, IceServerConfig, NetworkConfig};
pub use payload::{NegotiationPayload, PayloadShape};
pub use peer::{PeerId, PeerInfo};
pub use signaling::{ClientMessage, ServerMessage};
