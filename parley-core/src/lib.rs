pub mod model;

pub use model::{
    ClientMessage, IcePolicy, IceServerConfig, NegotiationPayload, NetworkConfig, PayloadShape,
    PeerId, PeerInfo, ServerMessage,
};
