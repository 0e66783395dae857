mod hub;
mod hub_command;
mod hub_handle;
mod mute;
mod presence;
mod relay;

pub use hub::*;
pub use hub_command::*;
pub use hub_handle::*;

use crate::transport::{ConnectionHandle, DeliveryError};
use parley_core::{PeerId, ServerMessage};
use tracing::{debug, warn};

/// Queues `msg` for `peer`. Failures only concern that one connection and
/// are never propagated to the caller.
pub(crate) fn dispatch(peer: PeerId, handle: &ConnectionHandle, msg: ServerMessage) {
    let op = msg.op();
    match handle.deliver(msg) {
        Ok(()) => {}
        Err(DeliveryError::Overflow) => {
            warn!(%peer, op, "Outbound queue full, evicting connection");
        }
        Err(DeliveryError::Closed) => {
            debug!(%peer, op, "Dropping frame for closing connection");
        }
    }
}
