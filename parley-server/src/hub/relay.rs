use crate::hub::dispatch;
use crate::registry::Registry;
use parley_core::{NegotiationPayload, PeerId, ServerMessage};
use tracing::debug;

/// Routes negotiation data from one member to another.
///
/// Unknown or departed targets are normal during disconnect races, so they
/// are dropped quietly. The payload shape is only used for logging.
pub(crate) fn forward(registry: &Registry, from: PeerId, target: PeerId, data: NegotiationPayload) {
    let shape = data.shape();

    if registry.lookup_member(&from).is_none() {
        debug!(%from, %target, %shape, "Dropping signal from session that has not joined");
        return;
    }

    let Some(handle) = registry.lookup_member(&target) else {
        debug!(%from, %target, %shape, "Dropping signal for unknown target");
        return;
    };

    debug!(%from, %target, %shape, "Relaying signal");
    dispatch(target, handle, ServerMessage::Signal { from, data });
}
