use crate::hub::dispatch;
use crate::registry::Registry;
use parley_core::{PeerId, ServerMessage};
use tracing::debug;

/// Stores the announced state and forwards it to every other member.
/// The sender gets no echo.
pub(crate) fn announce(registry: &mut Registry, identity: PeerId, muted: bool) {
    if !registry.set_muted(&identity, muted) {
        debug!(%identity, "Ignoring mute from session that has not joined");
        return;
    }

    for (peer, handle) in registry.members_except(identity) {
        dispatch(peer, handle, ServerMessage::Mute { identity, muted });
    }
}

/// Tells a new member which of the existing members are currently muted.
pub(crate) fn replay_to(registry: &Registry, joiner: PeerId) {
    let Some(handle) = registry.lookup_member(&joiner) else {
        return;
    };

    for (identity, session) in registry.members() {
        if identity != joiner && session.is_muted() {
            dispatch(
                joiner,
                handle,
                ServerMessage::Mute {
                    identity,
                    muted: true,
                },
            );
        }
    }
}
