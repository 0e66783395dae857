use crate::hub::dispatch;
use crate::registry::Registry;
use parley_core::{PeerId, PeerInfo, ServerMessage};

/// Full roster to the joiner, then one `peer-joined` to every other member.
pub(crate) fn announce_join(registry: &Registry, joiner: PeerId, roster: Vec<PeerInfo>) {
    let Some(joined) = roster.iter().find(|p| p.identity == joiner).cloned() else {
        return;
    };

    if let Some(handle) = registry.lookup(&joiner) {
        dispatch(joiner, handle, ServerMessage::PeerList(roster));
    }

    for (peer, handle) in registry.members_except(joiner) {
        dispatch(peer, handle, ServerMessage::PeerJoined(joined.clone()));
    }
}

/// `peer-left` to every remaining member. Call after the registry dropped `departed`.
pub(crate) fn announce_leave(registry: &Registry, departed: PeerId) {
    for (peer, handle) in registry.members_except(departed) {
        dispatch(
            peer,
            handle,
            ServerMessage::PeerLeft { identity: departed },
        );
    }
}

/// Pushes the in-use names to every presence subscriber.
pub(crate) fn publish_names(registry: &Registry) {
    let names = registry.names();
    for (peer, handle) in registry.presence_subscribers() {
        dispatch(peer, handle, ServerMessage::Presence(names.clone()));
    }
}

pub(crate) fn send_snapshot(registry: &Registry, subscriber: PeerId) {
    if let Some(handle) = registry.lookup(&subscriber) {
        dispatch(subscriber, handle, ServerMessage::Presence(registry.names()));
    }
}
