use crate::error::JoinError;
use crate::registry::session::Session;
use crate::transport::ConnectionHandle;
use parley_core::{NetworkConfig, PeerId, PeerInfo};
use std::collections::{BTreeMap, HashMap};

pub const MAX_NAME_CHARS: usize = 64;

/// Authoritative membership state: identity → session → display name.
///
/// The registry is plain data. It is owned by the hub task, which is what
/// makes every operation here atomic with respect to concurrent clients.
/// The three maps below always change together:
/// a name in `names` and a sequence in `roster` both point to a live
/// session carrying that same name and sequence.
pub struct Registry {
    network: NetworkConfig,
    sessions: HashMap<PeerId, Session>,
    names: HashMap<String, PeerId>,
    roster: BTreeMap<u64, PeerId>,
    next_seq: u64,
}

impl Registry {
    pub fn new(network: NetworkConfig) -> Self {
        Self {
            network,
            sessions: HashMap::new(),
            names: HashMap::new(),
            roster: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Registers a new connection under `proposed`, re-rolling the identity
    /// if it is somehow already live.
    pub fn attach(
        &mut self,
        proposed: PeerId,
        handle: ConnectionHandle,
    ) -> (PeerId, NetworkConfig) {
        let mut identity = proposed;
        while self.sessions.contains_key(&identity) {
            identity = PeerId::new();
        }

        self.sessions.insert(identity, Session::new(handle));
        (identity, self.network.clone())
    }

    /// Claims `requested` for `identity` and returns the roster including
    /// the caller. Nothing changes on error.
    pub fn join(
        &mut self,
        identity: PeerId,
        requested: &str,
    ) -> Result<Vec<PeerInfo>, JoinError> {
        if requested.trim().is_empty() {
            return Err(JoinError::EmptyName);
        }
        if requested.chars().count() > MAX_NAME_CHARS {
            return Err(JoinError::NameTooLong {
                max: MAX_NAME_CHARS,
            });
        }

        let session = self
            .sessions
            .get_mut(&identity)
            .ok_or(JoinError::UnknownSession(identity))?;

        if let Some(current) = &session.display_name {
            return Err(JoinError::AlreadyJoined(current.clone()));
        }
        if self.names.contains_key(requested) {
            return Err(JoinError::NameTaken(requested.to_owned()));
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        session.display_name = Some(requested.to_owned());
        session.joined_seq = Some(seq);
        self.names.insert(requested.to_owned(), identity);
        self.roster.insert(seq, identity);

        Ok(self.roster())
    }

    /// Removes the session entirely. Returns it if it was still attached.
    pub fn leave(&mut self, identity: &PeerId) -> Option<Session> {
        let session = self.sessions.remove(identity)?;

        if let Some(name) = &session.display_name {
            self.names.remove(name);
        }
        if let Some(seq) = session.joined_seq {
            self.roster.remove(&seq);
        }

        Some(session)
    }

    /// Joined sessions in join order.
    pub fn roster(&self) -> Vec<PeerInfo> {
        self.members()
            .filter_map(|(identity, session)| {
                session
                    .display_name()
                    .map(|name| PeerInfo::new(identity, name))
            })
            .collect()
    }

    /// Names currently in use, in join order.
    pub fn names(&self) -> Vec<String> {
        self.members()
            .filter_map(|(_, session)| session.display_name.clone())
            .collect()
    }

    pub fn lookup(&self, identity: &PeerId) -> Option<&ConnectionHandle> {
        self.sessions.get(identity).map(Session::handle)
    }

    /// Like [`Registry::lookup`], but only for sessions that have joined.
    pub fn lookup_member(&self, identity: &PeerId) -> Option<&ConnectionHandle> {
        self.sessions
            .get(identity)
            .filter(|session| session.is_joined())
            .map(Session::handle)
    }

    pub fn session(&self, identity: &PeerId) -> Option<&Session> {
        self.sessions.get(identity)
    }

    pub fn members(&self) -> impl Iterator<Item = (PeerId, &Session)> {
        self.roster
            .values()
            .filter_map(|identity| self.sessions.get(identity).map(|s| (*identity, s)))
    }

    pub fn members_except(
        &self,
        excluded: PeerId,
    ) -> impl Iterator<Item = (PeerId, &ConnectionHandle)> {
        self.members()
            .filter(move |(identity, _)| *identity != excluded)
            .map(|(identity, session)| (identity, session.handle()))
    }

    /// Records the announced mute state. Only members can announce.
    pub fn set_muted(&mut self, identity: &PeerId, muted: bool) -> bool {
        match self.sessions.get_mut(identity) {
            Some(session) if session.is_joined() => {
                session.muted = muted;
                true
            }
            _ => false,
        }
    }

    pub fn set_presence(&mut self, identity: &PeerId, subscribed: bool) -> bool {
        match self.sessions.get_mut(identity) {
            Some(session) => {
                session.presence = subscribed;
                true
            }
            None => false,
        }
    }

    pub fn presence_subscribers(&self) -> impl Iterator<Item = (PeerId, &ConnectionHandle)> {
        self.sessions
            .iter()
            .filter(|(_, session)| session.presence)
            .map(|(identity, session)| (*identity, session.handle()))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.roster.len()
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        assert_eq!(self.names.len(), self.roster.len());
        for (name, identity) in &self.names {
            let session = self.sessions.get(identity).expect("indexed name without session");
            assert_eq!(session.display_name.as_deref(), Some(name.as_str()));
        }
        for (seq, identity) in &self.roster {
            let session = self.sessions.get(identity).expect("roster entry without session");
            assert_eq!(session.joined_seq, Some(*seq));
        }
        let joined = self.sessions.values().filter(|s| s.is_joined()).count();
        assert_eq!(joined, self.roster.len());
    }
}
