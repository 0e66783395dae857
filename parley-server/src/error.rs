use parley_core::PeerId;
use thiserror::Error;

/// Why a `join` request was refused. The display text is what the client
/// sees in `join-error`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    #[error("The name \"{0}\" is already taken")]
    NameTaken(String),

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Name must be at most {max} characters")]
    NameTooLong { max: usize },

    #[error("Already joined as \"{0}\"")]
    AlreadyJoined(String),

    #[error("Unknown session {0}")]
    UnknownSession(PeerId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HubError {
    #[error("hub is shut down")]
    Closed,

    #[error(transparent)]
    Join(#[from] JoinError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ICE server URL '{0}' must start with stun:, turn: or turns:")]
    InvalidIceUrl(String),

    #[error("TURN server '{0}' needs both a username and a credential")]
    MissingTurnCredentials(String),

    #[error("ICE policy 'relay' needs at least one TURN server")]
    RelayWithoutTurn,

    #[error("{0} must be greater than zero")]
    ZeroCapacity(&'static str),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
