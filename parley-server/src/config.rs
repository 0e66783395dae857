use crate::error::ConfigError;
use parley_core::{IcePolicy, IceServerConfig, NetworkConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_STUN_URL: &str = "stun:stun.l.google.com:19302";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_OUTBOUND_CAPACITY: usize = 256;
pub const DEFAULT_COMMAND_CAPACITY: usize = 1024;

/// Settings of the hub task.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Handed to every client inside `welcome`.
    pub network: NetworkConfig,
    /// Frames a connection may have queued before it is evicted.
    pub outbound_capacity: usize,
    pub command_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                ice_servers: vec![IceServerConfig::stun(DEFAULT_STUN_URL)],
                ice_policy: IcePolicy::All,
            },
            outbound_capacity: DEFAULT_OUTBOUND_CAPACITY,
            command_capacity: DEFAULT_COMMAND_CAPACITY,
        }
    }
}

/// Everything the relay process needs to start.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind: SocketAddr,
    pub hub: HubConfig,
    /// Served for any path that is not a relay route.
    pub static_dir: Option<PathBuf>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            hub: HubConfig::default(),
            static_dir: None,
        }
    }
}

impl RelayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_network(&self.hub.network)?;

        if self.hub.outbound_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("outbound capacity"));
        }
        if self.hub.command_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("command capacity"));
        }
        Ok(())
    }
}

pub fn validate_network(network: &NetworkConfig) -> Result<(), ConfigError> {
    for server in &network.ice_servers {
        for url in &server.urls {
            let known = ["stun:", "turn:", "turns:"]
                .iter()
                .any(|scheme| url.starts_with(scheme));
            if !known {
                return Err(ConfigError::InvalidIceUrl(url.clone()));
            }
        }

        if server.is_turn() && (server.username.is_none() || server.credential.is_none()) {
            return Err(ConfigError::MissingTurnCredentials(server.urls.join(", ")));
        }
    }

    if network.ice_policy == IcePolicy::Relay && !network.ice_servers.iter().any(|s| s.is_turn()) {
        return Err(ConfigError::RelayWithoutTurn);
    }

    Ok(())
}

/// Reads `{"iceServers": [...], "icePolicy": "all" | "relay"}` from disk.
pub fn load_network_config(path: &Path) -> Result<NetworkConfig, ConfigError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })
}
