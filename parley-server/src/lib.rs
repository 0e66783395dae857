pub mod config;
mod error;
mod hub;
mod registry;
mod server;
mod signaling;
mod transport;

pub use config::{HubConfig, RelayConfig};
pub use error::{ConfigError, HubError, JoinError};
pub use hub::*;
pub use registry::*;
pub use server::RelayServer;
pub use signaling::*;
pub use transport::*;
