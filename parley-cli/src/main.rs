use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use parley::model::{IcePolicy, IceServerConfig, NetworkConfig};
use parley::server::config::{
    DEFAULT_BIND, DEFAULT_COMMAND_CAPACITY, DEFAULT_OUTBOUND_CAPACITY, DEFAULT_STUN_URL,
    load_network_config,
};
use parley::server::{HubConfig, RelayConfig, RelayServer};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "parley-relay", version)]
#[command(about = "Signalling relay and presence registry for peer-to-peer voice rooms")]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "PARLEY_BIND", default_value = DEFAULT_BIND)]
    bind: SocketAddr,

    /// STUN server URL, repeatable or comma separated.
    #[arg(long = "stun", env = "PARLEY_STUN_URLS", value_delimiter = ',')]
    stun: Vec<String>,

    /// TURN server URL, repeatable or comma separated.
    #[arg(long = "turn", env = "PARLEY_TURN_URLS", value_delimiter = ',')]
    turn: Vec<String>,

    #[arg(long, env = "PARLEY_TURN_USERNAME")]
    turn_username: Option<String>,

    #[arg(long, env = "PARLEY_TURN_CREDENTIAL", hide_env_values = true)]
    turn_credential: Option<String>,

    /// JSON file with `iceServers` and `icePolicy`; flags are added on top.
    #[arg(long, env = "PARLEY_ICE_CONFIG")]
    ice_config: Option<PathBuf>,

    /// `all` or `relay`.
    #[arg(long, env = "PARLEY_ICE_POLICY")]
    ice_policy: Option<IcePolicy>,

    #[arg(long, env = "PARLEY_OUTBOUND_CAPACITY", default_value_t = DEFAULT_OUTBOUND_CAPACITY)]
    outbound_capacity: usize,

    /// Directory served for non-relay paths (the browser client).
    #[arg(long, env = "PARLEY_STATIC_DIR")]
    static_dir: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<RelayConfig> {
        let mut network = match &self.ice_config {
            Some(path) => load_network_config(path)?,
            None => NetworkConfig::default(),
        };

        network
            .ice_servers
            .extend(self.stun.into_iter().map(IceServerConfig::stun));

        if !self.turn.is_empty() {
            network.ice_servers.push(IceServerConfig {
                urls: self.turn,
                username: self.turn_username,
                credential: self.turn_credential,
            });
        }

        if network.ice_servers.is_empty() {
            network.ice_servers.push(IceServerConfig::stun(DEFAULT_STUN_URL));
        }

        if let Some(policy) = self.ice_policy {
            network.ice_policy = policy;
        }

        Ok(RelayConfig {
            bind: self.bind,
            hub: HubConfig {
                network,
                outbound_capacity: self.outbound_capacity,
                command_capacity: DEFAULT_COMMAND_CAPACITY,
            },
            static_dir: self.static_dir,
        })
    }
}

fn print_banner(config: &RelayConfig) {
    println!("{}", "📡 Parley signalling relay".green().bold());
    println!("   {} ws://{}/ws", "listen:".cyan(), config.bind);
    for server in &config.hub.network.ice_servers {
        println!("   {} {}", "ice:".cyan(), server.urls.join(", "));
    }
    println!("   {} {}", "policy:".cyan(), config.hub.network.ice_policy);
    if let Some(dir) = &config.static_dir {
        println!("   {} {}", "static:".cyan(), dir.display());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = cli.into_config()?;
    print_banner(&config);

    let server = RelayServer::new(config).context("invalid relay configuration")?;
    server.run().await
}
