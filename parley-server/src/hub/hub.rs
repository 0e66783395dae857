use crate::config::HubConfig;
use crate::hub::hub_command::{HubCommand, HubStats};
use crate::hub::hub_handle::HubHandle;
use crate::hub::{dispatch, mute, presence, relay};
use crate::registry::Registry;
use parley_core::{NetworkConfig, ServerMessage};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The task that owns the [`Registry`].
///
/// Every command is handled to completion before the next one is read, so
/// membership changes are linearizable and frames are queued in the order
/// the transitions happened.
pub struct Hub {
    registry: Registry,
    command_rx: mpsc::Receiver<HubCommand>,
}

impl Hub {
    pub fn new(network: NetworkConfig, command_rx: mpsc::Receiver<HubCommand>) -> Self {
        Self {
            registry: Registry::new(network),
            command_rx,
        }
    }

    /// Starts a hub on the current runtime and returns a handle to it.
    pub fn spawn(config: &HubConfig) -> HubHandle {
        let (tx, rx) = mpsc::channel(config.command_capacity);
        let hub = Hub::new(config.network.clone(), rx);
        tokio::spawn(hub.run());

        HubHandle::new(tx, config.outbound_capacity)
    }

    pub async fn run(mut self) {
        info!("Hub event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        info!("Command channel closed. Hub event loop finished");
    }

    fn handle_command(&mut self, cmd: HubCommand) {
        match cmd {
            HubCommand::Attach {
                proposed,
                handle,
                reply,
            } => {
                let (identity, network) = self.registry.attach(proposed, handle.clone());
                debug!(%identity, sessions = self.registry.len(), "Session attached");

                dispatch(
                    identity,
                    &handle,
                    ServerMessage::Welcome {
                        identity,
                        ice_servers: network.ice_servers.clone(),
                        ice_policy: network.ice_policy,
                    },
                );
                let _ = reply.send((identity, network));
            }

            HubCommand::Join {
                identity,
                name,
                reply,
            } => {
                let result = self.registry.join(identity, &name);
                match &result {
                    Ok(roster) => {
                        info!(%identity, name = %name, members = roster.len(), "Peer joined");
                        presence::announce_join(&self.registry, identity, roster.clone());
                        mute::replay_to(&self.registry, identity);
                        presence::publish_names(&self.registry);
                    }
                    Err(e) => {
                        info!(%identity, "Join rejected: {}", e);
                        if let Some(handle) = self.registry.lookup(&identity) {
                            dispatch(
                                identity,
                                handle,
                                ServerMessage::JoinError {
                                    message: e.to_string(),
                                },
                            );
                        }
                    }
                }
                let _ = reply.send(result);
            }

            HubCommand::Leave { identity } => {
                let Some(session) = self.registry.leave(&identity) else {
                    return;
                };
                debug!(%identity, sessions = self.registry.len(), "Session detached");

                if let Some(name) = session.display_name() {
                    info!(%identity, name, "Peer left");
                    presence::announce_leave(&self.registry, identity);
                    presence::publish_names(&self.registry);
                }
            }

            HubCommand::Signal { from, target, data } => {
                relay::forward(&self.registry, from, target, data);
            }

            HubCommand::Mute { identity, muted } => {
                mute::announce(&mut self.registry, identity, muted);
            }

            HubCommand::SetPresence {
                identity,
                subscribed,
            } => {
                if !self.registry.set_presence(&identity, subscribed) {
                    return;
                }
                if subscribed {
                    presence::send_snapshot(&self.registry, identity);
                }
            }

            HubCommand::Roster { reply } => {
                let _ = reply.send(self.registry.roster());
            }

            HubCommand::Stats { reply } => {
                let _ = reply.send(HubStats {
                    sessions: self.registry.len(),
                    members: self.registry.member_count(),
                    presence_subscribers: self.registry.presence_subscribers().count(),
                });
            }
        }
    }
}
