use crate::error::HubError;
use crate::hub::HubHandle;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use parley_core::{ClientMessage, PeerId};
use tracing::{error, info, warn};

pub async fn ws_handler(ws: WebSocketUpgrade, State(hub): State<HubHandle>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

async fn handle_socket(socket: WebSocket, hub: HubHandle) {
    let (identity, _, mut outbox) = match hub.connect().await {
        Ok(attached) => attached,
        Err(e) => {
            error!("Failed to attach WebSocket connection: {}", e);
            return;
        }
    };
    info!(%identity, "New WebSocket connection");

    let (mut sender, mut receiver) = socket.split();

    // Ends on eviction even while a write is stuck on a client that stopped
    // reading; dropping both halves then closes the socket.
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = outbox.next().await {
            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize server message: {}", e);
                    continue;
                }
            };

            tokio::select! {
                biased;
                _ = outbox.evicted() => {
                    warn!(%identity, "Evicting slow connection");
                    break;
                }
                sent = sender.send(Message::Text(json.into())) => {
                    if sent.is_err() {
                        break;
                    }
                }
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let hub = hub.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(client_msg) => {
                            if let Err(e) = route(&hub, identity, client_msg).await {
                                error!(%identity, "Hub unavailable: {}", e);
                                break;
                            }
                        }
                        Err(e) => warn!(%identity, "Invalid client message: {}", e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    if let Err(e) = hub.leave(identity).await {
        warn!(%identity, "Could not report disconnect: {}", e);
    }
    info!(%identity, "WebSocket disconnected");
}

async fn route(hub: &HubHandle, identity: PeerId, msg: ClientMessage) -> Result<(), HubError> {
    match msg {
        ClientMessage::Join { name } => match hub.join(identity, name).await {
            Ok(_) | Err(HubError::Join(_)) => Ok(()),
            Err(e) => Err(e),
        },
        ClientMessage::Signal {
            target_identity,
            data,
        } => hub.signal(identity, target_identity, data).await,
        ClientMessage::Mute { muted } => hub.mute(identity, muted).await,
        ClientMessage::SubscribePresence => hub.subscribe_presence(identity).await,
        ClientMessage::UnsubscribePresence => hub.unsubscribe_presence(identity).await,
    }
}
