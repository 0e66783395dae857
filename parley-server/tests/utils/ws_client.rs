use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use parley_core::{ClientMessage, ServerMessage};
use std::net::SocketAddr;
use std::time::Duration;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use super::test_client::RECV_TIMEOUT_MS;

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// A real WebSocket client speaking the JSON protocol.
pub struct WsClient {
    stream: WsStream,
}

impl WsClient {
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let (stream, _) = connect_async(format!("ws://{addr}/ws"))
            .await
            .context("WebSocket handshake failed")?;
        Ok(Self { stream })
    }

    pub async fn send(&mut self, msg: &ClientMessage) -> Result<()> {
        let json = serde_json::to_string(msg)?;
        self.send_raw(&json).await
    }

    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.stream
            .send(Message::Text(text.into()))
            .await
            .context("Failed to send frame")
    }

    /// Next protocol frame, skipping pings and other control frames.
    pub async fn recv(&mut self) -> Result<ServerMessage> {
        loop {
            let msg = tokio::time::timeout(
                Duration::from_millis(RECV_TIMEOUT_MS),
                self.stream.next(),
            )
            .await
            .context("Timeout waiting for frame")?
            .context("WebSocket stream ended")??;

            if let Message::Text(text) = msg {
                return serde_json::from_str(&text).context("Server sent an invalid frame");
            }
        }
    }

    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
