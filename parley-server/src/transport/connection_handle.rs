use parley_core::ServerMessage;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Notify, mpsc};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// The outbound queue was full; the connection has been told to close.
    #[error("outbound queue is full")]
    Overflow,

    /// The connection's writer is already gone.
    #[error("connection is closed")]
    Closed,
}

/// Sending half of a connection's bounded outbound queue.
///
/// Delivery never waits: a full queue evicts the connection instead of
/// stalling whoever is broadcasting.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    tx: mpsc::Sender<ServerMessage>,
    evict: Arc<Notify>,
}

/// Receiving half, drained by the connection's writer task.
#[derive(Debug)]
pub struct Outbox {
    rx: mpsc::Receiver<ServerMessage>,
    evict: Arc<Notify>,
}

impl ConnectionHandle {
    pub fn channel(capacity: usize) -> (ConnectionHandle, Outbox) {
        let (tx, rx) = mpsc::channel(capacity);
        let evict = Arc::new(Notify::new());

        (
            ConnectionHandle {
                tx,
                evict: evict.clone(),
            },
            Outbox { rx, evict },
        )
    }

    pub fn deliver(&self, msg: ServerMessage) -> Result<(), DeliveryError> {
        match self.tx.try_send(msg) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.evict.notify_one();
                Err(DeliveryError::Overflow)
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(DeliveryError::Closed),
        }
    }
}

impl Outbox {
    /// Next queued frame, or `None` once the connection is evicted or every
    /// handle has been dropped.
    pub async fn next(&mut self) -> Option<ServerMessage> {
        tokio::select! {
            biased;
            _ = self.evict.notified() => None,
            msg = self.rx.recv() => msg,
        }
    }

    /// Resolves once the connection has been evicted for overflowing.
    pub async fn evicted(&self) {
        self.evict.notified().await
    }

    /// Non-blocking variant of [`Outbox::next`], ignoring eviction.
    pub fn try_next(&mut self) -> Option<ServerMessage> {
        self.rx.try_recv().ok()
    }
}
