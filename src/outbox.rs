//! Outbound queue from a session to its WebSocket writer

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::config::OUTBOX_CAPACITY;
use crate::protocol::ServerMessage;

/// Read end, owned by the WebSocket writer
pub type OutboxReceiver = mpsc::Receiver<ServerMessage>;

/// Where a session delivers messages for its client
#[async_trait]
pub trait Outbox: Send + Sync {
    /// Queue a message, waiting while the client is behind.
    /// Returns `false` once the client side has gone away.
    async fn send(&self, msg: ServerMessage) -> bool;
}

/// Bounded channel to a single consumer
pub struct ChannelOutbox {
    tx: mpsc::Sender<ServerMessage>,
}

impl ChannelOutbox {
    pub fn channel() -> (Self, OutboxReceiver) {
        Self::with_capacity(OUTBOX_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> (Self, OutboxReceiver) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Outbox for ChannelOutbox {
    async fn send(&self, msg: ServerMessage) -> bool {
        self.tx.send(msg).await.is_ok()
    }
}
