//! Real-time channel seam
//!
//! The transport itself lives elsewhere. The component only needs to flush
//! the backlog when a round opens and to receive inbound `player-input`
//! messages, which it merges into the same path as local keystrokes.

use tokio::sync::mpsc;
use tracing::debug;

/// Inbound event name the component listens for
pub const PLAYER_INPUT: &str = "player-input";

/// Inbound message from the shared channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMessage {
    pub event: String,
    pub data: serde_json::Value,
}

impl ChannelMessage {
    pub fn player_input(data: serde_json::Value) -> Self {
        Self {
            event: PLAYER_INPUT.to_string(),
            data,
        }
    }

    pub fn is_player_input(&self) -> bool {
        self.event == PLAYER_INPUT
    }
}

/// What the component requires from the channel
pub trait RealtimeChannel {
    /// Discard any undelivered backlog
    fn clear(&mut self);
}

/// Channel backed by an unbounded queue.
///
/// Producers get a `ChannelSender`; the host pulls messages with
/// `try_next()` and hands them to the component.
pub struct QueuedChannel {
    tx: mpsc::UnboundedSender<ChannelMessage>,
    rx: mpsc::UnboundedReceiver<ChannelMessage>,
}

impl QueuedChannel {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> ChannelSender {
        ChannelSender {
            tx: self.tx.clone(),
        }
    }

    /// Next queued message, without waiting
    pub fn try_next(&mut self) -> Option<ChannelMessage> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next message
    pub async fn next(&mut self) -> Option<ChannelMessage> {
        self.rx.recv().await
    }
}

impl Default for QueuedChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl RealtimeChannel for QueuedChannel {
    fn clear(&mut self) {
        let mut dropped = 0usize;
        while self.rx.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            debug!(dropped, "cleared channel backlog");
        }
    }
}

/// Producer handle for a `QueuedChannel`
#[derive(Clone)]
pub struct ChannelSender {
    tx: mpsc::UnboundedSender<ChannelMessage>,
}

impl ChannelSender {
    /// Queue a message. Silently drops it if the channel is gone.
    pub fn send(&self, message: ChannelMessage) {
        let _ = self.tx.send(message);
    }
}
