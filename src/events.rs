//! Answer notifications for round observers.
//!
//! Uses `tokio::sync::broadcast` so a sound player, a host display and a
//! spectator relay can each subscribe independently. The component owns the
//! sender; nothing is published on a page-global bus.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Snapshot of both players' raw answers.
///
/// `None` means that player has not typed anything this round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSnapshot {
    pub answer1: Option<String>,
    pub answer2: Option<String>,
}

/// Outbound notification from the component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Player 1's answer is locked.
    ///
    /// Repeats on every reconciliation pass while player 1 stays locked.
    Answer1Submitted,

    /// Both answers are locked and the round's input is closed.
    AnswerSubmitted,

    /// Live typing relay, sent after every reconciliation pass.
    Keypress(AnswerSnapshot),
}

impl InputEvent {
    /// Wire name used by channel consumers.
    pub fn name(&self) -> &'static str {
        match self {
            InputEvent::Answer1Submitted => "ANSWER1_SUBMITTED",
            InputEvent::AnswerSubmitted => "ANSWER_SUBMITTED",
            InputEvent::Keypress(_) => "KEYPRESS",
        }
    }

    /// Returns true for the lock notifications.
    pub fn is_submission(&self) -> bool {
        matches!(
            self,
            InputEvent::Answer1Submitted | InputEvent::AnswerSubmitted
        )
    }
}

/// Broadcast sender for answer events.
///
/// Clone this to share between components that emit events.
/// Sending to zero receivers silently succeeds.
#[derive(Clone)]
pub struct InputEventSender {
    tx: broadcast::Sender<InputEvent>,
}

impl InputEventSender {
    /// Create a new event sender with the specified buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Send an event to all subscribers.
    ///
    /// Silently ignores errors (no receivers, or lagged receivers).
    pub fn send(&self, event: InputEvent) {
        let _ = self.tx.send(event);
    }

    /// Create a new subscriber to receive events.
    pub fn subscribe(&self) -> InputEventReceiver {
        InputEventReceiver {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for InputEventSender {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Receiver for answer events.
///
/// A receiver that falls behind misses events but never blocks the sender.
pub struct InputEventReceiver {
    rx: broadcast::Receiver<InputEvent>,
}

impl InputEventReceiver {
    /// Receive the next event, waiting asynchronously.
    ///
    /// Returns `None` once the sender is dropped.
    pub async fn recv(&mut self) -> Option<InputEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Try to receive an event without waiting.
    pub fn try_recv(&mut self) -> Option<InputEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drain everything currently queued.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(InputEvent::Answer1Submitted.name(), "ANSWER1_SUBMITTED");
        assert_eq!(InputEvent::AnswerSubmitted.name(), "ANSWER_SUBMITTED");
        assert_eq!(
            InputEvent::Keypress(AnswerSnapshot::default()).name(),
            "KEYPRESS"
        );
    }

    #[test]
    fn test_is_submission() {
        assert!(InputEvent::Answer1Submitted.is_submission());
        assert!(InputEvent::AnswerSubmitted.is_submission());
        assert!(!InputEvent::Keypress(AnswerSnapshot::default()).is_submission());
    }

    #[test]
    fn test_snapshot_wire_format() {
        let snapshot = AnswerSnapshot {
            answer1: Some("Paris".to_string()),
            answer2: None,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["answer1"], "Paris");
        assert!(json["answer2"].is_null());
    }

    #[test]
    fn test_sender_no_receivers() {
        let sender = InputEventSender::new(16);
        sender.send(InputEvent::AnswerSubmitted);
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let sender = InputEventSender::new(16);
        let mut rx1 = sender.subscribe();
        let mut rx2 = sender.subscribe();

        sender.send(InputEvent::Answer1Submitted);

        assert_eq!(rx1.recv().await, Some(InputEvent::Answer1Submitted));
        assert_eq!(rx2.recv().await, Some(InputEvent::Answer1Submitted));
    }

    #[tokio::test]
    async fn test_recv_after_sender_dropped() {
        let sender = InputEventSender::new(4);
        let mut receiver = sender.subscribe();
        drop(sender);
        assert_eq!(receiver.recv().await, None);
    }

    #[test]
    fn test_lagged_receiver_skips_ahead() {
        let sender = InputEventSender::new(2);
        let mut receiver = sender.subscribe();

        for _ in 0..5 {
            sender.send(InputEvent::Answer1Submitted);
        }
        sender.send(InputEvent::AnswerSubmitted);

        let events = receiver.drain();
        assert!(events.len() <= 2);
        assert_eq!(events.last(), Some(&InputEvent::AnswerSubmitted));
    }

    #[test]
    fn test_drain_empties_queue() {
        let sender = InputEventSender::default();
        let mut receiver = sender.subscribe();

        sender.send(InputEvent::Answer1Submitted);
        sender.send(InputEvent::AnswerSubmitted);

        assert_eq!(receiver.drain().len(), 2);
        assert!(receiver.try_recv().is_none());
    }
}
