//! Reconciliation: derive highlight state and publish notifications

use serde_json::Value;
use tracing::{debug, info};

use super::{ActivePlayer, PlayerInput, SubmissionState};
use crate::channel::RealtimeChannel;
use crate::events::InputEvent;
use crate::surface::{Class, Player, Surface};

/// Whether the round still accepts answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Open,
    /// Both answers locked
    Complete,
}

impl<S: Surface, C: RealtimeChannel> PlayerInput<S, C> {
    /// Shared tail of every keystroke and channel event.
    ///
    /// Emits, in order: `Answer1Submitted` while player 1 is locked,
    /// `AnswerSubmitted` once both are, then `Keypress` unconditionally.
    pub fn reconcile(&mut self, data: Option<&Value>) -> RoundStatus {
        let snapshot = self.session.snapshot();
        debug!(?snapshot, relayed = data.is_some(), "reconcile");

        if snapshot.answer1.as_deref().is_some_and(|a| !a.is_empty()) {
            self.present_answer(Player::One, self.session.state(Player::One));
        }
        if snapshot.answer2.as_deref().is_some_and(|a| !a.is_empty()) {
            self.present_answer(Player::Two, self.session.state(Player::Two));
        }

        if self.session.state(Player::One).is_locked() {
            self.events.send(InputEvent::Answer1Submitted);
        }

        let status = if self.session.both_locked() {
            self.events.send(InputEvent::AnswerSubmitted);
            self.close_input();
            RoundStatus::Complete
        } else {
            RoundStatus::Open
        };

        self.events.send(InputEvent::Keypress(snapshot));
        status
    }

    /// Current round status without reconciling
    pub fn status(&self) -> RoundStatus {
        if self.session.both_locked() {
            RoundStatus::Complete
        } else {
            RoundStatus::Open
        }
    }

    /// Highlight an in-progress answer; locked answers keep their final styling
    fn present_answer(&mut self, player: Player, state: SubmissionState) {
        if state.is_locked() {
            return;
        }
        if let Some(input) = self.handles.as_ref().map(|h| h.input(player)) {
            self.surface.add_class(input, Class::Active);
        }
    }

    fn close_input(&mut self) {
        if self.listening || self.active != ActivePlayer::None {
            info!(
                round = %self.round_id,
                elapsed_ms = self.session.elapsed_ms(),
                "both answers submitted"
            );
        }
        self.active = ActivePlayer::None;
        self.listening = false;
    }
}
