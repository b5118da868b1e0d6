//! Per-round session state

use chrono::{DateTime, Utc};

use super::PlayerInput;
use crate::channel::RealtimeChannel;
use crate::events::AnswerSnapshot;
use crate::surface::{Player, Surface};

/// Submission progress of one player's answer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing submitted, or edited since the last commit
    #[default]
    Idle,
    /// Commit key pressed, not yet locked
    PendingCommit,
    /// Final for this round
    Locked,
}

impl SubmissionState {
    /// Step forward one commit, saturating at `Locked`
    pub fn advance(self) -> Self {
        match self {
            SubmissionState::Idle => SubmissionState::PendingCommit,
            SubmissionState::PendingCommit | SubmissionState::Locked => SubmissionState::Locked,
        }
    }

    pub fn is_locked(&self) -> bool {
        *self == SubmissionState::Locked
    }
}

/// Last-known raw text per player, populated as they type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAnswers {
    pub player1: Option<String>,
    pub player2: Option<String>,
}

impl RawAnswers {
    pub fn get(&self, player: Player) -> Option<&str> {
        match player {
            Player::One => self.player1.as_deref(),
            Player::Two => self.player2.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.player1.is_none() && self.player2.is_none()
    }
}

/// Round session state, one per question round
#[derive(Debug, Clone, Default)]
pub struct RoundSession {
    player1: SubmissionState,
    player2: SubmissionState,
    raw: RawAnswers,
    opened_at: Option<DateTime<Utc>>,
}

impl RoundSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Both counters idle, no answers
    pub fn clear(&mut self) {
        self.player1 = SubmissionState::Idle;
        self.player2 = SubmissionState::Idle;
        self.raw = RawAnswers::default();
    }

    /// Mark the start of a visibility cycle
    pub fn open(&mut self) {
        self.clear();
        self.opened_at = Some(Utc::now());
    }

    pub fn state(&self, player: Player) -> SubmissionState {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    fn state_mut(&mut self, player: Player) -> &mut SubmissionState {
        match player {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        }
    }

    /// Apply one commit keystroke
    pub fn commit(&mut self, player: Player) -> SubmissionState {
        let state = self.state_mut(player);
        *state = state.advance();
        *state
    }

    /// Drop a pending commit after an editing keystroke
    pub fn revert(&mut self, player: Player) {
        let state = self.state_mut(player);
        if !state.is_locked() {
            *state = SubmissionState::Idle;
        }
    }

    pub fn lock(&mut self, player: Player) {
        *self.state_mut(player) = SubmissionState::Locked;
    }

    /// Record the control's current text. No-op once the player is locked.
    pub fn record(&mut self, player: Player, value: String) {
        if self.state(player).is_locked() {
            return;
        }
        match player {
            Player::One => self.raw.player1 = Some(value),
            Player::Two => self.raw.player2 = Some(value),
        }
    }

    pub fn raw(&self) -> &RawAnswers {
        &self.raw
    }

    pub fn both_locked(&self) -> bool {
        self.player1.is_locked() && self.player2.is_locked()
    }

    pub fn snapshot(&self) -> AnswerSnapshot {
        AnswerSnapshot {
            answer1: self.raw.player1.clone(),
            answer2: self.raw.player2.clone(),
        }
    }

    /// Milliseconds since the round opened
    pub fn elapsed_ms(&self) -> Option<i64> {
        self.opened_at
            .map(|at| (Utc::now() - at).num_milliseconds())
    }
}

impl<S: Surface, C: RealtimeChannel> PlayerInput<S, C> {
    /// Fresh session state, before anything renders
    pub fn initialize_state(&mut self) {
        self.session = RoundSession::new();
    }

    /// Reset counters and answers so nothing leaks across rounds
    pub fn clear_answers(&mut self) {
        self.session.clear();
    }
}
