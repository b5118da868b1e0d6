//! Two-player answer entry component
//!
//! Player 1 types first. Committing hands the turn to player 2, and once
//! both answers are locked the round's input closes. Every keystroke on the
//! live control, and every message relayed over the channel, ends in the
//! same reconciliation pass.
//!
//! - `session`: round state (submission progress, raw answers)
//! - `sequencer`: which control is live, commit detection, panel styling
//! - `reconcile`: derived highlight state and outbound notifications

mod reconcile;
mod sequencer;
mod session;

pub use reconcile::RoundStatus;
pub use sequencer::{ActivePlayer, KeySource, Keystroke};
pub use session::{RawAnswers, RoundSession, SubmissionState};

use tracing::{debug, info};
use uuid::Uuid;

use crate::channel::RealtimeChannel;
use crate::config::Config;
use crate::error::InputError;
use crate::events::{InputEventReceiver, InputEventSender};
use crate::keys::Key;
use crate::lifecycle::{Component, Phase};
use crate::surface::{Class, Handles, MemorySurface, Player, Surface};

/// The answer-entry component for one pair of players
pub struct PlayerInput<S, C> {
    config: Config,
    surface: S,
    channel: C,
    events: InputEventSender,
    handles: Option<Handles>,
    session: RoundSession,
    active: ActivePlayer,
    /// Accepting inbound `player-input` channel messages
    listening: bool,
    round_id: Uuid,
    phase: Phase,
}

impl<S: Surface, C: RealtimeChannel> PlayerInput<S, C> {
    pub fn new(config: Config, surface: S, channel: C) -> Self {
        let events = InputEventSender::new(config.event_capacity);
        Self {
            config,
            surface,
            channel,
            events,
            handles: None,
            session: RoundSession::new(),
            active: ActivePlayer::None,
            listening: false,
            round_id: Uuid::now_v7(),
            phase: Phase::Constructed,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn handles(&self) -> Option<&Handles> {
        self.handles.as_ref()
    }

    pub fn session(&self) -> &RoundSession {
        &self.session
    }

    pub fn state(&self, player: Player) -> SubmissionState {
        self.session.state(player)
    }

    pub fn active(&self) -> ActivePlayer {
        self.active
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn round_id(&self) -> Uuid {
        self.round_id
    }

    /// Handle for emitting alongside the component
    pub fn events(&self) -> InputEventSender {
        self.events.clone()
    }

    pub fn subscribe(&self) -> InputEventReceiver {
        self.events.subscribe()
    }
}

impl<S: Surface, C: RealtimeChannel> Component for PlayerInput<S, C> {
    fn before_render(&mut self) {
        self.initialize_state();
        self.phase = Phase::Rendered;
    }

    fn initialize(&mut self) -> Result<(), InputError> {
        self.clear_answers();
        self.handles = Some(Handles::resolve(&self.surface)?);
        self.listening = true;
        self.phase = Phase::Initialized;
        debug!("player input initialized");
        Ok(())
    }

    fn visible(&mut self) -> Result<(), InputError> {
        self.make_visible()
    }

    fn tear_down(&mut self) {
        self.listening = false;
        self.active = ActivePlayer::None;
        if let Some(handles) = self.handles.clone() {
            for panel in &handles.panels {
                self.surface.remove_class(*panel, Class::Submitted);
            }
            for input in &handles.inputs {
                self.surface.remove_class(*input, Class::Active);
            }
        }
        self.phase = Phase::TornDown;
        info!(round = %self.round_id, "player input torn down");
    }

    fn phase(&self) -> Phase {
        self.phase
    }
}

impl<C: RealtimeChannel> PlayerInput<MemorySurface, C> {
    /// Edit `player`'s control with `key`, then deliver the keystroke.
    ///
    /// Mirrors a browser input: the text changes first, keyup fires after.
    pub fn press(&mut self, player: Player, key: Key) -> RoundStatus {
        if let Some(input) = self.handles.as_ref().map(|h| h.input(player)) {
            if let Some(field) = self.surface.field_mut(input) {
                field.edit(key);
            }
        }
        self.handle_keystroke(&Keystroke::control(player, key), None)
    }

    /// Route `key` to whichever control holds focus
    pub fn press_focused(&mut self, key: Key) -> Option<RoundStatus> {
        let player = self.focused_player()?;
        Some(self.press(player, key))
    }

    /// Type `text` then commit it
    pub fn type_and_commit(&mut self, player: Player, text: &str) -> RoundStatus {
        for c in text.chars() {
            self.press(player, Key::Char(c));
        }
        let commit = self.config.commit_key.key();
        self.press(player, commit)
    }

    pub fn focused_player(&self) -> Option<Player> {
        let handles = self.handles.as_ref()?;
        let focused = self.surface.focused()?;
        [Player::One, Player::Two]
            .into_iter()
            .find(|p| handles.input(*p) == focused)
    }
}
