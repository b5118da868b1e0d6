//! Turn sequencing: which control is live and when a commit lands

use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{PlayerInput, RoundStatus};
use crate::channel::{ChannelMessage, RealtimeChannel};
use crate::error::InputError;
use crate::keys::Key;
use crate::lifecycle::Phase;
use crate::surface::{selectors, Class, Player, Surface};

/// The control whose keystrokes currently count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivePlayer {
    #[default]
    None,
    Player1,
    Player2,
}

impl ActivePlayer {
    pub fn player(&self) -> Option<Player> {
        match self {
            ActivePlayer::None => None,
            ActivePlayer::Player1 => Some(Player::One),
            ActivePlayer::Player2 => Some(Player::Two),
        }
    }

    pub fn is(&self, player: Player) -> bool {
        self.player() == Some(player)
    }
}

/// Where a keystroke came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// A player's own input control
    Control(Player),
    /// Relayed over the real-time channel
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub source: KeySource,
    pub key: Key,
}

impl Keystroke {
    pub fn control(player: Player, key: Key) -> Self {
        Self {
            source: KeySource::Control(player),
            key,
        }
    }

    /// Channel-originated event; only reconciliation runs for it
    pub fn external() -> Self {
        Self {
            source: KeySource::External,
            key: Key::Other,
        }
    }
}

impl<S: Surface, C: RealtimeChannel> PlayerInput<S, C> {
    /// Open a round: flush stale channel traffic and hand the turn to player 1
    pub fn make_visible(&mut self) -> Result<(), InputError> {
        let handles = self.handles.clone().ok_or(InputError::NotInitialized)?;

        self.channel.clear();
        self.clear_answers();
        self.session.open();
        self.round_id = Uuid::now_v7();

        self.surface.add_class(handles.visible, Class::Active);
        self.surface.add_class(handles.panel_one, Class::Active);
        self.surface.focus(handles.input_one);
        self.active = ActivePlayer::Player1;
        self.listening = true;
        self.phase = Phase::Visible;

        info!(round = %self.round_id, "round open, player 1 to answer");
        Ok(())
    }

    /// Process one keystroke, then reconcile.
    ///
    /// A control that is not the active one has no live listener: its
    /// keystrokes are dropped without reconciling. External keystrokes only
    /// reconcile.
    pub fn handle_keystroke(&mut self, stroke: &Keystroke, data: Option<&Value>) -> RoundStatus {
        match stroke.source {
            KeySource::Control(player) if self.active.is(player) => {
                self.sequence(player, stroke.key);
            }
            KeySource::Control(player) => {
                debug!(?player, active = ?self.active, "keystroke on detached control");
                return self.status();
            }
            KeySource::External => {}
        }
        self.reconcile(data)
    }

    /// Merge an inbound channel message
    ///
    /// Returns `None` when the message was not for us or we stopped listening.
    pub fn handle_channel_message(&mut self, message: &ChannelMessage) -> Option<RoundStatus> {
        if !message.is_player_input() {
            debug!(event = %message.event, "ignoring channel event");
            return None;
        }
        if !self.listening {
            debug!("channel message after input closed");
            return None;
        }
        Some(self.handle_keystroke(&Keystroke::external(), Some(&message.data)))
    }

    fn sequence(&mut self, player: Player, key: Key) {
        if self.session.state(player).is_locked() {
            return;
        }
        let Some(input) = self.handles.as_ref().map(|h| h.input(player)) else {
            return;
        };

        let value = self.surface.value(input);
        self.session.record(player, value);

        if key.is_commit(self.config.commit_key) {
            let state = self.session.commit(player);
            debug!(?player, ?state, "commit");
            self.check_values(Some(player), false);
            if player == Player::One {
                self.activate_player2();
            }
        } else {
            self.session.revert(player);
        }
    }

    /// Lock player 1 and move the turn to player 2
    pub fn activate_player2(&mut self) {
        let Some(handles) = self.handles.clone() else {
            warn!("activate_player2 before initialize");
            return;
        };

        self.session.lock(Player::One);
        self.check_values(Some(Player::One), false);

        self.surface.add_class(handles.panel_two, Class::Active);
        self.surface.focus(handles.input_two);
        self.active = ActivePlayer::Player2;

        info!(round = %self.round_id, "player 1 locked, player 2 to answer");
    }

    /// Style panels from their current text.
    ///
    /// Targets the panel of `player`, or every panel when `timeout` is set.
    /// A blank or placeholder value hides the panel; anything else marks it
    /// submitted.
    pub fn check_values(&mut self, player: Option<Player>, timeout: bool) {
        let Some(handles) = self.handles.clone() else {
            return;
        };

        for (i, panel) in handles.panels.iter().enumerate() {
            let targeted = timeout || player.is_some_and(|p| p.index() == i + 1);
            if !targeted {
                continue;
            }

            let value = self
                .surface
                .query_within(*panel, selectors::INPUT)
                .map(|input| self.surface.value(input))
                .unwrap_or_default();

            if self.config.is_blank(&value) {
                self.surface.remove_class(*panel, Class::Active);
                self.surface.add_class(*panel, Class::Hidden);
            } else {
                self.surface.add_class(*panel, Class::Submitted);
            }
        }
    }

    /// Round-end finalization across every panel
    pub fn finalize_timeout(&mut self) {
        info!(round = %self.round_id, "round timed out");
        self.check_values(None, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::QueuedChannel;
    use crate::config::Config;
    use crate::lifecycle::{mount, Component};
    use crate::player_input::SubmissionState;
    use crate::surface::MemorySurface;

    fn open_round() -> PlayerInput<MemorySurface, QueuedChannel> {
        let mut input = PlayerInput::new(
            Config::default(),
            MemorySurface::player_input(),
            QueuedChannel::new(),
        );
        mount(&mut input).unwrap();
        input.visible().unwrap();
        input
    }

    #[test]
    fn test_visible_requires_initialize() {
        let mut input = PlayerInput::new(
            Config::default(),
            MemorySurface::player_input(),
            QueuedChannel::new(),
        );
        input.before_render();
        assert!(matches!(input.visible(), Err(InputError::NotInitialized)));
    }

    #[test]
    fn test_visible_activates_player_one_only() {
        let input = open_round();
        let h = input.handles().unwrap().clone();

        assert_eq!(input.active(), ActivePlayer::Player1);
        assert!(input.surface().has_class(h.visible, Class::Active));
        assert!(input.surface().has_class(h.panel_one, Class::Active));
        assert!(!input.surface().has_class(h.panel_two, Class::Active));
        assert_eq!(input.surface().focused(), Some(h.input_one));
        assert_eq!(input.phase(), Phase::Visible);
    }

    #[test]
    fn test_editing_key_cancels_pending_commit() {
        let mut input = open_round();
        input.activate_player2();

        input.press(Player::Two, Key::Char('x'));
        input.press(Player::Two, Key::Enter);
        assert_eq!(input.state(Player::Two), SubmissionState::PendingCommit);

        input.press(Player::Two, Key::Backspace);
        assert_eq!(input.state(Player::Two), SubmissionState::Idle);
    }

    #[test]
    fn test_player_two_ignored_during_player_one_turn() {
        let mut input = open_round();
        let h = input.handles().unwrap().clone();
        let mut rx = input.subscribe();

        assert_eq!(input.press(Player::Two, Key::Char('z')), RoundStatus::Open);
        input.press(Player::Two, Key::Enter);

        assert_eq!(input.state(Player::Two), SubmissionState::Idle);
        assert_eq!(input.session().raw().get(Player::Two), None);
        assert!(!input.surface().has_class(h.input_two, Class::Active));
        assert!(rx.drain().is_empty());
    }

    #[test]
    fn test_external_keystroke_reconciles_while_detached() {
        let mut input = open_round();
        input.tear_down();
        let mut rx = input.subscribe();

        input.handle_keystroke(&Keystroke::external(), None);
        assert_eq!(rx.drain().len(), 1);
    }

    #[test]
    fn test_check_values_targets_one_panel() {
        let mut input = open_round();
        let h = input.handles().unwrap().clone();
        input.surface_mut().set_value(h.input_one, "Paris");

        input.check_values(Some(Player::Two), false);
        assert!(input.surface().has_class(h.panel_two, Class::Hidden));
        assert!(!input.surface().has_class(h.panel_one, Class::Submitted));

        input.check_values(Some(Player::One), false);
        assert!(input.surface().has_class(h.panel_one, Class::Submitted));
    }

    #[test]
    fn test_placeholder_counts_as_blank() {
        let mut input = open_round();
        let h = input.handles().unwrap().clone();
        input
            .surface_mut()
            .set_value(h.input_one, "enter your answer");

        input.check_values(Some(Player::One), false);
        assert!(input.surface().has_class(h.panel_one, Class::Hidden));
        assert!(!input.surface().has_class(h.panel_one, Class::Active));
        assert!(!input.surface().has_class(h.panel_one, Class::Submitted));
    }

    #[test]
    fn test_channel_message_only_reconciles() {
        let mut input = open_round();
        let status = input
            .handle_channel_message(&ChannelMessage::player_input(serde_json::json!({})))
            .unwrap();

        assert_eq!(status, RoundStatus::Open);
        assert_eq!(input.active(), ActivePlayer::Player1);
        assert!(input.session().raw().is_empty());
    }

    #[test]
    fn test_other_channel_events_ignored() {
        let mut input = open_round();
        let msg = ChannelMessage {
            event: "score".to_string(),
            data: serde_json::Value::Null,
        };
        assert!(input.handle_channel_message(&msg).is_none());
    }

    #[test]
    fn test_tab_commit_key() {
        let config = Config {
            commit_key: crate::keys::CommitKey::Tab,
            ..Config::default()
        };
        let mut input = PlayerInput::new(
            config,
            MemorySurface::player_input(),
            QueuedChannel::new(),
        );
        mount(&mut input).unwrap();
        input.visible().unwrap();

        input.press(Player::One, Key::Char('a'));
        input.press(Player::One, Key::Enter);
        assert_eq!(input.active(), ActivePlayer::Player1);

        input.press(Player::One, Key::Tab);
        assert_eq!(input.active(), ActivePlayer::Player2);
    }
}
