//! duel-input - turn-based answer entry for two-player quiz rounds
//!
//! This library provides the answer-submission state machine, its surface
//! and channel seams, and the event bus observers subscribe to.
//! The terminal host is in `main.rs`.

pub mod channel;
pub mod config;
pub mod error;
pub mod events;
pub mod field;
pub mod keys;
pub mod lifecycle;
pub mod paths;
pub mod player_input;
pub mod render;
pub mod surface;
