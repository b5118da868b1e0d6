//! Host-facing component lifecycle
//!
//! The host drives every component through the same fixed order:
//!
//! ```text
//! before_render -> (markup mounted) -> initialize -> visible* -> tear_down
//! ```
//!
//! `visible` may run once per question round.

use crate::error::InputError;

/// Where a component is in its lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Constructed,
    Rendered,
    Initialized,
    Visible,
    TornDown,
}

/// Lifecycle contract implemented by mounted components
pub trait Component {
    /// Set up in-memory state before any markup exists
    fn before_render(&mut self);

    /// Resolve element handles once markup is mounted
    fn initialize(&mut self) -> Result<(), InputError>;

    /// Start a round once the question has animated in
    fn visible(&mut self) -> Result<(), InputError>;

    /// Detach from input and clear round styling
    fn tear_down(&mut self);

    fn phase(&self) -> Phase;
}

/// Run the construction half of the lifecycle in order
pub fn mount<C: Component + ?Sized>(component: &mut C) -> Result<(), InputError> {
    component.before_render();
    component.initialize()
}
