//! Errors at the library's fallible seams

use thiserror::Error;

/// Errors raised while wiring the component to its surface or channel.
///
/// The answer state machine itself never fails; these only come from
/// resolving element handles and calling lifecycle hooks out of order.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("no element matches selector `{0}`")]
    MissingElement(&'static str),

    #[error("expected {expected} player panels, found {found}")]
    PanelCount { expected: usize, found: usize },

    #[error("component used before initialize()")]
    NotInitialized,
}
