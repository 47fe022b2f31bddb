//! Error types for presence transitions.

use thiserror::Error;

use super::hooks::HookKind;

/// Result type for transition operations.
pub type Result<T> = std::result::Result<T, TransitionError>;

/// Errors surfaced by the controller and the headless host.
///
/// The state machine itself has no failing transitions; errors come from
/// caller hooks or from driving a controller that is gone.
#[derive(Error, Debug)]
pub enum TransitionError {
    /// A lifecycle hook returned an error. The controller does not retry it.
    #[error("{kind} hook failed: {source}")]
    Hook {
        kind: HookKind,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The controller was torn down and accepts no further input.
    #[error("transition controller has been torn down")]
    TornDown,

    /// The host kept committing without the controller settling.
    #[error("render loop did not settle after {turns} commit turns")]
    Unsettled { turns: usize },
}
