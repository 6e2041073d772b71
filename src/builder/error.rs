//! Errors raised while declaring a machine type.

use crate::core::AnyState;
use thiserror::Error;

/// Configuration errors caught at definition time, before any instance exists.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DefinitionError {
    #[error("Reaction to state {state} is already handled by '{existing}', cannot also bind '{reaction}'")]
    DuplicateStateReaction {
        state: AnyState,
        reaction: String,
        existing: String,
    },

    #[error("Action '{0}' is declared more than once")]
    DuplicateAction(String),

    #[error("Action '{0}' has no target state. Call .to(state) before registering it")]
    MissingTarget(String),

    #[error("Reaction '{0}' has no triggering state. Call .on(state) before registering it")]
    MissingTrigger(String),

    #[error("Reaction '{0}' has no handler. Call .run(handler) before registering it")]
    MissingHandler(String),
}
