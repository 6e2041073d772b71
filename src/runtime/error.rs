//! Errors surfaced while running machines.

use super::handle::MachineId;
use crate::core::AnyState;
use thiserror::Error;

/// An action targeted a state that the transition table does not reach
/// from the current one. The instance's state is left unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("[{machine}] cannot transition from {from} to {to}")]
pub struct TransitionError {
    pub machine: String,
    pub from: AnyState,
    pub to: AnyState,
}

/// Errors that abort an action call and its whole cascade.
///
/// A guard that blocks an action or reaction is not an error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuntimeError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("[{machine}] has no action named '{action}'")]
    UnknownAction { machine: String, action: String },

    #[error("No machine {0} in this runtime")]
    UnknownMachine(MachineId),

    #[error("Cascade exceeded {limit} steps")]
    CascadeLimitExceeded { limit: usize },
}

impl RuntimeError {
    pub fn as_transition(&self) -> Option<&TransitionError> {
        match self {
            RuntimeError::Transition(err) => Some(err),
            _ => None,
        }
    }
}
