//! Builder API for declaring machine types.
//!
//! This module provides fluent builders and a macro for declaring states,
//! transitions, actions and reactions. Every registry is fixed once
//! `MachineTypeBuilder::build` returns.

pub mod action;
pub mod error;
pub mod machine;
pub mod macros;
pub mod reaction;

pub use action::{ActionBody, ActionBuilder, ActionSpec};
pub use error::DefinitionError;
pub use machine::{MachineType, MachineTypeBuilder};
pub use reaction::{ReactionBuilder, ReactionHandler, ReactionSpec};

use crate::core::State;

/// Create an unguarded, non-broadcasting action with no body.
///
/// # Example
///
/// ```
/// use statecast::builder::simple_action;
/// use statecast::state_enum;
///
/// state_enum! {
///     enum Phase {
///         Solid,
///         Liquid,
///     }
/// }
///
/// let melt = simple_action("melt", Phase::Liquid).build().unwrap();
/// assert!(!melt.is_broadcast());
/// ```
pub fn simple_action<S: State>(name: impl Into<String>, target: S) -> ActionBuilder<S> {
    ActionBuilder::new(name).to(target)
}

/// Create a broadcasting action: consumers hear about every successful move.
pub fn broadcast_action<S: State>(name: impl Into<String>, target: S) -> ActionBuilder<S> {
    ActionBuilder::new(name).to(target).broadcast()
}
