//! Core state machine types and logic.
//!
//! This module contains the value types and pure functions the runtime is
//! built from:
//! - States via the `State` trait and its erased form `AnyState`
//! - Declared transitions and the derived `TransitionTable`
//! - Events and the append-only `EventLog`
//! - `when`/`unless` guards
//!
//! Nothing in this module mutates another machine instance.

mod event;
mod guard;
mod history;
mod state;
mod transition;

pub use event::{Event, Meta};
pub use guard::{Guard, Verdict};
pub use history::EventLog;
pub use state::{AnyState, State};
pub use transition::{Transition, TransitionTable};
