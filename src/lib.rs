//! Statecast: finite-state machines that publish their transitions to each other
//!
//! Machines are declared once as types (transitions, actions and reactions)
//! and instantiated into a [`Runtime`]. An action moves its instance along a
//! declared edge and, when it broadcasts, delivers the new state to every
//! subscribed consumer. Consumers keep a snapshot of each publisher's state,
//! which guards consult, and may react to specific states by calling their
//! own actions.
//!
//! # Core Concepts
//!
//! - **State**: closed enums implementing [`State`], usually via [`state_enum!`]
//! - **Guards**: `when`/`unless` state sets checked against own and publisher states
//! - **Actions**: named transitions, optionally broadcast to consumers
//! - **Reactions**: handlers bound to a publisher state, one per state
//! - **Event log**: every event an instance processed, in order
//!
//! # Example
//!
//! ```rust
//! use statecast::{broadcast_action, MachineTypeBuilder, Runtime, Transition};
//! use statecast::state_enum;
//!
//! state_enum! {
//!     enum Phase { Solid, Liquid, Gas }
//! }
//!
//! let water = MachineTypeBuilder::new("water")
//!     .transitions([
//!         Transition::bidirectional(Phase::Liquid, Phase::Solid),
//!         Transition::new(Phase::Liquid, Phase::Gas),
//!     ])
//!     .action(broadcast_action("freeze", Phase::Solid))
//!     .and_then(|b| b.action(broadcast_action("melt", Phase::Liquid)))
//!     .and_then(|b| b.action(broadcast_action("boil", Phase::Gas)))
//!     .unwrap()
//!     .build();
//!
//! let mut runtime = Runtime::new();
//! let glass = runtime.spawn(&water, Phase::Liquid);
//!
//! runtime.act(glass, "freeze").unwrap();
//! runtime.act(glass, "melt").unwrap();
//! runtime.act(glass, "boil").unwrap();
//! assert_eq!(runtime.state(glass), Some(Phase::Gas));
//!
//! // Gas has no way back.
//! assert!(runtime.act(glass, "freeze").is_err());
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod runtime;

// Re-export commonly used types
pub use builder::{
    broadcast_action, simple_action, ActionBuilder, DefinitionError, MachineType,
    MachineTypeBuilder, ReactionBuilder,
};
pub use config::RuntimeConfig;
pub use crate::core::{AnyState, Event, EventLog, Guard, Meta, State, Transition, Verdict};
pub use runtime::{
    Handle, Invocation, Machine, MachineId, Reactor, Runtime, RuntimeError, TransitionError,
};
