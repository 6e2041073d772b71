//! The imperative shell around the core types.
//!
//! # Key Concepts
//!
//! - **Runtime**: arena that owns every instance and dispatches cascades
//! - **Machine**: one instance with its state, publishers, consumers and log
//! - **Invocation / Reactor**: what action bodies and reaction handlers see
//!
//! Execution is single-threaded and synchronous. An action call returns once
//! every broadcast and reaction it triggered has been processed.

mod context;
mod engine;
mod error;
mod handle;
mod machine;

pub use context::{Invocation, Reactor};
pub use engine::Runtime;
pub use error::{RuntimeError, TransitionError};
pub use handle::{Handle, MachineId};
pub use machine::Machine;
