//! Identifiers for machine instances inside a [`Runtime`](super::Runtime).

use crate::core::State;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Arena index of a machine instance.
///
/// Publishers and consumers refer to each other through ids, never through
/// ownership.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MachineId(usize);

impl MachineId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Typed id returned by [`Runtime::spawn`](super::Runtime::spawn).
///
/// Remembers the state enum so [`Runtime::state`](super::Runtime::state)
/// can hand back a concrete `S`.
pub struct Handle<S: State> {
    id: MachineId,
    _state: PhantomData<fn() -> S>,
}

impl<S: State> Handle<S> {
    pub(crate) fn new(id: MachineId) -> Self {
        Self {
            id,
            _state: PhantomData,
        }
    }

    pub fn id(&self) -> MachineId {
        self.id
    }
}

impl<S: State> Clone for Handle<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: State> Copy for Handle<S> {}

impl<S: State> PartialEq for Handle<S> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<S: State> Eq for Handle<S> {}

impl<S: State> fmt::Debug for Handle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle<{}>({})", S::set_name(), self.id)
    }
}

impl<S: State> From<Handle<S>> for MachineId {
    fn from(handle: Handle<S>) -> Self {
        handle.id
    }
}
