//! Events exchanged between machine instances.

use super::state::{AnyState, State};
use crate::runtime::MachineId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Arbitrary key/value data carried with an event.
pub type Meta = serde_json::Map<String, Value>;

/// Immutable record of a state-relevant occurrence.
///
/// `name` is the action that produced the event, `source` the instance that
/// produced it and `state` the resulting state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Event {
    pub name: String,
    pub source: MachineId,
    pub state: AnyState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    pub recorded_at: DateTime<Utc>,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        source: MachineId,
        state: impl Into<AnyState>,
        meta: Option<Meta>,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            state: state.into(),
            meta,
            recorded_at: Utc::now(),
        }
    }

    /// The carried state as a concrete type, if it belongs to `S`.
    pub fn state_as<S: State>(&self) -> Option<S> {
        self.state.downcast()
    }

    pub fn meta_value(&self, key: &str) -> Option<&Value> {
        self.meta.as_ref().and_then(|meta| meta.get(key))
    }
}
