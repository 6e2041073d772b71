//! Append-only event log kept by every machine instance.
//!
//! The log is an audit trail: the engine writes to it but never reads it
//! back for control flow.

use super::event::Event;
use super::state::AnyState;
use crate::runtime::MachineId;
use serde::Serialize;
use std::time::Duration;

/// Ordered record of every event an instance processed.
///
/// There is no removal API; entries are only ever appended.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub(crate) fn record(&mut self, event: Event) {
        self.events.push(event);
    }

    /// All recorded events, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Events produced by one source instance.
    pub fn from_source(&self, source: MachineId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.source == source)
    }

    /// Event names in log order.
    pub fn names(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.name.as_str()).collect()
    }

    /// States carried by the logged events, in log order.
    pub fn states(&self) -> Vec<AnyState> {
        self.events.iter().map(|e| e.state).collect()
    }

    /// Time between the first and last recorded event.
    ///
    /// Returns `None` for an empty log.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.events.first()?, self.events.last()?);
        last.recorded_at
            .signed_duration_since(first.recorded_at)
            .to_std()
            .ok()
    }

    /// Export the log as a JSON array.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
