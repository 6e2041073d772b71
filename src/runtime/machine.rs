//! A machine instance and its event-processing paths.
//!
//! Each instance owns its current state, transition table, publisher
//! snapshot, consumer set and event log. Nothing here touches another
//! instance; fan-out to consumers is returned to the [`Runtime`](super::Runtime)
//! which schedules it.

use super::error::TransitionError;
use super::handle::MachineId;
use crate::builder::machine::Blueprint;
use crate::builder::ReactionHandler;
use crate::core::{AnyState, Event, EventLog, Guard, TransitionTable, Verdict};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// A live instance of a machine type.
pub struct Machine {
    id: MachineId,
    blueprint: Arc<Blueprint>,
    current: AnyState,
    table: TransitionTable,
    publishers: HashMap<MachineId, AnyState>,
    consumers: BTreeSet<MachineId>,
    events: EventLog,
}

impl Machine {
    /// Create an instance. The initial state is not checked against the table.
    pub(crate) fn new(id: MachineId, blueprint: Arc<Blueprint>, initial: AnyState) -> Self {
        let table = TransitionTable::build(&blueprint.transitions);
        let machine = Self {
            id,
            blueprint,
            current: initial,
            table,
            publishers: HashMap::new(),
            consumers: BTreeSet::new(),
            events: EventLog::new(),
        };
        info!(machine = %machine, state = %initial, "starting");
        machine
    }

    pub fn id(&self) -> MachineId {
        self.id
    }

    /// Name of the machine type.
    pub fn name(&self) -> &str {
        &self.blueprint.name
    }

    pub fn state(&self) -> AnyState {
        self.current
    }

    pub fn transition_table(&self) -> &TransitionTable {
        &self.table
    }

    /// Last-known state of every publisher this instance subscribes to.
    pub fn publishers(&self) -> &HashMap<MachineId, AnyState> {
        &self.publishers
    }

    pub fn publisher_state(&self, publisher: MachineId) -> Option<AnyState> {
        self.publishers.get(&publisher).copied()
    }

    /// Instances that receive this one's broadcasts, in delivery order.
    pub fn consumers(&self) -> &BTreeSet<MachineId> {
        &self.consumers
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub(crate) fn blueprint(&self) -> &Arc<Blueprint> {
        &self.blueprint
    }

    /// Evaluate a guard against own state and publisher states.
    pub(crate) fn admits(&self, what: &str, guard: &Guard) -> bool {
        let verdict = guard.evaluate(self.current, self.publishers.values().copied());
        if verdict == Verdict::Allow {
            return true;
        }
        debug!(machine = %self, "cannot {} {}", what, guard.describe(verdict));
        false
    }

    pub(crate) fn observe(&mut self, publisher: MachineId, state: AnyState) {
        self.publishers.insert(publisher, state);
    }

    pub(crate) fn add_consumer(&mut self, consumer: MachineId) {
        if self.consumers.insert(consumer) {
            debug!(machine = %self, consumer = %consumer, "registering consumer");
        }
    }

    /// Handle an event this instance produced itself.
    ///
    /// Returns the event to publish when the transition committed and the
    /// action broadcasts.
    pub(crate) fn process_internal(
        &mut self,
        event: Event,
        broadcast: bool,
    ) -> Result<Option<Event>, TransitionError> {
        self.events.record(event.clone());
        let target = event.state;

        if target == self.current {
            trace!(machine = %self, event = %event.name, state = %target, "already in state");
            return Ok(None);
        }

        if !self.table.allows(&self.current, &target) {
            return Err(TransitionError {
                machine: self.to_string(),
                from: self.current,
                to: target,
            });
        }

        info!(
            machine = %self,
            event = %event.name,
            from = %self.current,
            to = %target,
            "transitioning"
        );
        self.current = target;

        Ok(broadcast.then(|| Event::new(event.name, self.id, self.current, event.meta)))
    }

    /// Handle an event received from a publisher.
    ///
    /// Always records the publisher's new state. Returns the bound reaction
    /// when one exists and its guard admits it.
    pub(crate) fn process_external(&mut self, event: &Event) -> Option<ReactionHandler> {
        debug!(
            machine = %self,
            event = %event.name,
            source = %event.source,
            state = %event.state,
            "processing external event"
        );
        self.events.record(event.clone());
        self.publishers.insert(event.source, event.state);

        let reaction = self.blueprint.reactions.get(&event.state)?;
        let what = format!("react {}", reaction.name);
        if !self.admits(&what, &reaction.guard) {
            return None;
        }
        Some(Arc::clone(&reaction.handler))
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.blueprint.name, self.id)
    }
}

impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("name", &self.blueprint.name)
            .field("state", &self.current)
            .field("publishers", &self.publishers)
            .field("consumers", &self.consumers)
            .field("events", &self.events.len())
            .finish()
    }
}
