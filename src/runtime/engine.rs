//! The runtime: owns every instance, wires publishers to consumers and
//! drives action cascades.
//!
//! Cascades run on an explicit work list instead of the call stack. Work
//! produced by a step is pushed to the front in the order it was issued, so
//! processing follows the depth-first order of the equivalent nested calls:
//! a reaction's actions finish, including everything they trigger, before
//! the next consumer hears the triggering broadcast.

use super::context::{Invocation, Reactor, Request};
use super::error::RuntimeError;
use super::handle::{Handle, MachineId};
use super::machine::Machine;
use crate::builder::MachineType;
use crate::config::RuntimeConfig;
use crate::core::{AnyState, Event, EventLog, Meta, State};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, warn};

enum Work {
    Invoke(Request),
    Commit {
        target: MachineId,
        event: Event,
        broadcast: bool,
    },
    Deliver { consumer: MachineId, event: Event },
}

/// Arena of machine instances and the dispatcher between them.
///
/// # Example
///
/// ```rust
/// use statecast::builder::{broadcast_action, simple_action, MachineTypeBuilder, ReactionBuilder};
/// use statecast::core::Transition;
/// use statecast::runtime::Runtime;
/// use statecast::state_enum;
///
/// state_enum! {
///     enum Light { Green, Red }
/// }
///
/// state_enum! {
///     enum Rider { Cycling, Stopped }
/// }
///
/// let light = MachineTypeBuilder::new("light")
///     .transitions([Transition::bidirectional(Light::Green, Light::Red)])
///     .action(broadcast_action("red", Light::Red))
///     .unwrap()
///     .build();
///
/// let cyclist = MachineTypeBuilder::new("cyclist")
///     .transitions([Transition::new(Rider::Cycling, Rider::Stopped)])
///     .action(simple_action("stop", Rider::Stopped))
///     .and_then(|b| {
///         b.reaction(
///             ReactionBuilder::new("on_red")
///                 .on(Light::Red)
///                 .run(|reactor, _event| reactor.act("stop")),
///         )
///     })
///     .unwrap()
///     .build();
///
/// let mut runtime = Runtime::new();
/// let signal = runtime.spawn(&light, Light::Green);
/// let rider = runtime.spawn(&cyclist, Rider::Cycling);
/// runtime.subscribe(rider, &[signal.id()]).unwrap();
///
/// runtime.act(signal, "red").unwrap();
/// assert_eq!(runtime.state(rider), Some(Rider::Stopped));
/// ```
#[derive(Debug, Default)]
pub struct Runtime {
    machines: Vec<Machine>,
    config: RuntimeConfig,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            machines: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Create an instance of `machine_type` in `initial`.
    pub fn spawn<S: State>(&mut self, machine_type: &MachineType<S>, initial: S) -> Handle<S> {
        let id = MachineId::new(self.machines.len());
        let blueprint = Arc::clone(machine_type.blueprint());
        self.machines
            .push(Machine::new(id, blueprint, AnyState::of(initial)));
        Handle::new(id)
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    pub fn machine(&self, id: impl Into<MachineId>) -> Option<&Machine> {
        self.machines.get(id.into().index())
    }

    pub fn machines(&self) -> impl Iterator<Item = &Machine> {
        self.machines.iter()
    }

    /// Current state of a typed instance.
    ///
    /// `None` when the handle belongs to another runtime.
    pub fn state<S: State>(&self, handle: Handle<S>) -> Option<S> {
        self.machine(handle)?.state().downcast()
    }

    pub fn state_of(&self, id: impl Into<MachineId>) -> Option<AnyState> {
        self.machine(id).map(Machine::state)
    }

    pub fn events(&self, id: impl Into<MachineId>) -> Option<&EventLog> {
        self.machine(id).map(Machine::events)
    }

    /// Subscribe `consumer` to each publisher.
    ///
    /// Snapshots every publisher's current state into the consumer, then
    /// registers the consumer with the publisher. Nothing is wired if any id
    /// is unknown.
    pub fn subscribe(
        &mut self,
        consumer: impl Into<MachineId>,
        publishers: &[MachineId],
    ) -> Result<(), RuntimeError> {
        let consumer = consumer.into();
        self.get(consumer)?;
        let snapshots = publishers
            .iter()
            .map(|&publisher| -> Result<_, RuntimeError> {
                Ok((publisher, self.get(publisher)?.state()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (publisher, state) in snapshots {
            debug!(consumer = %consumer, publisher = %publisher, state = %state, "subscribing");
            self.get_mut(consumer)?.observe(publisher, state);
            self.register(publisher, &[consumer])?;
        }
        Ok(())
    }

    /// Add consumers to `publisher`'s broadcast set. Repeats are ignored.
    pub fn register(
        &mut self,
        publisher: impl Into<MachineId>,
        consumers: &[MachineId],
    ) -> Result<(), RuntimeError> {
        let publisher = publisher.into();
        self.get(publisher)?;
        for &consumer in consumers {
            self.get(consumer)?;
        }

        let machine = self.get_mut(publisher)?;
        for &consumer in consumers {
            machine.add_consumer(consumer);
        }
        Ok(())
    }

    /// Call an action by name.
    ///
    /// Returns `Ok(())` when a guard blocks the call; only an unreachable
    /// target, an unknown name or the cascade limit produce an error.
    pub fn act(&mut self, target: impl Into<MachineId>, action: &str) -> Result<(), RuntimeError> {
        self.dispatch(Request {
            target: target.into(),
            action: action.to_string(),
            meta: None,
        })
    }

    /// Call an action with metadata, which travels with the resulting event.
    pub fn act_with(
        &mut self,
        target: impl Into<MachineId>,
        action: &str,
        meta: Meta,
    ) -> Result<(), RuntimeError> {
        self.dispatch(Request {
            target: target.into(),
            action: action.to_string(),
            meta: Some(meta),
        })
    }

    fn dispatch(&mut self, request: Request) -> Result<(), RuntimeError> {
        let mut pending = VecDeque::from([Work::Invoke(request)]);
        let mut steps = 0usize;

        while let Some(work) = pending.pop_front() {
            steps += 1;
            if let Some(limit) = self.config.cascade_limit {
                if steps > limit {
                    warn!(limit, dropped = pending.len() + 1, "cascade limit exceeded");
                    return Err(RuntimeError::CascadeLimitExceeded { limit });
                }
            }

            let follow_ups = match work {
                Work::Invoke(request) => self.invoke(request)?,
                Work::Commit {
                    target,
                    event,
                    broadcast,
                } => self.commit(target, event, broadcast)?,
                Work::Deliver { consumer, event } => self.deliver(consumer, event)?,
            };
            for next in follow_ups.into_iter().rev() {
                pending.push_front(next);
            }
        }
        Ok(())
    }

    fn invoke(&mut self, request: Request) -> Result<Vec<Work>, RuntimeError> {
        let Request {
            target,
            action,
            meta,
        } = request;

        let machine = self.get(target)?;
        let blueprint = Arc::clone(machine.blueprint());
        let spec = blueprint
            .actions
            .get(&action)
            .ok_or_else(|| RuntimeError::UnknownAction {
                machine: machine.to_string(),
                action: action.clone(),
            })?;

        if !machine.admits(&spec.name, &spec.guard) {
            return Ok(Vec::new());
        }

        let mut follow_ups = Vec::new();
        if let Some(body) = &spec.body {
            let mut call = Invocation::new(
                target,
                &spec.name,
                machine.state(),
                spec.target,
                meta.as_ref(),
            );
            body(&mut call);
            follow_ups.extend(call.into_requests().into_iter().map(Work::Invoke));
        }

        let event = Event::new(spec.name.clone(), target, spec.target, meta);
        if follow_ups.is_empty() {
            return self.commit(target, event, spec.broadcast);
        }
        // Calls made by the body finish before this transition is attempted.
        follow_ups.push(Work::Commit {
            target,
            event,
            broadcast: spec.broadcast,
        });
        Ok(follow_ups)
    }

    /// Internal processing of an instance's own event, then fan-out.
    fn commit(
        &mut self,
        target: MachineId,
        event: Event,
        broadcast: bool,
    ) -> Result<Vec<Work>, RuntimeError> {
        let machine = self.get_mut(target)?;
        let Some(outgoing) = machine.process_internal(event, broadcast)? else {
            return Ok(Vec::new());
        };

        Ok(machine
            .consumers()
            .iter()
            .map(|&consumer| {
                debug!(machine = %machine, consumer = %consumer, event = %outgoing.name, "publishing");
                Work::Deliver {
                    consumer,
                    event: outgoing.clone(),
                }
            })
            .collect())
    }

    fn deliver(&mut self, consumer: MachineId, event: Event) -> Result<Vec<Work>, RuntimeError> {
        let machine = self.get_mut(consumer)?;

        // A self-registered instance hears its own broadcast as an internal
        // event. It commits, and broadcasts again, if the instance was moved
        // away in the meantime.
        if event.source == consumer {
            let broadcast = machine
                .blueprint()
                .actions
                .get(&event.name)
                .is_some_and(|spec| spec.broadcast);
            return self.commit(consumer, event, broadcast);
        }

        let Some(handler) = machine.process_external(&event) else {
            return Ok(Vec::new());
        };
        let mut reactor = Reactor::new(consumer, machine.state());
        handler(&mut reactor, &event);

        Ok(reactor
            .into_requests()
            .into_iter()
            .map(Work::Invoke)
            .collect())
    }

    fn get(&self, id: MachineId) -> Result<&Machine, RuntimeError> {
        self.machines
            .get(id.index())
            .ok_or(RuntimeError::UnknownMachine(id))
    }

    fn get_mut(&mut self, id: MachineId) -> Result<&mut Machine, RuntimeError> {
        self.machines
            .get_mut(id.index())
            .ok_or(RuntimeError::UnknownMachine(id))
    }
}
