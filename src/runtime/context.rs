//! Context handed to action bodies and reaction handlers.

use super::handle::MachineId;
use crate::core::{AnyState, Meta};
use serde_json::Value;

/// What an action body sees when it runs.
///
/// The body runs after the guard admitted the call and before the
/// transition is attempted. Actions it calls run, with everything they
/// trigger, before that transition.
#[derive(Clone, Debug)]
pub struct Invocation<'a> {
    machine: MachineId,
    action: &'a str,
    state: AnyState,
    target: AnyState,
    meta: Option<&'a Meta>,
    requests: Vec<Request>,
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(
        machine: MachineId,
        action: &'a str,
        state: AnyState,
        target: AnyState,
        meta: Option<&'a Meta>,
    ) -> Self {
        Self {
            machine,
            action,
            state,
            target,
            meta,
            requests: Vec::new(),
        }
    }

    pub fn machine(&self) -> MachineId {
        self.machine
    }

    pub fn action(&self) -> &'a str {
        self.action
    }

    /// State before the transition.
    pub fn state(&self) -> AnyState {
        self.state
    }

    pub fn target(&self) -> AnyState {
        self.target
    }

    pub fn meta(&self) -> Option<&'a Meta> {
        self.meta
    }

    pub fn meta_value(&self, key: &str) -> Option<&'a Value> {
        self.meta.and_then(|meta| meta.get(key))
    }

    /// Call another of this instance's actions.
    pub fn act(&mut self, action: impl Into<String>) {
        self.queue(self.machine, action.into(), None);
    }

    pub fn act_with(&mut self, action: impl Into<String>, meta: Meta) {
        self.queue(self.machine, action.into(), Some(meta));
    }

    /// Call an action on another instance of the same runtime.
    pub fn act_on(&mut self, target: impl Into<MachineId>, action: impl Into<String>) {
        self.queue(target.into(), action.into(), None);
    }

    fn queue(&mut self, target: MachineId, action: String, meta: Option<Meta>) {
        self.requests.push(Request {
            target,
            action,
            meta,
        });
    }

    pub(crate) fn into_requests(self) -> Vec<Request> {
        self.requests
    }
}

/// An action call queued by an action body or a reaction handler.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Request {
    pub(crate) target: MachineId,
    pub(crate) action: String,
    pub(crate) meta: Option<Meta>,
}

/// Handle a reaction uses to call actions.
///
/// Calls are queued and run, in the order they were made, as soon as the
/// handler returns and before any other pending work.
#[derive(Debug)]
pub struct Reactor {
    machine: MachineId,
    state: AnyState,
    requests: Vec<Request>,
}

impl Reactor {
    pub(crate) fn new(machine: MachineId, state: AnyState) -> Self {
        Self {
            machine,
            state,
            requests: Vec::new(),
        }
    }

    /// The reacting instance.
    pub fn machine(&self) -> MachineId {
        self.machine
    }

    /// The reacting instance's state when the event arrived.
    pub fn state(&self) -> AnyState {
        self.state
    }

    /// Call one of this instance's own actions.
    pub fn act(&mut self, action: impl Into<String>) {
        self.queue(self.machine, action.into(), None);
    }

    pub fn act_with(&mut self, action: impl Into<String>, meta: Meta) {
        self.queue(self.machine, action.into(), Some(meta));
    }

    /// Call an action on another instance.
    pub fn act_on(&mut self, target: impl Into<MachineId>, action: impl Into<String>) {
        self.queue(target.into(), action.into(), None);
    }

    pub fn act_on_with(&mut self, target: impl Into<MachineId>, action: impl Into<String>, meta: Meta) {
        self.queue(target.into(), action.into(), Some(meta));
    }

    fn queue(&mut self, target: MachineId, action: String, meta: Option<Meta>) {
        self.requests.push(Request {
            target,
            action,
            meta,
        });
    }

    pub(crate) fn into_requests(self) -> Vec<Request> {
        self.requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;
    use serde_json::json;

    state_enum! {
        enum Rider {
            Cycling,
            Stopped,
        }
    }

    #[test]
    fn reactor_queues_requests_in_call_order() {
        let mut reactor = Reactor::new(MachineId::new(1), AnyState::of(Rider::Cycling));
        reactor.act("stop");
        reactor.act_on(MachineId::new(4), "chase");
        let mut meta = Meta::new();
        meta.insert("reason".into(), json!("red light"));
        reactor.act_with("stop", meta.clone());

        let requests = reactor.into_requests();
        assert_eq!(
            requests,
            vec![
                Request {
                    target: MachineId::new(1),
                    action: "stop".into(),
                    meta: None
                },
                Request {
                    target: MachineId::new(4),
                    action: "chase".into(),
                    meta: None
                },
                Request {
                    target: MachineId::new(1),
                    action: "stop".into(),
                    meta: Some(meta)
                },
            ]
        );
    }

    #[test]
    fn invocation_exposes_meta() {
        let mut meta = Meta::new();
        meta.insert("msg".into(), json!("Freezing water"));
        let invocation = Invocation::new(
            MachineId::new(0),
            "stop",
            AnyState::of(Rider::Cycling),
            AnyState::of(Rider::Stopped),
            Some(&meta),
        );

        assert_eq!(invocation.action(), "stop");
        assert_eq!(invocation.meta_value("msg"), Some(&json!("Freezing water")));
        assert_eq!(invocation.target(), AnyState::of(Rider::Stopped));
    }

    #[test]
    fn invocation_queues_calls_in_order() {
        let mut invocation = Invocation::new(
            MachineId::new(2),
            "stop",
            AnyState::of(Rider::Cycling),
            AnyState::of(Rider::Stopped),
            None,
        );
        invocation.act_on(MachineId::new(0), "red");
        invocation.act("brake");

        let requests = invocation.into_requests();
        let calls: Vec<_> = requests
            .iter()
            .map(|r| (r.target.index(), r.action.as_str()))
            .collect();
        assert_eq!(calls, vec![(0, "red"), (2, "brake")]);
    }
}
