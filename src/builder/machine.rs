//! Builder for machine types.
//!
//! A machine type is the shared, read-only part of every instance: its
//! declared transitions plus the action and reaction registries.

use crate::builder::action::{ActionBuilder, ActionSpec};
use crate::builder::error::DefinitionError;
use crate::builder::reaction::{ReactionBuilder, ReactionSpec};
use crate::core::{AnyState, State, Transition};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// Type-erased registries shared by all instances of one machine type.
#[derive(Debug)]
pub(crate) struct Blueprint {
    pub(crate) name: String,
    pub(crate) transitions: Vec<Transition<AnyState>>,
    pub(crate) actions: HashMap<String, ActionSpec>,
    pub(crate) reactions: HashMap<AnyState, ReactionSpec>,
}

/// A declared machine type over the state enum `S`.
///
/// Cheap to clone; every clone shares the same registries.
pub struct MachineType<S: State> {
    blueprint: Arc<Blueprint>,
    _state: PhantomData<fn() -> S>,
}

impl<S: State> MachineType<S> {
    pub fn builder(name: impl Into<String>) -> MachineTypeBuilder<S> {
        MachineTypeBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.blueprint.name
    }

    /// Declared transitions, as given to the builder.
    pub fn transitions(&self) -> Vec<Transition<S>> {
        self.blueprint
            .transitions
            .iter()
            .filter_map(|t| {
                Some(Transition {
                    source: t.source.downcast()?,
                    destination: t.destination.downcast()?,
                    bidirectional: t.bidirectional,
                })
            })
            .collect()
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.blueprint.actions.contains_key(name)
    }

    pub fn action(&self, name: &str) -> Option<&ActionSpec> {
        self.blueprint.actions.get(name)
    }

    /// Registered action names, sorted.
    pub fn action_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.blueprint.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Whether a reaction is bound to `state`.
    pub fn reacts_to(&self, state: impl Into<AnyState>) -> bool {
        self.blueprint.reactions.contains_key(&state.into())
    }

    pub(crate) fn blueprint(&self) -> &Arc<Blueprint> {
        &self.blueprint
    }
}

impl<S: State> Clone for MachineType<S> {
    fn clone(&self) -> Self {
        Self {
            blueprint: Arc::clone(&self.blueprint),
            _state: PhantomData,
        }
    }
}

impl<S: State> std::fmt::Debug for MachineType<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MachineType")
            .field("name", &self.blueprint.name)
            .field("states", &S::set_name())
            .field("actions", &self.action_names())
            .finish()
    }
}

/// Builder for machine types with a fluent API.
///
/// Registration is checked as it happens: binding a second reaction to the
/// same triggering state fails immediately.
///
/// ```rust
/// use statecast::builder::{simple_action, MachineTypeBuilder};
/// use statecast::core::Transition;
/// use statecast::state_enum;
///
/// state_enum! {
///     enum Phase { Solid, Liquid }
/// }
///
/// let gold = MachineTypeBuilder::new("gold")
///     .transition(Transition::bidirectional(Phase::Liquid, Phase::Solid))
///     .action(simple_action("melt", Phase::Liquid))
///     .and_then(|b| b.action(simple_action("freeze", Phase::Solid)))
///     .unwrap()
///     .build();
///
/// assert_eq!(gold.action_names(), vec!["freeze", "melt"]);
/// ```
pub struct MachineTypeBuilder<S: State> {
    name: String,
    transitions: Vec<Transition<S>>,
    actions: HashMap<String, ActionSpec>,
    reactions: HashMap<AnyState, ReactionSpec>,
}

impl<S: State> MachineTypeBuilder<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: Vec::new(),
            actions: HashMap::new(),
            reactions: HashMap::new(),
        }
    }

    pub fn transition(mut self, transition: Transition<S>) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn transitions(mut self, transitions: impl IntoIterator<Item = Transition<S>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Register an action. Names are unique per machine type.
    pub fn action(mut self, builder: ActionBuilder<S>) -> Result<Self, DefinitionError> {
        let spec = builder.build()?;
        if self.actions.contains_key(&spec.name) {
            return Err(DefinitionError::DuplicateAction(spec.name));
        }
        self.actions.insert(spec.name.clone(), spec);
        Ok(self)
    }

    /// Register a reaction. At most one reaction per triggering state.
    pub fn reaction(mut self, builder: ReactionBuilder) -> Result<Self, DefinitionError> {
        let spec = builder.build()?;
        if let Some(existing) = self.reactions.get(&spec.trigger) {
            return Err(DefinitionError::DuplicateStateReaction {
                state: spec.trigger,
                reaction: spec.name,
                existing: existing.name.clone(),
            });
        }
        self.reactions.insert(spec.trigger, spec);
        Ok(self)
    }

    pub fn build(self) -> MachineType<S> {
        let transitions = self.transitions.iter().map(Transition::erase).collect();
        MachineType {
            blueprint: Arc::new(Blueprint {
                name: self.name,
                transitions,
                actions: self.actions,
                reactions: self.reactions,
            }),
            _state: PhantomData,
        }
    }
}
