//! Builder for reaction declarations.

use crate::builder::error::DefinitionError;
use crate::core::{AnyState, Event, Guard};
use crate::runtime::Reactor;
use std::sync::Arc;

/// Handler run when a publisher's event carries the triggering state.
pub type ReactionHandler = Arc<dyn Fn(&mut Reactor, &Event) + Send + Sync>;

/// A registered reaction: triggering state, guard and handler.
pub struct ReactionSpec {
    pub(crate) name: String,
    pub(crate) trigger: AnyState,
    pub(crate) guard: Guard,
    pub(crate) handler: ReactionHandler,
}

impl ReactionSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trigger(&self) -> AnyState {
        self.trigger
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }
}

impl std::fmt::Debug for ReactionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionSpec")
            .field("name", &self.name)
            .field("trigger", &self.trigger)
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

/// Builder for reactions with a fluent API.
///
/// The triggering state usually belongs to another machine type: a cyclist
/// reacts to a traffic light turning red.
pub struct ReactionBuilder {
    name: String,
    trigger: Option<AnyState>,
    guard: Guard,
    handler: Option<ReactionHandler>,
}

impl ReactionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trigger: None,
            guard: Guard::new(),
            handler: None,
        }
    }

    /// Set the triggering state (required).
    pub fn on(mut self, state: impl Into<AnyState>) -> Self {
        self.trigger = Some(state.into());
        self
    }

    pub fn when(mut self, state: impl Into<AnyState>) -> Self {
        self.guard = self.guard.when(state);
        self
    }

    pub fn unless(mut self, state: impl Into<AnyState>) -> Self {
        self.guard = self.guard.unless(state);
        self
    }

    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    /// Set the handler (required).
    pub fn run<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Reactor, &Event) + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn build(self) -> Result<ReactionSpec, DefinitionError> {
        let trigger = self
            .trigger
            .ok_or_else(|| DefinitionError::MissingTrigger(self.name.clone()))?;
        let handler = self
            .handler
            .ok_or_else(|| DefinitionError::MissingHandler(self.name.clone()))?;

        Ok(ReactionSpec {
            name: self.name,
            trigger,
            guard: self.guard,
            handler,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum Light {
            Green,
            Red,
        }
    }

    #[test]
    fn builder_validates_missing_trigger() {
        let result = ReactionBuilder::new("on_red").run(|_, _| {}).build();
        assert!(matches!(result, Err(DefinitionError::MissingTrigger(name)) if name == "on_red"));
    }

    #[test]
    fn builder_validates_missing_handler() {
        let result = ReactionBuilder::new("on_red").on(Light::Red).build();
        assert!(matches!(result, Err(DefinitionError::MissingHandler(_))));
    }

    #[test]
    fn fluent_api_builds_reaction() {
        let spec = ReactionBuilder::new("on_green")
            .on(Light::Green)
            .unless(Light::Red)
            .run(|reactor, _event| reactor.act("go"))
            .build()
            .unwrap();

        assert_eq!(spec.name(), "on_green");
        assert_eq!(spec.trigger(), AnyState::of(Light::Green));
        assert!(spec.guard().unless_states().contains(&AnyState::of(Light::Red)));
    }
}
