//! Builder for action declarations.

use crate::builder::error::DefinitionError;
use crate::core::{AnyState, Guard, State};
use crate::runtime::Invocation;
use std::marker::PhantomData;
use std::sync::Arc;

/// Side effect run when an action passes its guard, before the transition.
pub type ActionBody = Arc<dyn Fn(&mut Invocation<'_>) + Send + Sync>;

/// A registered action: target state, broadcast flag, guard and body.
pub struct ActionSpec {
    pub(crate) name: String,
    pub(crate) target: AnyState,
    pub(crate) broadcast: bool,
    pub(crate) guard: Guard,
    pub(crate) body: Option<ActionBody>,
}

impl ActionSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> AnyState {
        self.target
    }

    pub fn is_broadcast(&self) -> bool {
        self.broadcast
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }
}

impl std::fmt::Debug for ActionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionSpec")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("broadcast", &self.broadcast)
            .field("guard", &self.guard)
            .field("body", &self.body.is_some())
            .finish()
    }
}

/// Builder for actions with a fluent API.
///
/// ```rust
/// use statecast::builder::ActionBuilder;
/// use statecast::state_enum;
///
/// state_enum! {
///     enum Light { Green, Red }
/// }
///
/// let spec = ActionBuilder::new("green")
///     .to(Light::Green)
///     .broadcast()
///     .build()
///     .unwrap();
///
/// assert!(spec.is_broadcast());
/// ```
pub struct ActionBuilder<S: State> {
    name: String,
    target: Option<S>,
    broadcast: bool,
    guard: Guard,
    body: Option<ActionBody>,
    _state: PhantomData<fn() -> S>,
}

impl<S: State> ActionBuilder<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
            broadcast: false,
            guard: Guard::new(),
            body: None,
            _state: PhantomData,
        }
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(state);
        self
    }

    /// Publish the resulting event to every consumer on a successful transition.
    pub fn broadcast(mut self) -> Self {
        self.broadcast = true;
        self
    }

    /// Require one of these observed states. May name states of any machine type.
    pub fn when(mut self, state: impl Into<AnyState>) -> Self {
        self.guard = self.guard.when(state);
        self
    }

    /// Refuse while any of these states is observed.
    pub fn unless(mut self, state: impl Into<AnyState>) -> Self {
        self.guard = self.guard.unless(state);
        self
    }

    /// Replace the whole guard.
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    /// Set the action body (optional).
    ///
    /// The body may call further actions through the [`Invocation`]. They
    /// run to completion, cascades included, before this action's own
    /// transition is attempted.
    pub fn perform<F>(mut self, body: F) -> Self
    where
        F: Fn(&mut Invocation<'_>) + Send + Sync + 'static,
    {
        self.body = Some(Arc::new(body));
        self
    }

    pub fn build(self) -> Result<ActionSpec, DefinitionError> {
        let target = self
            .target
            .ok_or_else(|| DefinitionError::MissingTarget(self.name.clone()))?;

        Ok(ActionSpec {
            name: self.name,
            target: AnyState::of(target),
            broadcast: self.broadcast,
            guard: self.guard,
            body: self.body,
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

    state_enum! {
        enum Police {
            Chasing,
        }
    }

    #[test]
    fn builder_validates_missing_target() {
        let result = ActionBuilder::<Light>::new("green").build();
        assert!(matches!(result, Err(DefinitionError::MissingTarget(name)) if name == "green"));
    }

    #[test]
    fn defaults_to_no_broadcast_and_open_guard() {
        let spec = ActionBuilder::new("red").to(Light::Red).build().unwrap();

        assert_eq!(spec.name(), "red");
        assert_eq!(spec.target(), AnyState::of(Light::Red));
        assert!(!spec.is_broadcast());
        assert!(spec.guard().is_open());
        assert!(spec.body.is_none());
    }

    #[test]
    fn guard_sets_accept_foreign_states() {
        let spec = ActionBuilder::new("green")
            .to(Light::Green)
            .when(Light::Red)
            .unless(Police::Chasing)
            .build()
            .unwrap();

        assert!(spec.guard().when_states().contains(&AnyState::of(Light::Red)));
        assert!(spec
            .guard()
            .unless_states()
            .contains(&AnyState::of(Police::Chasing)));
    }

    #[test]
    fn perform_stores_body() {
        let spec = ActionBuilder::new("red")
            .to(Light::Red)
            .perform(|_| {})
            .build()
            .unwrap();
        assert!(spec.body.is_some());
    }
}
