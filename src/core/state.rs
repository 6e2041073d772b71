//! Core State trait and its type-erased form.
//!
//! Every machine type draws its states from a closed Rust enum implementing
//! [`State`]. Guards, reactions and events need to talk about states of
//! *other* machine types as well, so the engine works on [`AnyState`], a
//! small `Copy` value that remembers which enum a variant came from.

use serde::{Deserialize, Serialize, Serializer};
use std::any::TypeId;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};

/// Trait for state machine states.
///
/// All methods are pure. States are immutable values drawn from a finite,
/// closed set; [`State::variants`] enumerates that set.
///
/// Most implementations come from the [`state_enum!`](crate::state_enum)
/// macro, but writing one by hand is straightforward:
///
/// ```rust
/// use statecast::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
///
///     fn variants() -> &'static [Self] {
///         &[Self::Open, Self::Closed]
///     }
/// }
///
/// assert_eq!(Door::Closed.name(), "Closed");
/// assert_eq!(Door::set_name(), "Door");
/// ```
pub trait State:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// The variant's name for display and logging.
    fn name(&self) -> &'static str;

    /// Every member of the closed state set.
    fn variants() -> &'static [Self];

    /// Name of the state set, used when rendering an [`AnyState`].
    ///
    /// Defaults to the last path segment of the Rust type name.
    fn set_name() -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// A state value from any [`State`] enum.
///
/// Equality is typed: two values are equal only when they come from the same
/// enum and name the same variant, so `Cyclist::Stopped` never matches
/// `PoliceCar::Stopped`.
#[derive(Clone, Copy)]
pub struct AnyState {
    type_id: TypeId,
    set: &'static str,
    name: &'static str,
}

impl AnyState {
    /// Erase a concrete state.
    pub fn of<S: State>(state: S) -> Self {
        Self {
            type_id: TypeId::of::<S>(),
            set: S::set_name(),
            name: state.name(),
        }
    }

    /// Variant name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the enum the variant belongs to.
    pub fn set_name(&self) -> &'static str {
        self.set
    }

    /// Whether this value was erased from `S`.
    pub fn is<S: State>(&self) -> bool {
        self.type_id == TypeId::of::<S>()
    }

    /// Recover the concrete state, if this value came from `S`.
    pub fn downcast<S: State>(&self) -> Option<S> {
        if !self.is::<S>() {
            return None;
        }
        S::variants()
            .iter()
            .copied()
            .find(|variant| variant.name() == self.name)
    }
}

impl<S: State> From<S> for AnyState {
    fn from(state: S) -> Self {
        AnyState::of(state)
    }
}

impl PartialEq for AnyState {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.name == other.name
    }
}

impl Eq for AnyState {}

impl Hash for AnyState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.name.hash(state);
    }
}

impl Display for AnyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.set, self.name)
    }
}

impl Debug for AnyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Serialize for AnyState {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Initial,
        Processing,
        Stopped,
    }

    impl State for TestState {
        fn name(&self) -> &'static str {
            match self {
                Self::Initial => "Initial",
                Self::Processing => "Processing",
                Self::Stopped => "Stopped",
            }
        }

        fn variants() -> &'static [Self] {
            &[Self::Initial, Self::Processing, Self::Stopped]
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum OtherState {
        Stopped,
    }

    impl State for OtherState {
        fn name(&self) -> &'static str {
            "Stopped"
        }

        fn variants() -> &'static [Self] {
            &[Self::Stopped]
        }

        fn set_name() -> &'static str {
            "Other"
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Stopped.name(), "Stopped");
    }

    #[test]
    fn default_set_name_is_short_type_name() {
        assert_eq!(TestState::set_name(), "TestState");
        assert_eq!(OtherState::set_name(), "Other");
    }

    #[test]
    fn erased_states_compare_by_type_and_variant() {
        assert_eq!(
            AnyState::of(TestState::Stopped),
            AnyState::of(TestState::Stopped)
        );
        assert_ne!(
            AnyState::of(TestState::Stopped),
            AnyState::of(TestState::Initial)
        );
        assert_ne!(
            AnyState::of(TestState::Stopped),
            AnyState::of(OtherState::Stopped)
        );
    }

    #[test]
    fn erased_states_hash_consistently() {
        let set: HashSet<AnyState> = [
            TestState::Stopped.into(),
            TestState::Stopped.into(),
            OtherState::Stopped.into(),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn downcast_recovers_concrete_state() {
        let erased = AnyState::of(TestState::Processing);
        assert!(erased.is::<TestState>());
        assert_eq!(erased.downcast::<TestState>(), Some(TestState::Processing));
        assert_eq!(erased.downcast::<OtherState>(), None);
    }

    #[test]
    fn display_includes_set_name() {
        assert_eq!(
            AnyState::of(TestState::Initial).to_string(),
            "TestState::Initial"
        );
        assert_eq!(AnyState::of(OtherState::Stopped).to_string(), "Other::Stopped");
    }

    #[test]
    fn erased_state_serializes_as_string() {
        let json = serde_json::to_string(&AnyState::of(TestState::Processing)).unwrap();
        assert_eq!(json, "\"TestState::Processing\"");
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Initial;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
