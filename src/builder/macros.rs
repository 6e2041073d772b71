//! Macros for ergonomic state declaration.

/// Declare a state enum and generate its `State` implementation.
///
/// The generated enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
/// `Debug` and serde's `Serialize`/`Deserialize`, so the calling crate needs
/// `serde` as a dependency.
///
/// # Example
///
/// ```
/// use statecast::core::State;
/// use statecast::state_enum;
///
/// state_enum! {
///     pub enum Substance {
///         Gas,
///         Liquid,
///         Solid,
///         Plasma,
///     }
/// }
///
/// assert_eq!(Substance::Liquid.name(), "Liquid");
/// assert_eq!(Substance::variants().len(), 4);
/// assert_eq!(Substance::set_name(), "Substance");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn variants() -> &'static [Self] {
                &[$(Self::$variant),*]
            }

            fn set_name() -> &'static str {
                stringify!($name)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{AnyState, State};

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Complete.name(), "Complete");
        assert_eq!(TestState::set_name(), "TestState");
    }

    #[test]
    fn variants_enumerate_closed_set_in_order() {
        assert_eq!(
            TestState::variants(),
            &[
                TestState::Initial,
                TestState::Processing,
                TestState::Complete
            ]
        );
    }

    #[test]
    fn generated_states_round_trip_through_any_state() {
        for state in TestState::variants() {
            assert_eq!(AnyState::of(*state).downcast::<TestState>(), Some(*state));
        }
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        assert_eq!(PublicState::B.name(), "B");
    }
}
