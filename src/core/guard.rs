//! Guard predicates for gating actions and reactions.
//!
//! A guard is a pair of state sets. It is evaluated against everything an
//! instance can observe: its own current state plus the last-known state of
//! each publisher it subscribes to.

use super::state::AnyState;
use std::collections::HashSet;
use std::fmt;

/// Outcome of evaluating a [`Guard`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The call may proceed.
    Allow,

    /// `when` is non-empty and none of its states is observed.
    BlockedByWhen,

    /// An observed state is listed in `unless`.
    BlockedByUnless(AnyState),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow)
    }
}

/// `when`/`unless` precondition over observed states.
///
/// Sets may mix states of different enums; membership uses the typed
/// equality of [`AnyState`].
///
/// # Example
///
/// ```rust
/// use statecast::core::{AnyState, Guard, Verdict};
/// use statecast::state_enum;
///
/// state_enum! {
///     enum Light { Green, Red }
/// }
///
/// state_enum! {
///     enum Police { Rolling, Chasing }
/// }
///
/// let guard = Guard::new().when(Light::Green).unless(Police::Chasing);
///
/// let own = AnyState::of(Light::Green);
/// assert!(guard.check(own, [AnyState::of(Police::Rolling)]));
/// assert_eq!(
///     guard.evaluate(own, [AnyState::of(Police::Chasing)]),
///     Verdict::BlockedByUnless(AnyState::of(Police::Chasing))
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Guard {
    when: HashSet<AnyState>,
    unless: HashSet<AnyState>,
}

impl Guard {
    /// An open guard that admits everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least one observed state from the `when` set.
    pub fn when(mut self, state: impl Into<AnyState>) -> Self {
        self.when.insert(state.into());
        self
    }

    /// Refuse if any observed state is in the `unless` set.
    pub fn unless(mut self, state: impl Into<AnyState>) -> Self {
        self.unless.insert(state.into());
        self
    }

    pub fn when_states(&self) -> &HashSet<AnyState> {
        &self.when
    }

    pub fn unless_states(&self) -> &HashSet<AnyState> {
        &self.unless
    }

    /// True when neither set constrains anything.
    pub fn is_open(&self) -> bool {
        self.when.is_empty() && self.unless.is_empty()
    }

    /// Evaluate against an instance's own state and its publishers' states.
    ///
    /// `when` is checked first; if it blocks, `unless` is never consulted.
    pub fn evaluate(
        &self,
        own: AnyState,
        publishers: impl IntoIterator<Item = AnyState>,
    ) -> Verdict {
        if self.is_open() {
            return Verdict::Allow;
        }

        let mut observed: HashSet<AnyState> = publishers.into_iter().collect();
        observed.insert(own);

        if !self.when.is_empty() && self.when.is_disjoint(&observed) {
            return Verdict::BlockedByWhen;
        }

        if let Some(hit) = self.unless.iter().find(|s| observed.contains(*s)) {
            return Verdict::BlockedByUnless(*hit);
        }

        Verdict::Allow
    }

    /// Boolean form of [`Guard::evaluate`].
    pub fn check(&self, own: AnyState, publishers: impl IntoIterator<Item = AnyState>) -> bool {
        self.evaluate(own, publishers).is_allowed()
    }

    /// Renders the set a verdict refers to, for diagnostics.
    pub(crate) fn describe(&self, verdict: Verdict) -> String {
        match verdict {
            Verdict::Allow => String::new(),
            Verdict::BlockedByWhen => format!("unless {}", StateList(&self.when)),
            Verdict::BlockedByUnless(_) => format!("when {}", StateList(&self.unless)),
        }
    }
}

struct StateList<'a>(&'a HashSet<AnyState>);

impl fmt::Display for StateList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        names.sort();
        write!(f, "{{{}}}", names.join(", "))
    }
}
