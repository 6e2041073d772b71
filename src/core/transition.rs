//! Declared transitions and the adjacency table derived from them.

use super::state::{AnyState, State};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A legal move from `source` to `destination`.
///
/// Bidirectional transitions also allow the reverse move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition<S> {
    pub source: S,
    pub destination: S,
    pub bidirectional: bool,
}

impl<S> Transition<S> {
    /// One-way transition.
    pub fn new(source: S, destination: S) -> Self {
        Self {
            source,
            destination,
            bidirectional: false,
        }
    }

    /// Transition allowed in both directions.
    pub fn bidirectional(source: S, destination: S) -> Self {
        Self {
            source,
            destination,
            bidirectional: true,
        }
    }
}

impl<S: State> Transition<S> {
    pub fn erase(&self) -> Transition<AnyState> {
        Transition {
            source: AnyState::of(self.source),
            destination: AnyState::of(self.destination),
            bidirectional: self.bidirectional,
        }
    }
}

/// Directed adjacency map: state → states reachable in one move.
///
/// Built once from a declared transition list and read-only afterwards.
///
/// ```rust
/// use statecast::core::{AnyState, Transition, TransitionTable};
/// use statecast::state_enum;
///
/// state_enum! {
///     enum Phase { Solid, Liquid, Gas }
/// }
///
/// let table = TransitionTable::build(&[
///     Transition::bidirectional(Phase::Liquid, Phase::Solid).erase(),
///     Transition::new(Phase::Liquid, Phase::Gas).erase(),
/// ]);
///
/// let liquid = AnyState::of(Phase::Liquid);
/// assert!(table.allows(&AnyState::of(Phase::Solid), &liquid));
/// assert!(table.allows(&liquid, &AnyState::of(Phase::Gas)));
/// assert!(!table.allows(&AnyState::of(Phase::Gas), &liquid));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionTable {
    edges: HashMap<AnyState, HashSet<AnyState>>,
}

impl TransitionTable {
    pub fn build<'a>(transitions: impl IntoIterator<Item = &'a Transition<AnyState>>) -> Self {
        let mut edges: HashMap<AnyState, HashSet<AnyState>> = HashMap::new();
        for transition in transitions {
            edges
                .entry(transition.source)
                .or_default()
                .insert(transition.destination);
            if transition.bidirectional {
                edges
                    .entry(transition.destination)
                    .or_default()
                    .insert(transition.source);
            }
        }
        Self { edges }
    }

    /// Whether `to` is reachable from `from` in one move.
    pub fn allows(&self, from: &AnyState, to: &AnyState) -> bool {
        self.edges
            .get(from)
            .is_some_and(|targets| targets.contains(to))
    }

    pub fn reachable_from(&self, from: &AnyState) -> impl Iterator<Item = &AnyState> {
        self.edges.get(from).into_iter().flatten()
    }

    /// Number of directed edges.
    pub fn len(&self) -> usize {
        self.edges.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
