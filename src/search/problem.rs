//! The [`Problem`] trait is the contract between the search engines and a
//! concrete domain. Engines never look inside states or actions, they only
//! ask the problem for successors, goal membership and edge weights.

use ordered_float::OrderedFloat;
use std::{fmt::Debug, hash::Hash};

/// Accumulated path cost (and f-values derived from it).
pub type Cost = OrderedFloat<f64>;

/// Cost reported when no path exists.
pub const UNREACHABLE: Cost = OrderedFloat(f64::INFINITY);

pub trait Problem {
    /// A configuration of the state space. Equality and hashing must agree.
    type State: Clone + Eq + Hash + Debug;
    /// A label for a transition, only used to report the solution.
    type Action: Clone + Debug;

    fn initial_state(&self) -> Self::State;

    /// Actions applicable in `state`. The order must be deterministic, it
    /// decides tie-breaking between otherwise equal nodes.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    fn result(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// A fixed goal state, if the problem has one. Only consulted by the
    /// default [`Problem::is_goal`].
    fn goal(&self) -> Option<&Self::State> {
        None
    }

    fn is_goal(&self, state: &Self::State) -> bool {
        self.goal().is_some_and(|goal| goal == state)
    }

    /// Cost of taking `action` in `state`, arriving in `next`. Defaults to
    /// unit cost. Must be non-negative, the engines reject anything else.
    fn action_cost(&self, _state: &Self::State, _action: &Self::Action, _next: &Self::State) -> f64 {
        1.
    }
}
