use crate::search::{Cost, NodeId};
use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

/// Verdict of [`ReachedTable::reconcile`] on a freshly generated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The state has not been reached before
    New,
    /// The node is strictly cheaper than the best known path. `reopened` is
    /// set when the state had already been expanded.
    Improved { reopened: bool },
    /// The node is no better than the best known path and should be dropped
    Ignored,
}

/// Maps every state seen during a search to the cheapest node found for it,
/// and remembers which states have been expanded (closed).
///
/// After [`ReachedTable::reconcile`] accepts a candidate the caller creates
/// the node and must call [`ReachedTable::record`] before generating
/// anything else.
#[derive(Debug)]
pub struct ReachedTable<S>
where
    S: Eq + Hash,
{
    best: HashMap<S, (NodeId, Cost)>,
    closed: HashSet<S>,
}

impl<S> Default for ReachedTable<S>
where
    S: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ReachedTable<S>
where
    S: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            best: HashMap::new(),
            closed: HashSet::new(),
        }
    }

    /// Compare a candidate path to `state` with the best known one. Paths are
    /// ranked by cost, or by depth when searching breadth-first. A strict
    /// improvement on a closed state reopens it.
    pub fn reconcile(&mut self, state: &S, rank: Cost) -> Reconciliation {
        match self.best.get(state) {
            None => Reconciliation::New,
            Some(&(_, best)) if rank < best => {
                let reopened = self.closed.remove(state);
                Reconciliation::Improved { reopened }
            }
            Some(_) => Reconciliation::Ignored,
        }
    }

    /// Make `node_id` the best node of `state`.
    pub fn record(&mut self, state: S, node_id: NodeId, rank: Cost) {
        self.best.insert(state, (node_id, rank));
    }

    /// A popped node is stale when a cheaper node for its state has been
    /// recorded since it was pushed, or when its state is already closed.
    pub fn is_stale(&self, state: &S, node_id: NodeId) -> bool {
        match self.best.get(state) {
            Some(&(best_id, _)) => best_id != node_id || self.closed.contains(state),
            None => true,
        }
    }

    pub fn close(&mut self, state: S) {
        self.closed.insert(state);
    }
}
