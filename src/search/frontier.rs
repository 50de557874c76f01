//! The open list of the best-first engines.

use crate::search::{Cost, NodeId};
use priority_queue::PriorityQueue;
use std::cmp::Reverse;

/// A min-priority queue of node ids keyed by f-value. Equal keys are popped
/// in insertion order, which makes expansion order reproducible.
///
/// Entries are never removed or re-keyed: when a cheaper node for a state
/// shows up it is pushed as a new entry and the old one goes stale. Callers
/// detect stale entries when popping them.
#[derive(Debug)]
pub struct Frontier {
    queue: PriorityQueue<NodeId, Reverse<(Cost, u64)>>,
    counter: u64,
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontier {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
            counter: 0,
        }
    }

    pub fn push(&mut self, node_id: NodeId, key: Cost) {
        self.queue.push(node_id, Reverse((key, self.counter)));
        self.counter += 1;
    }

    /// Remove the entry with the smallest key, returning the node and its key.
    pub fn pop_min(&mut self) -> Option<(NodeId, Cost)> {
        self.queue
            .pop()
            .map(|(node_id, Reverse((key, _)))| (node_id, key))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_key_order() {
        let mut frontier = Frontier::new();
        frontier.push(NodeId::new(0), 3.0.into());
        frontier.push(NodeId::new(1), 1.0.into());
        frontier.push(NodeId::new(2), 2.0.into());

        assert_eq!(frontier.pop_min(), Some((NodeId::new(1), 1.0.into())));
        assert_eq!(frontier.pop_min(), Some((NodeId::new(2), 2.0.into())));
        assert_eq!(frontier.pop_min(), Some((NodeId::new(0), 3.0.into())));
        assert_eq!(frontier.pop_min(), None);
    }

    #[test]
    fn ties_are_broken_by_insertion_order() {
        let mut frontier = Frontier::new();
        for index in [4, 2, 7, 0] {
            frontier.push(NodeId::new(index), 5.0.into());
        }
        let order: Vec<usize> = std::iter::from_fn(|| frontier.pop_min())
            .map(|(node_id, _)| node_id.id())
            .collect();
        assert_eq!(order, vec![4, 2, 7, 0]);
    }
}
