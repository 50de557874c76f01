use crate::search::{Cost, NodeId, SearchNode, NO_NODE};
use segvec::{Linear, SegVec};

/// A [`SearchSpace`] is the arena holding every node created during one
/// search, together with the state each node stands for. Parents are stored
/// as indices into the arena, so a node can be looked up long after its
/// frontier entry is gone.
#[derive(Debug)]
pub struct SearchSpace<S, A> {
    root_node_id: NodeId,
    nodes: SegVec<SearchNode<A>, Linear>,
    states: SegVec<S, Linear>,
}

impl<S, A> SearchSpace<S, A> {
    pub fn new(initial_state: S) -> Self {
        let mut nodes = SegVec::new();
        let mut states = SegVec::new();

        let root_node_id = NodeId::new(0);
        nodes.push(SearchNode::new_without_parent(root_node_id));
        states.push(initial_state);

        Self {
            root_node_id,
            nodes,
            states,
        }
    }

    /// Append a child of `parent_id` and return its id.
    pub fn insert_node(&mut self, state: S, action: A, parent_id: NodeId, g: Cost) -> NodeId {
        let node_id = NodeId::new(self.nodes.len());
        let node = SearchNode::new_with_parent(node_id, self.get_node(parent_id), action, g);
        self.nodes.push(node);
        self.states.push(state);
        node_id
    }

    #[inline(always)]
    pub fn get_root_node(&self) -> &SearchNode<A> {
        self.get_node(self.root_node_id)
    }

    #[inline(always)]
    pub fn get_node(&self, node_id: NodeId) -> &SearchNode<A> {
        self.nodes.get(node_id.id()).expect("Invalid node id")
    }

    #[inline(always)]
    pub fn get_state(&self, node_id: NodeId) -> &S {
        self.states.get(node_id.id()).expect("Invalid node id")
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<S: Clone, A: Clone> SearchSpace<S, A> {
    /// Walk the parent links from `goal_id` back to the root, returning the
    /// visited states (root first) and the actions between them.
    pub fn extract_path(&self, goal_id: NodeId) -> (Vec<S>, Vec<A>) {
        let mut states = vec![];
        let mut actions = vec![];
        let mut current_id = goal_id;
        while current_id != NO_NODE {
            let node = self.get_node(current_id);
            states.push(self.get_state(current_id).clone());
            if let Some(action) = node.get_action() {
                actions.push(action.clone());
            }
            current_id = node.get_parent_id();
        }
        states.reverse();
        actions.reverse();
        (states, actions)
    }
}
