use crate::search::Cost;

/// Index of a node in a [`crate::search::SearchSpace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline(always)]
    pub fn id(&self) -> usize {
        self.0
    }
}

/// Parent id of the root node.
pub const NO_NODE: NodeId = NodeId(usize::MAX);

/// A [`SearchNode`] records how a state was reached: the parent node, the
/// action taken from it and the accumulated path cost. Nodes never change
/// once created. A cheaper route to the same state produces a new node, and
/// the old one simply becomes stale.
#[derive(Debug, Clone)]
pub struct SearchNode<A> {
    /// Unique identifier of the node
    node_id: NodeId,
    /// Parent node, [`NO_NODE`] for the root
    parent_id: NodeId,
    /// Action that led to this node, `None` for the root
    action: Option<A>,
    /// G-value of the node, i.e. the cost of the path to this node
    g: Cost,
    /// Number of edges between the root and this node
    depth: usize,
}

impl<A> SearchNode<A> {
    /// Create a new search node with no parent. This should only be used for
    /// the root node of the search space. For non-root nodes see
    /// [`SearchNode::new_with_parent`].
    pub fn new_without_parent(node_id: NodeId) -> Self {
        Self {
            node_id,
            parent_id: NO_NODE,
            action: None,
            g: Cost::from(0.),
            depth: 0,
        }
    }

    /// Create a new search node with a parent. This should be used for all
    /// nodes that are not the root node.
    pub fn new_with_parent(node_id: NodeId, parent: &SearchNode<A>, action: A, g: Cost) -> Self {
        Self {
            node_id,
            parent_id: parent.node_id,
            action: Some(action),
            g,
            depth: parent.depth + 1,
        }
    }

    pub fn get_node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn get_parent_id(&self) -> NodeId {
        self.parent_id
    }

    pub fn get_action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    pub fn get_g(&self) -> Cost {
        self.g
    }

    pub fn get_depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.parent_id == NO_NODE
    }
}
