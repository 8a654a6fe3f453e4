use std::fmt;

use generational_arena::Index;

use crate::policy::NodePolicy;

/// Handle to a node stored in a [`Forest`](crate::Forest).
///
/// Handles are cheap to copy and never keep a node alive. A handle carries the
/// identity of the forest that issued it, so passing it to another forest is
/// rejected instead of silently addressing an unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) forest: u64,
    pub(crate) index: Index,
}

impl NodeId {
    pub(crate) fn new(forest: u64, index: Index) -> Self {
        Self { forest, index }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.index.into_raw_parts();
        write!(f, "f{}/n{}.{}", self.forest, slot, generation)
    }
}

/// Tree node in the arena-based hierarchy structure.
pub(crate) struct Node<A> {
    /// Payload, fixed for the node's lifetime
    pub(crate) value: A,
    /// Index of the parent node in the arena, None for root nodes
    pub(crate) parent: Option<Index>,
    /// Indices of child nodes in the arena, in child order
    pub(crate) children: Vec<Index>,
    /// Consulted before the node changes parent
    pub(crate) policy: Box<dyn NodePolicy>,
}

impl<A> Node<A> {
    pub(crate) fn new(value: A, policy: Box<dyn NodePolicy>) -> Self {
        Self {
            value,
            parent: None,
            children: Vec::new(),
            policy,
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Node<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}
