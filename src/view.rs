//! Capability views over a single node.
//!
//! [`NodeRef`] is the read-only capability: it can inspect a node, walk and
//! map the subtree below it, but cannot change the tree. [`NodeMut`] adds the
//! mutation engine and child sorting. Collaborators that must not restructure
//! a tree are handed `NodeRef`s only.

use std::cmp::Ordering;
use std::fmt;

use generational_arena::Index;

use crate::errors::{TreeError, TreeResult};
use crate::forest::Forest;
use crate::mapping::MappedTree;
use crate::node::{Node, NodeId};

pub struct NodeRef<'a, A> {
    forest: &'a Forest<A>,
    index: Index,
    node: &'a Node<A>,
}

impl<A> Clone for NodeRef<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for NodeRef<'_, A> {}

impl<A: fmt::Debug> fmt::Debug for NodeRef<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id())
            .field("value", &self.node.value)
            .finish()
    }
}

impl<'a, A> NodeRef<'a, A> {
    pub(crate) fn new(forest: &'a Forest<A>, index: Index, node: &'a Node<A>) -> Self {
        Self { forest, index, node }
    }

    pub fn id(&self) -> NodeId {
        self.forest.id_of(self.index)
    }

    pub fn value(&self) -> &'a A {
        &self.node.value
    }

    pub fn is_root(&self) -> bool {
        self.node.parent.is_none()
    }

    pub fn parent(&self) -> Option<NodeRef<'a, A>> {
        let forest = self.forest;
        self.node
            .parent
            .and_then(|index| forest.view(index).ok())
    }

    /// Children in their current order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, A>> + 'a {
        let forest = self.forest;
        self.node
            .children
            .iter()
            .filter_map(move |&index| forest.view(index).ok())
    }

    /// Current answer of this node's detach policy.
    pub fn is_detach_allowed(&self) -> TreeResult<bool> {
        Ok(self.node.policy.allow_detach()?)
    }

    pub fn child_count(&self) -> usize {
        self.node.children.len()
    }

    pub fn is_descendant_of(&self, other: NodeId) -> TreeResult<bool> {
        self.forest.is_descendant_of(self.id(), other)
    }

    pub fn lineage(&self) -> impl Iterator<Item = NodeId> + 'a {
        let forest = self.forest;
        forest
            .lineage_of(self.index)
            .map(move |index| forest.id_of(index))
    }

    pub fn depth(&self) -> usize {
        self.forest.lineage_of(self.index).count() - 1
    }

    pub(crate) fn child_indices(&self) -> impl Iterator<Item = Index> + 'a {
        self.node.children.iter().copied()
    }

    pub fn for_each_depth_first<T, F>(&self, context: &mut T, visit: F) -> TreeResult<()>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>),
    {
        self.forest.for_each_depth_first(self.id(), context, visit)
    }

    pub fn for_each_breadth_first<T, F>(&self, context: &mut T, visit: F) -> TreeResult<()>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>),
    {
        self.forest.for_each_breadth_first(self.id(), context, visit)
    }

    pub fn try_for_each_depth_first<T, E, F>(&self, context: &mut T, visit: F) -> Result<(), E>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> Result<(), E>,
        E: From<TreeError>,
    {
        self.forest.try_for_each_depth_first(self.id(), context, visit)
    }

    pub fn try_for_each_breadth_first<T, E, F>(&self, context: &mut T, visit: F) -> Result<(), E>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> Result<(), E>,
        E: From<TreeError>,
    {
        self.forest.try_for_each_breadth_first(self.id(), context, visit)
    }

    pub fn try_map_depth_first<T, B, E, F>(
        &self,
        context: &mut T,
        transform: F,
    ) -> Result<MappedTree<B>, E>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> Result<B, E>,
        E: From<TreeError>,
    {
        self.forest.try_map_depth_first(self.id(), context, transform)
    }

    pub fn try_map_breadth_first<T, B, E, F>(
        &self,
        context: &mut T,
        transform: F,
    ) -> Result<MappedTree<B>, E>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> Result<B, E>,
        E: From<TreeError>,
    {
        self.forest.try_map_breadth_first(self.id(), context, transform)
    }

    pub fn map_depth_first<T, B, F>(
        &self,
        context: &mut T,
        transform: F,
    ) -> TreeResult<MappedTree<B>>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> B,
    {
        self.forest.map_depth_first(self.id(), context, transform)
    }

    pub fn map_breadth_first<T, B, F>(
        &self,
        context: &mut T,
        transform: F,
    ) -> TreeResult<MappedTree<B>>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> B,
    {
        self.forest.map_breadth_first(self.id(), context, transform)
    }
}

/// Mutable capability over one node. Obtained from [`Forest::node_mut`].
pub struct NodeMut<'a, A> {
    forest: &'a mut Forest<A>,
    id: NodeId,
}

impl<'a, A> NodeMut<'a, A> {
    pub(crate) fn new(forest: &'a mut Forest<A>, id: NodeId) -> Self {
        Self { forest, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Read-only view of the same node.
    pub fn read(&self) -> TreeResult<NodeRef<'_, A>> {
        self.forest.node(self.id)
    }

    pub fn set_parent(&mut self, parent: NodeId) -> TreeResult<&mut Self> {
        self.forest.set_parent(self.id, parent)?;
        Ok(self)
    }

    pub fn child_add(&mut self, child: NodeId) -> TreeResult<&mut Self> {
        self.forest.child_add(self.id, child)?;
        Ok(self)
    }

    pub fn child_insert(&mut self, index: usize, child: NodeId) -> TreeResult<&mut Self> {
        self.forest.child_insert(self.id, index, child)?;
        Ok(self)
    }

    pub fn child_remove(&mut self, child: NodeId) -> TreeResult<&mut Self> {
        self.forest.child_remove(self.id, child)?;
        Ok(self)
    }

    pub fn detach(&mut self) -> TreeResult<&mut Self> {
        self.forest.detach(self.id)?;
        Ok(self)
    }

    pub fn sort_children_by<F>(&mut self, compare: F) -> TreeResult<&mut Self>
    where
        F: FnMut(NodeRef<'_, A>, NodeRef<'_, A>) -> Ordering,
    {
        self.forest.sort_children_by(self.id, compare)?;
        Ok(self)
    }

    pub fn sort_children_by_value<F>(&mut self, compare: F) -> TreeResult<&mut Self>
    where
        F: FnMut(&A, &A) -> Ordering,
    {
        self.forest.sort_children_by_value(self.id, compare)?;
        Ok(self)
    }
}

impl<A: Ord> NodeMut<'_, A> {
    pub fn sort_children(&mut self) -> TreeResult<&mut Self> {
        self.forest.sort_children(self.id)?;
        Ok(self)
    }
}
