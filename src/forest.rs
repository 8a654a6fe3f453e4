use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use crate::errors::{TreeError, TreeResult};
use crate::node::{Node, NodeId};
use crate::policy::{AlwaysDetach, NodePolicy};
use crate::view::{NodeMut, NodeRef};

static NEXT_FOREST_ID: AtomicU64 = AtomicU64::new(1);

/// Arena owning a set of trees.
///
/// Every node lives in the arena; parents refer to their children by index and
/// children refer back to their parent by index, so no node ever owns its
/// parent. Nodes start out as standalone roots and are arranged into trees
/// through the mutation engine (`set_parent`, `child_add`, `child_remove`,
/// `detach`).
#[derive(Debug)]
pub struct Forest<A> {
    id: u64,
    pub(crate) arena: Arena<Node<A>>,
}

impl<A> Default for Forest<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Forest<A> {
    pub fn new() -> Self {
        Self::with_capacity(8)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: NEXT_FOREST_ID.fetch_add(1, Ordering::Relaxed),
            arena: Arena::with_capacity(capacity),
        }
    }

    /// Creates a standalone node whose detachment is always permitted.
    pub fn create(&mut self, value: A) -> NodeId {
        self.create_with_policy(value, AlwaysDetach)
    }

    /// Creates a standalone node guarded by a detach predicate.
    ///
    /// The predicate runs before every attempt to remove the node from its
    /// parent, including moves to another parent.
    pub fn create_with_detach_policy<F>(&mut self, value: A, allow_detach: F) -> NodeId
    where
        F: Fn() -> bool + 'static,
    {
        self.create_with_policy(value, allow_detach)
    }

    #[instrument(level = "trace", skip(self, value, policy))]
    pub fn create_with_policy<P>(&mut self, value: A, policy: P) -> NodeId
    where
        P: NodePolicy + 'static,
    {
        let index = self.arena.insert(Node::new(value, Box::new(policy)));
        let id = self.id_of(index);
        trace!("created node {}", id);
        id
    }

    /// Number of live nodes across all trees in the forest.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.resolve(id).is_ok()
    }

    /// Nodes without a parent, in arena order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arena
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(index, _)| self.id_of(index))
    }

    pub fn value(&self, id: NodeId) -> TreeResult<&A> {
        Ok(&self.entry(self.resolve(id)?)?.value)
    }

    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        let node = self.entry(self.resolve(id)?)?;
        Ok(node.parent.map(|index| self.id_of(index)))
    }

    /// Children of `id` in their current order.
    pub fn children(&self, id: NodeId) -> TreeResult<impl ExactSizeIterator<Item = NodeId> + '_> {
        let node = self.entry(self.resolve(id)?)?;
        Ok(node.children.iter().map(move |&index| self.id_of(index)))
    }

    pub fn is_root(&self, id: NodeId) -> TreeResult<bool> {
        Ok(self.entry(self.resolve(id)?)?.parent.is_none())
    }

    /// Asks the detach policy of `id` whether it may leave its parent now.
    ///
    /// The policy is evaluated on every call. A failing policy is reported as
    /// [`TreeError::Collaborator`].
    pub fn is_detach_allowed(&self, id: NodeId) -> TreeResult<bool> {
        Ok(self.entry(self.resolve(id)?)?.policy.allow_detach()?)
    }

    /// Read-only view of a node.
    pub fn node(&self, id: NodeId) -> TreeResult<NodeRef<'_, A>> {
        self.view(self.resolve(id)?)
    }

    /// Mutable view of a node.
    pub fn node_mut(&mut self, id: NodeId) -> TreeResult<NodeMut<'_, A>> {
        self.resolve(id)?;
        Ok(NodeMut::new(self, id))
    }

    /// Detaches `id` from its parent and frees it together with all of its
    /// descendants.
    ///
    /// Detachment goes through the mutation engine, so a denying detach policy
    /// aborts the removal with nothing freed. Returns the number of freed nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_subtree(&mut self, id: NodeId) -> TreeResult<usize> {
        let root = self.resolve(id)?;
        self.detach(id)?;

        let mut stack = vec![root];
        let mut removed = 0;
        while let Some(index) = stack.pop() {
            if let Some(node) = self.arena.remove(index) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        debug!("removed {} nodes below {}", removed, id);
        Ok(removed)
    }

    /// Maps a handle to its arena index, rejecting handles from other forests
    /// and handles whose node has been removed.
    pub(crate) fn resolve(&self, id: NodeId) -> TreeResult<Index> {
        if id.forest != self.id {
            return Err(TreeError::ForeignNode(id));
        }
        if !self.arena.contains(id.index) {
            return Err(TreeError::NodeNotFound(id));
        }
        Ok(id.index)
    }

    pub(crate) fn id_of(&self, index: Index) -> NodeId {
        NodeId::new(self.id, index)
    }

    pub(crate) fn entry(&self, index: Index) -> TreeResult<&Node<A>> {
        self.arena
            .get(index)
            .ok_or_else(|| dangling(self.id_of(index)))
    }

    pub(crate) fn entry_mut(&mut self, index: Index) -> TreeResult<&mut Node<A>> {
        let id = self.id_of(index);
        self.arena.get_mut(index).ok_or_else(|| dangling(id))
    }

    pub(crate) fn view(&self, index: Index) -> TreeResult<NodeRef<'_, A>> {
        let node = self.entry(index)?;
        Ok(NodeRef::new(self, index, node))
    }
}

fn dangling(id: NodeId) -> TreeError {
    TreeError::Internal(format!("dangling node index {}", id))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn given_new_node_when_created_then_is_standalone_root() {
        let mut forest = Forest::new();
        let n = forest.create(1);

        assert!(forest.is_root(n).unwrap());
        assert_eq!(forest.parent(n).unwrap(), None);
        assert_eq!(forest.children(n).unwrap().len(), 0);
        assert_eq!(*forest.value(n).unwrap(), 1);
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn given_handle_from_other_forest_when_resolved_then_foreign_node() {
        let mut a = Forest::new();
        let mut b: Forest<i32> = Forest::new();
        let n = a.create(1);
        b.create(2);

        assert!(matches!(b.value(n), Err(TreeError::ForeignNode(id)) if id == n));
    }

    #[test]
    fn given_policy_flag_when_toggled_then_detach_allowed_follows_fresh_answer() {
        let mut forest = Forest::new();
        let allowed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&allowed);
        let pinned = forest.create_with_detach_policy(1, move || flag.get());
        let free = forest.create(2);

        assert!(!forest.is_detach_allowed(pinned).unwrap());
        assert!(!forest.node(pinned).unwrap().is_detach_allowed().unwrap());
        allowed.set(true);
        assert!(forest.is_detach_allowed(pinned).unwrap());
        assert!(forest.node(pinned).unwrap().is_detach_allowed().unwrap());
        assert!(forest.is_detach_allowed(free).unwrap());
    }

    #[test]
    fn given_roots_and_children_when_listing_roots_then_only_parentless() {
        let mut forest = Forest::new();
        let r0 = forest.create("r0");
        let r1 = forest.create("r1");
        let c = forest.create("c");
        forest.child_add(r0, c).unwrap();

        let roots: Vec<_> = forest.roots().collect();
        assert_eq!(roots.len(), 2);
        assert!(roots.contains(&r0));
        assert!(roots.contains(&r1));
    }

    #[test]
    fn given_subtree_when_removed_then_frees_all_descendants_only() {
        let mut forest = Forest::new();
        let root = forest.create(0);
        let keep = forest.create(1);
        let drop = forest.create(2);
        let grandchild = forest.create(3);
        forest.child_add(root, keep).unwrap();
        forest.child_add(root, drop).unwrap();
        forest.child_add(drop, grandchild).unwrap();

        assert_eq!(forest.remove_subtree(drop).unwrap(), 2);

        assert_eq!(forest.len(), 2);
        assert!(!forest.contains(drop));
        assert!(!forest.contains(grandchild));
        assert_eq!(forest.children(root).unwrap().collect::<Vec<_>>(), vec![keep]);
        assert!(matches!(forest.value(drop), Err(TreeError::NodeNotFound(_))));
    }

    #[test]
    fn given_denying_policy_when_removing_subtree_then_nothing_freed() {
        let mut forest = Forest::new();
        let root = forest.create(0);
        let pinned = forest.create_with_detach_policy(1, || false);
        forest.child_add(root, pinned).unwrap();

        assert!(matches!(
            forest.remove_subtree(pinned),
            Err(TreeError::DetachDenied(id)) if id == pinned
        ));
        assert_eq!(forest.len(), 2);
        assert_eq!(forest.parent(pinned).unwrap(), Some(root));
    }
}
