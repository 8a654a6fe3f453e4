//! Mutation engine: the only code that changes parent/child links.
//!
//! `set_parent`, `child_add`, `child_insert`, `child_remove` and `detach` are
//! thin entry points. All of them funnel into [`Forest::relocate`], which
//! unlinks a node from its current parent and links it under the new one as a
//! single sequence with explicit rollback:
//!
//! 1. validate handles and reject cycles (nothing touched yet)
//! 2. consult the node's detach policy and the old parent's `release_child`
//!    hook, then unlink; a failure here leaves the tree untouched
//! 3. consult the new parent's `accept_child` and the node's `accept_parent`
//!    hooks; a failure relinks the node at its old position
//! 4. link under the new parent
//!
//! After any error the tree is exactly as it was before the call.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::errors::{TreeError, TreeResult};
use crate::forest::Forest;
use crate::node::NodeId;

/// Position a node takes in its new parent's child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Last,
    At(usize),
}

impl<A> Forest<A> {
    /// Makes `parent` the parent of `node`, moving it out of its current
    /// parent if it has one. The node is appended to the new parent's children.
    ///
    /// Fails with [`TreeError::Cycle`] if `parent` is `node` or one of its
    /// descendants, and with [`TreeError::DetachDenied`] if `node` already has
    /// a parent and its detach policy refuses.
    #[instrument(level = "debug", skip(self))]
    pub fn set_parent(&mut self, node: NodeId, parent: NodeId) -> TreeResult<()> {
        self.attach(node, parent, Slot::Last)
    }

    /// Appends `child` to the children of `parent`.
    ///
    /// Re-adding a node that already is a child of `parent` detaches it (its
    /// policy is consulted) and moves it to the end of the list.
    #[instrument(level = "debug", skip(self))]
    pub fn child_add(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.attach(child, parent, Slot::Last)
    }

    /// Like [`child_add`](Self::child_add), but places `child` at `index` in the
    /// child list of `parent`. The index is taken after `child` has left its
    /// old position; indices past the end append.
    #[instrument(level = "debug", skip(self))]
    pub fn child_insert(&mut self, parent: NodeId, index: usize, child: NodeId) -> TreeResult<()> {
        self.attach(child, parent, Slot::At(index))
    }

    /// Removes `child` from the children of `parent`, leaving it a root.
    #[instrument(level = "debug", skip(self))]
    pub fn child_remove(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        let p = self.resolve(parent)?;
        let c = self.resolve(child)?;
        if self.entry(c)?.parent != Some(p) {
            return Err(TreeError::NotAChild { parent, child });
        }
        self.relocate(c, None)
    }

    /// Removes `node` from its parent. A node without a parent is left alone.
    #[instrument(level = "debug", skip(self))]
    pub fn detach(&mut self, node: NodeId) -> TreeResult<()> {
        let n = self.resolve(node)?;
        if self.entry(n)?.parent.is_none() {
            trace!("{} has no parent", node);
            return Ok(());
        }
        self.relocate(n, None)
    }

    fn attach(&mut self, node: NodeId, parent: NodeId, slot: Slot) -> TreeResult<()> {
        let n = self.resolve(node)?;
        let p = self.resolve(parent)?;
        if self.lineage_of(p).any(|index| index == n) {
            return Err(TreeError::Cycle { node, parent });
        }
        self.relocate(n, Some((p, slot)))
    }

    /// Moves `n` from wherever it is to `target` (or to no parent at all).
    fn relocate(&mut self, n: Index, target: Option<(Index, Slot)>) -> TreeResult<()> {
        let vacated = self.unlink(n)?;

        let Some((p, slot)) = target else {
            return Ok(());
        };

        if let Err(err) = self.admit(n, p) {
            if let Some((old, position)) = vacated {
                debug!(
                    "admission of {} refused, restoring under {}",
                    self.id_of(n),
                    self.id_of(old)
                );
                self.link(n, old, Slot::At(position))?;
            }
            return Err(err);
        }

        self.link(n, p, slot)?;
        debug!("{} is now a child of {}", self.id_of(n), self.id_of(p));
        Ok(())
    }

    /// Unlinks `n` from its parent, returning the old parent and the position
    /// `n` held there.
    fn unlink(&mut self, n: Index) -> TreeResult<Option<(Index, usize)>> {
        let Some(old) = self.entry(n)?.parent else {
            return Ok(None);
        };
        let node_id = self.id_of(n);
        let parent_id = self.id_of(old);

        if !self.entry(n)?.policy.allow_detach()? {
            debug!("detach policy of {} refused", node_id);
            return Err(TreeError::DetachDenied(node_id));
        }
        self.entry(old)?.policy.release_child(node_id)?;

        let siblings = &mut self.entry_mut(old)?.children;
        let position = siblings
            .iter()
            .position(|&c| c == n)
            .ok_or_else(|| {
                TreeError::Internal(format!(
                    "{} names {} as parent but is not among its children",
                    node_id, parent_id
                ))
            })?;
        siblings.remove(position);
        self.entry_mut(n)?.parent = None;

        trace!("unlinked {} from {} at {}", node_id, parent_id, position);
        Ok(Some((old, position)))
    }

    fn admit(&self, n: Index, p: Index) -> TreeResult<()> {
        self.entry(p)?.policy.accept_child(self.id_of(n))?;
        self.entry(n)?.policy.accept_parent(self.id_of(p))?;
        Ok(())
    }

    fn link(&mut self, n: Index, p: Index, slot: Slot) -> TreeResult<()> {
        let children = &mut self.entry_mut(p)?.children;
        match slot {
            Slot::Last => children.push(n),
            Slot::At(position) => children.insert(position.min(children.len()), n),
        }
        self.entry_mut(n)?.parent = Some(p);
        Ok(())
    }
}
