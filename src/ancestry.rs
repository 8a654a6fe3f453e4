//! Ancestor walks: cycle detection for the mutation engine and depth queries.

use std::iter;

use generational_arena::Index;

use crate::errors::TreeResult;
use crate::forest::Forest;
use crate::node::NodeId;

impl<A> Forest<A> {
    /// Yields `node`, then its parent, then its grandparent, up to the root.
    pub fn lineage(&self, node: NodeId) -> TreeResult<impl Iterator<Item = NodeId> + '_> {
        let start = self.resolve(node)?;
        Ok(self.lineage_of(start).map(move |index| self.id_of(index)))
    }

    /// True if `other` is `node` or one of its ancestors.
    ///
    /// Every node is a descendant of itself; `set_parent` relies on this to
    /// reject self-parenting as a cycle.
    pub fn is_descendant_of(&self, node: NodeId, other: NodeId) -> TreeResult<bool> {
        let start = self.resolve(node)?;
        let target = self.resolve(other)?;
        Ok(self.lineage_of(start).any(|index| index == target))
    }

    /// Number of parent links between `node` and its root.
    pub fn depth_of(&self, node: NodeId) -> TreeResult<usize> {
        Ok(self.lineage(node)?.count() - 1)
    }

    pub(crate) fn lineage_of(&self, start: Index) -> impl Iterator<Item = Index> + '_ {
        iter::successors(Some(start), move |&index| {
            self.arena.get(index).and_then(|node| node.parent)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::forest::Forest;

    #[test]
    fn given_any_node_when_checking_self_then_descendant() {
        let mut forest = Forest::new();
        let n = forest.create(0);
        assert!(forest.is_descendant_of(n, n).unwrap());
    }

    #[test]
    fn given_unrelated_nodes_when_checking_then_neither_descends() {
        let mut forest = Forest::new();
        let a = forest.create(0);
        let b = forest.create(1);
        assert!(!forest.is_descendant_of(a, b).unwrap());
        assert!(!forest.is_descendant_of(b, a).unwrap());
    }

    #[test]
    fn given_chain_when_walking_lineage_then_yields_self_to_root() {
        let mut forest = Forest::new();
        let root = forest.create(0);
        let mid = forest.create(1);
        let leaf = forest.create(2);
        forest.child_add(root, mid).unwrap();
        forest.child_add(mid, leaf).unwrap();

        let lineage: Vec<_> = forest.lineage(leaf).unwrap().collect();
        assert_eq!(lineage, vec![leaf, mid, root]);
        assert_eq!(forest.depth_of(leaf).unwrap(), 2);
        assert_eq!(forest.depth_of(root).unwrap(), 0);
        assert!(forest.is_descendant_of(leaf, root).unwrap());
        assert!(!forest.is_descendant_of(root, leaf).unwrap());
    }
}
