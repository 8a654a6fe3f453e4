use std::cmp::Ordering;

use tracing::{instrument, trace};

use crate::errors::TreeResult;
use crate::forest::Forest;
use crate::node::NodeId;
use crate::view::NodeRef;

impl<A> Forest<A> {
    /// Reorders the children of `node` with a comparator over child views.
    ///
    /// Stable. Only the order changes; membership and parent links stay as
    /// they are. The new order is computed on a copy and committed at the end,
    /// so a panicking comparator leaves the original order in place.
    #[instrument(level = "debug", skip(self, compare))]
    pub fn sort_children_by<F>(&mut self, node: NodeId, mut compare: F) -> TreeResult<()>
    where
        F: FnMut(NodeRef<'_, A>, NodeRef<'_, A>) -> Ordering,
    {
        let index = self.resolve(node)?;
        let mut order = self.entry(index)?.children.clone();

        let forest = &*self;
        let mut failure = None;
        order.sort_by(|&a, &b| match (forest.view(a), forest.view(b)) {
            (Ok(a), Ok(b)) => compare(a, b),
            (Err(err), _) | (_, Err(err)) => {
                failure.get_or_insert(err);
                Ordering::Equal
            }
        });
        if let Some(err) = failure {
            return Err(err);
        }

        trace!("sorted {} children of {}", order.len(), node);
        self.entry_mut(index)?.children = order;
        Ok(())
    }

    /// Reorders the children of `node` by comparing their values.
    pub fn sort_children_by_value<F>(&mut self, node: NodeId, mut compare: F) -> TreeResult<()>
    where
        F: FnMut(&A, &A) -> Ordering,
    {
        self.sort_children_by(node, |a, b| compare(a.value(), b.value()))
    }
}

impl<A: Ord> Forest<A> {
    /// Sorts the children of `node` ascending by value.
    pub fn sort_children(&mut self, node: NodeId) -> TreeResult<()> {
        self.sort_children_by_value(node, |a, b| a.cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_equal_keys_when_sorted_then_original_order_kept() {
        let mut forest = Forest::new();
        let root = forest.create((0, 'r'));
        let ids: Vec<_> = [(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')]
            .into_iter()
            .map(|v| forest.create(v))
            .collect();
        for &id in &ids {
            forest.child_add(root, id).unwrap();
        }

        forest
            .sort_children_by_value(root, |a, b| a.0.cmp(&b.0))
            .unwrap();

        let tags: Vec<_> = forest
            .children(root)
            .unwrap()
            .map(|id| forest.value(id).unwrap().1)
            .collect();
        assert_eq!(tags, vec!['b', 'd', 'a', 'c']);
        for &id in &ids {
            assert_eq!(forest.parent(id).unwrap(), Some(root));
        }
    }

    #[test]
    fn given_node_comparator_when_sorted_by_child_count_then_reordered() {
        let mut forest = Forest::new();
        let root = forest.create("root");
        let busy = forest.create("busy");
        let idle = forest.create("idle");
        let leaf = forest.create("leaf");
        forest.child_add(root, busy).unwrap();
        forest.child_add(root, idle).unwrap();
        forest.child_add(busy, leaf).unwrap();

        forest
            .sort_children_by(root, |a, b| a.child_count().cmp(&b.child_count()))
            .unwrap();

        assert_eq!(forest.children(root).unwrap().collect::<Vec<_>>(), vec![idle, busy]);
    }
}
