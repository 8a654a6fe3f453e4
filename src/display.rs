use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::forest::Forest;
use crate::node::NodeId;

pub trait TreeConvert {
    /// Renders the subtree below `root` as a `termtree` for printing.
    fn to_tree_string(&self, root: NodeId) -> TreeResult<Tree<String>>;
}

impl<A: Display> TreeConvert for Forest<A> {
    /// Built bottom-up in post-order with an explicit stack: a node is emitted
    /// after all of its children, whose finished subtrees sit on top of `built`
    /// in child order.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, root: NodeId) -> TreeResult<Tree<String>> {
        let root = self.resolve(root)?;
        let mut stack = vec![(root, false)];
        let mut built: Vec<Tree<String>> = Vec::new();

        while let Some((index, expanded)) = stack.pop() {
            let node = self.entry(index)?;
            if expanded {
                let first_leaf = built.len().checked_sub(node.children.len()).ok_or_else(|| {
                    TreeError::Internal("post-order stack underflow while rendering".into())
                })?;
                let leaves = built.split_off(first_leaf);
                built.push(Tree::new(node.value.to_string()).with_leaves(leaves));
            } else {
                stack.push((index, true));
                for &child in node.children.iter().rev() {
                    stack.push((child, false));
                }
            }
        }

        built
            .pop()
            .ok_or_else(|| TreeError::Internal("rendering produced no root".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // root
    // ├── child1
    // │   └── grandchild1
    // └── child2
    #[test]
    fn given_tree_when_rendered_then_children_in_order() {
        let mut forest = Forest::new();
        let root = forest.create("root");
        let child1 = forest.create("child1");
        let child2 = forest.create("child2");
        let grandchild1 = forest.create("grandchild1");
        forest.child_add(root, child1).unwrap();
        forest.child_add(root, child2).unwrap();
        forest.child_add(child1, grandchild1).unwrap();

        let rendered = forest.to_tree_string(root).unwrap().to_string();
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "root");
        assert!(lines[1].ends_with("child1"));
        assert!(lines[2].ends_with("grandchild1"));
        assert!(lines[3].ends_with("child2"));
    }

    #[test]
    fn given_deep_chain_when_rendered_then_no_recursion_limit() {
        let mut forest = Forest::new();
        let root = forest.create(0);
        let mut parent = root;
        for i in 1..1_000 {
            let child = forest.create(i);
            forest.child_add(parent, child).unwrap();
            parent = child;
        }

        let tree = forest.to_tree_string(root).unwrap();
        assert_eq!(tree.root, "0");
        assert_eq!(tree.leaves.len(), 1);
    }
}
