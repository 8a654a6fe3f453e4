//! Iterative depth-first and breadth-first walks.
//!
//! Both walks share one frontier of `(depth, node)` frames. Children are
//! pushed in child order; depth-first takes frames from the back (the most
//! recently attached child comes next), breadth-first from the front. No
//! recursion is involved, so walk depth is bounded by memory only.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::errors::{TreeError, TreeResult};
use crate::forest::Forest;
use crate::node::NodeId;
use crate::view::NodeRef;

/// Visiting order for walks and maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    #[default]
    #[serde(alias = "depth")]
    #[value(alias = "depth")]
    DepthFirst,
    #[serde(alias = "breadth")]
    #[value(alias = "breadth")]
    BreadthFirst,
}

impl Order {
    pub(crate) fn next<T>(self, frontier: &mut VecDeque<T>) -> Option<T> {
        match self {
            Order::DepthFirst => frontier.pop_back(),
            Order::BreadthFirst => frontier.pop_front(),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::DepthFirst => write!(f, "depth-first"),
            Order::BreadthFirst => write!(f, "breadth-first"),
        }
    }
}

impl FromStr for Order {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "depth-first" | "depth_first" | "depth" => Ok(Order::DepthFirst),
            "breadth-first" | "breadth_first" | "breadth" => Ok(Order::BreadthFirst),
            other => Err(TreeError::InvalidArgument(format!(
                "unknown order '{}', expected depth-first or breadth-first",
                other
            ))),
        }
    }
}

impl<A> Forest<A> {
    /// Visits `start` and every node below it in `order`.
    ///
    /// The visitor receives the caller's context, the depth relative to
    /// `start` (which is 0) and a read-only view of the node. A visitor error
    /// stops the walk immediately.
    #[instrument(level = "trace", skip(self, context, visit))]
    pub fn try_walk<T, E, F>(
        &self,
        start: NodeId,
        order: Order,
        context: &mut T,
        mut visit: F,
    ) -> Result<(), E>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> Result<(), E>,
        E: From<TreeError>,
    {
        let start = self.resolve(start)?;
        let mut frontier = VecDeque::new();
        frontier.push_back((0usize, start));

        let mut visited = 0usize;
        while let Some((depth, index)) = order.next(&mut frontier) {
            let node = self.view(index)?;
            visit(context, depth, node)?;
            visited += 1;
            frontier.extend(node.child_indices().map(|child| (depth + 1, child)));
        }
        trace!("{} walk visited {} nodes", order, visited);
        Ok(())
    }

    pub fn walk<T, F>(
        &self,
        start: NodeId,
        order: Order,
        context: &mut T,
        mut visit: F,
    ) -> TreeResult<()>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>),
    {
        self.try_walk(start, order, context, |context, depth, node| {
            visit(context, depth, node);
            Ok::<(), TreeError>(())
        })
    }

    pub fn for_each_depth_first<T, F>(
        &self,
        start: NodeId,
        context: &mut T,
        visit: F,
    ) -> TreeResult<()>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>),
    {
        self.walk(start, Order::DepthFirst, context, visit)
    }

    pub fn for_each_breadth_first<T, F>(
        &self,
        start: NodeId,
        context: &mut T,
        visit: F,
    ) -> TreeResult<()>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>),
    {
        self.walk(start, Order::BreadthFirst, context, visit)
    }

    pub fn try_for_each_depth_first<T, E, F>(
        &self,
        start: NodeId,
        context: &mut T,
        visit: F,
    ) -> Result<(), E>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> Result<(), E>,
        E: From<TreeError>,
    {
        self.try_walk(start, Order::DepthFirst, context, visit)
    }

    pub fn try_for_each_breadth_first<T, E, F>(
        &self,
        start: NodeId,
        context: &mut T,
        visit: F,
    ) -> Result<(), E>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> Result<(), E>,
        E: From<TreeError>,
    {
        self.try_walk(start, Order::BreadthFirst, context, visit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("depth-first", Order::DepthFirst)]
    #[case("depth", Order::DepthFirst)]
    #[case("Breadth-First", Order::BreadthFirst)]
    #[case(" breadth ", Order::BreadthFirst)]
    fn given_order_name_when_parsed_then_matches(#[case] input: &str, #[case] expected: Order) {
        assert_eq!(input.parse::<Order>().unwrap(), expected);
    }

    #[test]
    fn given_unknown_order_when_parsed_then_invalid_argument() {
        assert!(matches!(
            "sideways".parse::<Order>(),
            Err(TreeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn given_single_node_when_walked_then_visited_once_at_depth_zero() {
        let mut forest = Forest::new();
        let n = forest.create(7);

        let mut seen = Vec::new();
        forest
            .for_each_breadth_first(n, &mut seen, |seen, depth, node| {
                seen.push((depth, *node.value()))
            })
            .unwrap();

        assert_eq!(seen, vec![(0, 7)]);
    }
}
