//! Structure-preserving maps from one tree into a new one.
//!
//! A map walks the source in depth-first or breadth-first order, turns every
//! visited node into a value of the target type and attaches a fresh node
//! holding that value under the mapped counterpart of the source parent. The
//! result shares no nodes with the source and keeps the source's child order
//! regardless of the visiting order.

use std::collections::VecDeque;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::errors::{TreeError, TreeResult};
use crate::forest::Forest;
use crate::node::NodeId;
use crate::traversal::Order;
use crate::view::NodeRef;

/// A freshly mapped tree together with its root.
#[derive(Debug)]
pub struct MappedTree<B> {
    pub forest: Forest<B>,
    pub root: NodeId,
}

impl<B> MappedTree<B> {
    pub fn root(&self) -> TreeResult<NodeRef<'_, B>> {
        self.forest.node(self.root)
    }

    pub fn into_parts(self) -> (Forest<B>, NodeId) {
        (self.forest, self.root)
    }
}

struct MapFrame {
    depth: usize,
    source: Index,
    parent: Option<NodeId>,
}

impl<A> Forest<A> {
    /// Maps the subtree at `start` into `target`, returning the new root.
    ///
    /// If `transform` fails partway, the nodes created so far stay in
    /// `target` as a detached partial tree; remove them with
    /// [`Forest::remove_subtree`] if they are not wanted.
    #[instrument(level = "debug", skip(self, target, context, transform))]
    pub fn try_map_into<T, B, E, F>(
        &self,
        start: NodeId,
        order: Order,
        target: &mut Forest<B>,
        context: &mut T,
        mut transform: F,
    ) -> Result<NodeId, E>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> Result<B, E>,
        E: From<TreeError>,
    {
        let start = self.resolve(start)?;
        let mut filled = Vec::new();
        let mapped = self.map_frames(start, order, target, context, &mut transform, &mut filled);

        // Depth-first appends siblings last-first; flip each list once.
        if order == Order::DepthFirst {
            for parent in filled {
                target.entry_mut(target.resolve(parent)?)?.children.reverse();
            }
        }

        let (root, mapped_count) = mapped?;
        debug!("{} map produced {} nodes", order, mapped_count);
        Ok(root)
    }

    /// Runs the walk for [`Forest::try_map_into`]. Every mapped node that
    /// received children is recorded in `filled`, also when `transform` fails.
    fn map_frames<T, B, E, F>(
        &self,
        start: Index,
        order: Order,
        target: &mut Forest<B>,
        context: &mut T,
        transform: &mut F,
        filled: &mut Vec<NodeId>,
    ) -> Result<(NodeId, usize), E>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> Result<B, E>,
        E: From<TreeError>,
    {
        let mut frontier = VecDeque::new();
        frontier.push_back(MapFrame {
            depth: 0,
            source: start,
            parent: None,
        });

        let mut root = None;
        let mut mapped_count = 0usize;
        while let Some(frame) = order.next(&mut frontier) {
            let node = self.view(frame.source)?;
            let mapped = target.create(transform(context, frame.depth, node)?);
            mapped_count += 1;

            match frame.parent {
                Some(parent) => target.child_add(parent, mapped)?,
                None => {
                    if root.is_some() {
                        return Err(TreeError::Internal("root may only be set once".into()).into());
                    }
                    if frame.depth != 0 {
                        return Err(TreeError::Internal(format!(
                            "root must be at depth 0, got {}",
                            frame.depth
                        ))
                        .into());
                    }
                    root = Some(mapped);
                }
            }

            if node.child_count() > 0 {
                filled.push(mapped);
            }
            frontier.extend(node.child_indices().map(|child| MapFrame {
                depth: frame.depth + 1,
                source: child,
                parent: Some(mapped),
            }));
        }

        let root = root.ok_or_else(|| TreeError::Internal("map produced no root".into()))?;
        Ok((root, mapped_count))
    }

    pub fn map_into<T, B, F>(
        &self,
        start: NodeId,
        order: Order,
        target: &mut Forest<B>,
        context: &mut T,
        mut transform: F,
    ) -> TreeResult<NodeId>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> B,
    {
        self.try_map_into(start, order, target, context, |context, depth, node| {
            Ok::<B, TreeError>(transform(context, depth, node))
        })
    }

    /// Maps the subtree at `start` into a new forest. A failing transform
    /// drops everything mapped so far.
    pub fn try_map<T, B, E, F>(
        &self,
        start: NodeId,
        order: Order,
        context: &mut T,
        transform: F,
    ) -> Result<MappedTree<B>, E>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> Result<B, E>,
        E: From<TreeError>,
    {
        let mut forest = Forest::new();
        let root = self.try_map_into(start, order, &mut forest, context, transform)?;
        Ok(MappedTree { forest, root })
    }

    pub fn map<T, B, F>(
        &self,
        start: NodeId,
        order: Order,
        context: &mut T,
        mut transform: F,
    ) -> TreeResult<MappedTree<B>>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> B,
    {
        self.try_map(start, order, context, |context, depth, node| {
            Ok::<B, TreeError>(transform(context, depth, node))
        })
    }

    pub fn map_depth_first<T, B, F>(
        &self,
        start: NodeId,
        context: &mut T,
        transform: F,
    ) -> TreeResult<MappedTree<B>>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> B,
    {
        self.map(start, Order::DepthFirst, context, transform)
    }

    pub fn map_breadth_first<T, B, F>(
        &self,
        start: NodeId,
        context: &mut T,
        transform: F,
    ) -> TreeResult<MappedTree<B>>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> B,
    {
        self.map(start, Order::BreadthFirst, context, transform)
    }

    pub fn try_map_depth_first<T, B, E, F>(
        &self,
        start: NodeId,
        context: &mut T,
        transform: F,
    ) -> Result<MappedTree<B>, E>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> Result<B, E>,
        E: From<TreeError>,
    {
        self.try_map(start, Order::DepthFirst, context, transform)
    }

    pub fn try_map_breadth_first<T, B, E, F>(
        &self,
        start: NodeId,
        context: &mut T,
        transform: F,
    ) -> Result<MappedTree<B>, E>
    where
        F: FnMut(&mut T, usize, NodeRef<'_, A>) -> Result<B, E>,
        E: From<TreeError>,
    {
        self.try_map(start, Order::BreadthFirst, context, transform)
    }
}
