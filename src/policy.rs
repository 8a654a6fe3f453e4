//! Per-node policies consulted by the mutation engine.
//!
//! A policy is evaluated fresh on every structural change it guards, so it may
//! depend on external state that changes between calls.

use crate::errors::CollaboratorError;
use crate::node::NodeId;

/// Hooks a node exposes to the mutation engine.
///
/// Every method has a permissive default. Any `Fn() -> bool` closure is a
/// policy whose `allow_detach` returns the closure's result.
///
/// Hooks report failure through `Err`; the engine rolls the tree back to its
/// state before the operation and hands the error to the caller as
/// [`TreeError::Collaborator`](crate::TreeError::Collaborator).
pub trait NodePolicy {
    /// Whether this node may currently be removed from its parent.
    fn allow_detach(&self) -> Result<bool, CollaboratorError> {
        Ok(true)
    }

    /// Called on the prospective parent before `child` is linked under it.
    fn accept_child(&self, _child: NodeId) -> Result<(), CollaboratorError> {
        Ok(())
    }

    /// Called on the current parent before `child` is unlinked from it.
    fn release_child(&self, _child: NodeId) -> Result<(), CollaboratorError> {
        Ok(())
    }

    /// Called on the node itself before it is linked under `parent`.
    fn accept_parent(&self, _parent: NodeId) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

/// Policy that permits everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysDetach;

impl NodePolicy for AlwaysDetach {}

impl<F> NodePolicy for F
where
    F: Fn() -> bool,
{
    fn allow_detach(&self) -> Result<bool, CollaboratorError> {
        Ok(self())
    }
}
