use thiserror::Error;

use crate::node::NodeId;

/// Failure reported by a caller-supplied policy hook, visitor or transform.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("cannot make {parent} the parent of {node}: {parent} is a descendant of {node}")]
    Cycle { node: NodeId, parent: NodeId },

    #[error("node {0} may not be detached from its parent")]
    DetachDenied(NodeId),

    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("node {0} belongs to a different forest")]
    ForeignNode(NodeId),

    #[error("collaborator failed: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal tree operation failed: {0}")]
    Internal(String),
}

impl TreeError {
    /// True for the errors that guarantee the tree was left untouched because
    /// a precondition failed before any work started.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TreeError::Cycle { .. }
                | TreeError::DetachDenied(_)
                | TreeError::NotAChild { .. }
                | TreeError::NodeNotFound(_)
                | TreeError::ForeignNode(_)
        )
    }
}

pub type TreeResult<T> = Result<T, TreeError>;
