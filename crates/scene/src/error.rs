//! Error types for scene graph construction.

use thiserror::Error;

use crate::node::NodeKey;

/// Error type for scene graph operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Parenting would make a node its own ancestor.
    #[error("cannot parent {child:?} under {parent:?}: it would create a cycle")]
    Cycle {
        /// Node that was being attached.
        child: NodeKey,
        /// Requested parent, equal to or below `child`.
        parent: NodeKey,
    },

    /// A node is already registered under this name.
    #[error("node name '{0}' is already registered")]
    DuplicateName(String),

    /// The key does not belong to this graph.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeKey),
}

/// Result type alias for scene graph operations.
pub type SceneResult<T> = Result<T, SceneError>;
