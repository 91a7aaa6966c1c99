use crate::foundation::core::NodeId;

/// Convenience result type used across the path engine.
pub type PathResult<T> = Result<T, PathError>;

/// Top-level error taxonomy used by node graph APIs.
///
/// Every variant except [`PathError::Other`] signals a logic error in the caller or in a
/// previous edit; none of them is transient and none should be retried.
#[derive(thiserror::Error, Debug)]
pub enum PathError {
    /// A link points at its own node, dangles, or a traversal cannot terminate.
    #[error("corrupt topology: {0}")]
    CorruptTopology(String),

    /// A node type tag outside the four known kinds.
    #[error("unrecognized node type tag: {0}")]
    UnrecognizedNodeType(u8),

    /// An operation addressed a node id that does not exist.
    #[error("node {id} is out of range (list has {len} nodes)")]
    NodeOutOfRange {
        /// Requested id.
        id: NodeId,
        /// Length of the list at the time of the request.
        len: usize,
    },

    /// The request is well-formed but not applicable to the current graph.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PathError {
    /// Build a [`PathError::CorruptTopology`] value.
    pub fn corrupt_topology(msg: impl Into<String>) -> Self {
        Self::CorruptTopology(msg.into())
    }

    /// Build a [`PathError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PathError::NodeOutOfRange`] value.
    pub fn out_of_range(id: NodeId, len: usize) -> Self {
        Self::NodeOutOfRange { id, len }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
