use thiserror::Error;

use crate::value::NodeId;

/// Errors produced by heap and value operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// A `NodeId` does not resolve to a container in this heap.
    #[error("dangling node reference: {0}")]
    DanglingNode(NodeId),

    /// A container was reached again while already being exported.
    #[error("cyclic graph: container {0} references itself")]
    CyclicGraph(NodeId),

    /// The value has no representation in the requested format.
    #[error("value cannot be represented: {0}")]
    Unrepresentable(&'static str),

    /// A container operation was applied to a primitive.
    #[error("expected a container, got {0}")]
    NotAContainer(&'static str),
}

/// Convenience alias for type-level results.
pub type TypeResult<T> = Result<T, TypeError>;
