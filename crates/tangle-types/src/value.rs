use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a container owned by a [`Heap`](crate::Heap).
///
/// Two `NodeId`s are equal exactly when they name the same container, which
/// is how reference identity is expressed for containers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a `NodeId` from a raw arena index.
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// The raw arena index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a container is map-like or list-like.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Plain keyed object.
    Map,
    /// Array whose keys are decimal indices.
    Sequence,
}

impl ContainerKind {
    /// Returns `true` for list-like containers.
    pub fn is_sequence(self) -> bool {
        matches!(self, Self::Sequence)
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Map => f.write_str("map"),
            Self::Sequence => f.write_str("sequence"),
        }
    }
}

/// A value in an object graph.
///
/// Everything except [`Value::Ref`] is a primitive: it has no mergeable
/// sub-structure. `Ref` points at a [`Container`](crate::Container) in a
/// heap.
///
/// `PartialEq` is the identity relation used by the merge engine:
/// primitives compare by value (with `f64` semantics, so `NaN` is never
/// identical to itself) and containers compare by `NodeId`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value. Never written into a container by a merge.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Opaque callable token. Treated as a primitive.
    Function(String),
    /// Reference to a container.
    Ref(NodeId),
}

impl Value {
    /// Returns `true` if this is [`Value::Undefined`].
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns `true` if this value references a container.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Ref(_))
    }

    /// Returns `true` for every non-container value, `Undefined` included.
    pub fn is_primitive(&self) -> bool {
        !self.is_container()
    }

    /// The referenced container, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Self::Ref(id) => Some(*id),
            _ => None,
        }
    }

    /// Short name of the variant, used in errors and CLI output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Function(_) => "function",
            Self::Ref(_) => "container",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        Self::Ref(id)
    }
}
