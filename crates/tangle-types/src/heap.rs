//! The arena that owns every container of an object graph.
//!
//! [`Heap`] stores containers in a `Vec` and hands out [`NodeId`]s. A
//! container is never freed while the heap lives, so a `NodeId` obtained from
//! a heap stays valid for that heap. Cycles are ordinary back-references
//! between `NodeId`s.

use std::collections::HashSet;

use crate::container::Container;
use crate::error::{TypeError, TypeResult};
use crate::value::{ContainerKind, NodeId, Value};

/// Arena of containers.
#[derive(Clone, Debug, Default)]
pub struct Heap {
    containers: Vec<Container>,
}

impl Heap {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of containers allocated so far.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Returns `true` if no container has been allocated.
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    // ---------------------------------------------------------------
    // Allocation
    // ---------------------------------------------------------------

    /// Allocate an empty container and return its id.
    pub fn alloc(&mut self, kind: ContainerKind) -> NodeId {
        let id = NodeId::from_index(
            u32::try_from(self.containers.len()).expect("heap exceeded u32::MAX containers"),
        );
        self.containers.push(Container::new(kind));
        id
    }

    /// Allocate an empty map and return a reference to it.
    pub fn new_map(&mut self) -> Value {
        Value::Ref(self.alloc(ContainerKind::Map))
    }

    /// Allocate an empty sequence and return a reference to it.
    pub fn new_sequence(&mut self) -> Value {
        Value::Ref(self.alloc(ContainerKind::Sequence))
    }

    /// Allocate a map populated from `(key, value)` pairs.
    pub fn map_from<K, I>(&mut self, entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let id = self.alloc(ContainerKind::Map);
        let container = &mut self.containers[id.index()];
        for (key, value) in entries {
            container.insert(key, value);
        }
        Value::Ref(id)
    }

    /// Allocate a sequence populated from `values`.
    pub fn sequence_from<I>(&mut self, values: I) -> Value
    where
        I: IntoIterator<Item = Value>,
    {
        let id = self.alloc(ContainerKind::Sequence);
        let container = &mut self.containers[id.index()];
        for value in values {
            container.push(value);
        }
        Value::Ref(id)
    }

    // ---------------------------------------------------------------
    // Access
    // ---------------------------------------------------------------

    /// Borrow a container by id.
    pub fn get(&self, id: NodeId) -> TypeResult<&Container> {
        self.containers
            .get(id.index())
            .ok_or(TypeError::DanglingNode(id))
    }

    /// Mutably borrow a container by id.
    pub fn get_mut(&mut self, id: NodeId) -> TypeResult<&mut Container> {
        self.containers
            .get_mut(id.index())
            .ok_or(TypeError::DanglingNode(id))
    }

    /// The container a value refers to, if it is a live reference.
    pub fn container(&self, value: &Value) -> Option<&Container> {
        value.node().and_then(|id| self.containers.get(id.index()))
    }

    /// Container kind of a value, `None` for primitives.
    pub fn kind_of(&self, value: &Value) -> Option<ContainerKind> {
        self.container(value).map(Container::kind)
    }

    /// Read `value[key]`, yielding `Undefined` for primitives and missing keys.
    pub fn prop(&self, value: &Value, key: &str) -> Value {
        self.container(value)
            .and_then(|c| c.get(key))
            .cloned()
            .unwrap_or_default()
    }

    /// Write `target[key] = value`.
    pub fn set_prop(&mut self, target: &Value, key: impl Into<String>, value: Value) -> TypeResult<()> {
        let id = target
            .node()
            .ok_or(TypeError::NotAContainer(target.type_name()))?;
        self.get_mut(id)?.insert(key, value);
        Ok(())
    }

    /// Append to a sequence (or map) at its next free index.
    pub fn push(&mut self, target: &Value, value: Value) -> TypeResult<usize> {
        let id = target
            .node()
            .ok_or(TypeError::NotAContainer(target.type_name()))?;
        Ok(self.get_mut(id)?.push(value))
    }

    /// Follow a property path from `root`.
    ///
    /// Returns `Undefined` as soon as a segment is missing or a primitive is
    /// reached before the path ends.
    pub fn lookup<S: AsRef<str>>(&self, root: &Value, path: &[S]) -> Value {
        let mut current = root.clone();
        for segment in path {
            current = self.prop(&current, segment.as_ref());
            if current.is_undefined() {
                break;
            }
        }
        current
    }

    // ---------------------------------------------------------------
    // Structural equality
    // ---------------------------------------------------------------

    /// Structural equality of two values within this heap.
    ///
    /// Primitives compare with `==`. Containers are equal when they have the
    /// same kind and the same key set with pairwise deep-equal values; key
    /// order is ignored. A pair of containers already under comparison is
    /// assumed equal, so cyclic graphs terminate.
    pub fn deep_eq(&self, a: &Value, b: &Value) -> bool {
        let mut in_progress = HashSet::new();
        self.deep_eq_inner(a, b, &mut in_progress)
    }

    fn deep_eq_inner(
        &self,
        a: &Value,
        b: &Value,
        in_progress: &mut HashSet<(NodeId, NodeId)>,
    ) -> bool {
        let (Some(ida), Some(idb)) = (a.node(), b.node()) else {
            return a == b;
        };
        if ida == idb || !in_progress.insert((ida, idb)) {
            return true;
        }
        let (Ok(ca), Ok(cb)) = (self.get(ida), self.get(idb)) else {
            return false;
        };
        let equal = ca.kind() == cb.kind()
            && ca.len() == cb.len()
            && ca.iter().all(|(key, va)| match cb.get(key) {
                Some(vb) => self.deep_eq_inner(va, vb, in_progress),
                None => false,
            });
        in_progress.remove(&(ida, idb));
        equal
    }
}
