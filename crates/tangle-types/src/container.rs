//! Keyed containers stored in the heap.
//!
//! Entries are kept as `(key, value)` pairs in insertion order, which is the
//! enumeration order seen by both traversal and merge.

use crate::value::{ContainerKind, Value};

/// A keyed mapping from property name to [`Value`].
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    kind: ContainerKind,
    entries: Vec<(String, Value)>,
}

impl Container {
    /// Create an empty container of the given kind.
    pub fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Returns `true` if this container is list-like.
    pub fn is_sequence(&self) -> bool {
        self.kind.is_sequence()
    }

    /// Number of own properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a property.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set a property, keeping its position if it already exists.
    ///
    /// Returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Append a value at the next free index.
    ///
    /// The next index is one past the largest numeric key, so sparse
    /// sequences keep growing at their end.
    pub fn push(&mut self, value: Value) -> usize {
        let index = self.next_index();
        self.entries.push((index.to_string(), value));
        index
    }

    /// One past the largest numeric key (0 for an empty container).
    pub fn next_index(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|(k, _)| k.parse::<usize>().ok())
            .map(|i| i + 1)
            .max()
            .unwrap_or(0)
    }

    /// Property names in enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Own properties in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Own properties as a slice.
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }
}
