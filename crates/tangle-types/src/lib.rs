//! Foundation types for Tangle.
//!
//! This crate provides the value model shared by the traversal and merge
//! engines. Every other Tangle crate depends on `tangle-types`.
//!
//! # Key Types
//!
//! - [`Value`] — Tagged union of primitives and container references
//! - [`NodeId`] — Identity of a container; equality is reference identity
//! - [`Container`] — Insertion-ordered keyed mapping, map-like or sequence
//! - [`Heap`] — Arena that owns every container of a graph, cycles included

pub mod container;
pub mod error;
pub mod heap;
pub mod json;
pub mod value;

pub use container::Container;
pub use error::{TypeError, TypeResult};
pub use heap::Heap;
pub use value::{ContainerKind, NodeId, Value};
