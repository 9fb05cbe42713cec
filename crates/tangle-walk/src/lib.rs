//! Traversal engine for Tangle.
//!
//! Walks a value graph depth-first, calling a callback per node, with early
//! exit through [`std::ops::ControlFlow`]. The plain [`traverse`] is
//! unguarded; [`Walker`] adds an optional cycle guard and depth bound.

pub mod walker;

pub use walker::{traverse, WalkOptions, Walker};
