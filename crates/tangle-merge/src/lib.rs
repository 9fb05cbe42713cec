//! Merge engine for Tangle.
//!
//! Folds any number of extensions onto a target value, deep-merging nested
//! containers in place, skipping `Undefined` properties, and consulting a
//! pair of hooks for every property decision.
//!
//! # Key Types
//!
//! - [`Merger`] — Merge engine configured with hooks and options
//! - [`MergeHooks`] / [`HookTable`] / [`DefaultHooks`] — Per-property interception
//! - [`MergeOptions`] / [`AfterPolicy`] / [`CyclePolicy`] — Behavioural knobs
//! - [`MergeError`] / [`HookError`] — Failure modes

pub mod engine;
pub mod error;
pub mod hooks;
pub mod options;

pub use engine::{merge, merge_all, Merger};
pub use error::{HookError, HookResult, MergeError, MergeResult};
pub use hooks::{DefaultHooks, HookTable, MergeHooks};
pub use options::{AfterPolicy, CyclePolicy, MergeOptions, DEFAULT_MAX_DEPTH};
