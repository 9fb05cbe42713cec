//! Depth-first traversal of value graphs.
//!
//! [`traverse`] is the plain walk: the callback sees the root, then every
//! property value of every container reached, in enumeration order. A
//! callback returning [`ControlFlow::Break`] ends the walk and its payload is
//! returned to the caller.
//!
//! # Cycles
//!
//! `traverse` does not guard against cycles. A graph that refers back to an
//! ancestor will be walked forever unless the callback breaks. Use a
//! [`Walker`] with [`WalkOptions::guard_cycles`] or
//! [`WalkOptions::max_depth`] when the input is not known to be acyclic.

use std::collections::HashSet;
use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};
use tracing::trace;

use tangle_types::{Heap, NodeId, Value};

/// Walk `root` depth-first, calling `callback` for every node.
///
/// Returns `Some(b)` for the first `ControlFlow::Break(b)` produced by the
/// callback and `None` if the walk ran to completion. Shared sub-containers
/// are visited once per incoming edge.
pub fn traverse<B, F>(heap: &Heap, root: &Value, mut callback: F) -> Option<B>
where
    F: FnMut(&Value) -> ControlFlow<B>,
{
    Walker::new(heap).walk(root, &mut callback)
}

/// Tuning knobs for a [`Walker`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    /// Do not re-enter a container that is already on the current path.
    ///
    /// The back-reference itself is still passed to the callback; only its
    /// children are skipped.
    pub guard_cycles: bool,
    /// Do not descend below this depth. The root is at depth 0.
    pub max_depth: Option<usize>,
}

impl WalkOptions {
    /// Options that make any finite graph terminate.
    pub fn guarded() -> Self {
        Self {
            guard_cycles: true,
            ..Default::default()
        }
    }
}

/// Configurable depth-first walker over a [`Heap`].
#[derive(Clone, Debug)]
pub struct Walker<'h> {
    heap: &'h Heap,
    options: WalkOptions,
}

impl<'h> Walker<'h> {
    /// A walker with default (unguarded, unbounded) options.
    pub fn new(heap: &'h Heap) -> Self {
        Self::with_options(heap, WalkOptions::default())
    }

    pub fn with_options(heap: &'h Heap, options: WalkOptions) -> Self {
        Self { heap, options }
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Walk `root`, calling `callback` with each node.
    pub fn walk<B, F>(&self, root: &Value, mut callback: F) -> Option<B>
    where
        F: FnMut(&Value) -> ControlFlow<B>,
    {
        self.walk_with_path(root, |_, value| callback(value))
    }

    /// Walk `root`, calling `callback` with each node and the property path
    /// that led to it. The root has an empty path.
    pub fn walk_with_path<B, F>(&self, root: &Value, mut callback: F) -> Option<B>
    where
        F: FnMut(&[String], &Value) -> ControlFlow<B>,
    {
        let mut state = WalkState {
            path: Vec::new(),
            on_path: HashSet::new(),
        };
        match self.visit(root, 0, &mut state, &mut callback) {
            ControlFlow::Break(b) => Some(b),
            ControlFlow::Continue(()) => None,
        }
    }

    fn visit<B, F>(
        &self,
        value: &Value,
        depth: usize,
        state: &mut WalkState,
        callback: &mut F,
    ) -> ControlFlow<B>
    where
        F: FnMut(&[String], &Value) -> ControlFlow<B>,
    {
        callback(state.path.as_slice(), value)?;

        let Some(id) = value.node() else {
            return ControlFlow::Continue(());
        };
        if self.options.max_depth.is_some_and(|max| depth >= max) {
            return ControlFlow::Continue(());
        }
        let Ok(container) = self.heap.get(id) else {
            trace!(node = %id, "dangling reference, not descending");
            return ControlFlow::Continue(());
        };
        if self.options.guard_cycles && !state.on_path.insert(id) {
            trace!(node = %id, depth, "skipping back-reference");
            return ControlFlow::Continue(());
        }

        for (key, child) in container.iter() {
            state.path.push(key.to_owned());
            let flow = self.visit(child, depth + 1, state, callback);
            state.path.pop();
            if flow.is_break() {
                state.leave(id, self.options.guard_cycles);
                return flow;
            }
        }

        state.leave(id, self.options.guard_cycles);
        ControlFlow::Continue(())
    }
}

struct WalkState {
    path: Vec<String>,
    on_path: HashSet<NodeId>,
}

impl WalkState {
    fn leave(&mut self, id: NodeId, guarded: bool) {
        if guarded {
            self.on_path.remove(&id);
        }
    }
}
