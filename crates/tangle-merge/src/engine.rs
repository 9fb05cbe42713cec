//! The deep-merge reducer.
//!
//! [`Merger`] folds a list of extensions onto a target, left to right:
//!
//! - `Undefined` extensions, and extensions identical to the working target,
//!   are skipped.
//! - A primitive extension discards everything accumulated so far: the
//!   working target is reset and the primitive becomes the pending result.
//! - A container extension cancels any pending primitive and is merged into
//!   the working target property by property, recursing into containers the
//!   target already has and cloning containers it lacks.
//!
//! The target is mutated in place. Extensions are only read; every container
//! the result needs beyond the target is freshly allocated in the heap.
//!
//! # Invariants
//!
//! - A property is never written with `Undefined`. An `Undefined` source
//!   neither creates nor overwrites a property.
//! - A container reachable from the target stays reachable unless a
//!   primitive source overwrites that exact property.

use tracing::{debug, trace};

use tangle_types::{ContainerKind, Heap, NodeId, Value};

use crate::error::{MergeError, MergeResult};
use crate::hooks::{DefaultHooks, MergeHooks};
use crate::options::{AfterPolicy, CyclePolicy, MergeOptions};

/// Merge `extensions` onto `target` with identity hooks and default options.
pub fn merge(heap: &mut Heap, target: Value, extensions: &[Value]) -> MergeResult<Value> {
    Merger::new().merge(heap, target, extensions)
}

/// Variadic form of [`merge`]: `args[0]` is the target. No arguments yields
/// `Undefined`.
pub fn merge_all(heap: &mut Heap, args: &[Value]) -> MergeResult<Value> {
    Merger::new().merge_all(heap, args)
}

/// A merge engine configured with hooks and options.
///
/// Hooks are owned by the merger, so two mergers never observe each other's
/// hooks.
#[derive(Debug, Default)]
pub struct Merger<H = DefaultHooks> {
    hooks: H,
    options: MergeOptions,
}

impl Merger<DefaultHooks> {
    /// A merger with identity hooks and default options.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: MergeHooks> Merger<H> {
    /// A merger with the given hooks and default options.
    pub fn with_hooks(hooks: H) -> Self {
        Self {
            hooks,
            options: MergeOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: MergeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn into_hooks(self) -> H {
        self.hooks
    }

    /// Merge `extensions` onto `target` and return the result.
    ///
    /// With no extensions, `target` is returned unchanged. If `target` is a
    /// container the result is normally that same container, mutated; it is
    /// a primitive when the last non-`Undefined` primitive extension was not
    /// followed by a container extension.
    pub fn merge(&mut self, heap: &mut Heap, target: Value, extensions: &[Value]) -> MergeResult<Value> {
        debug!(
            kind = target.type_name(),
            extensions = extensions.len(),
            "merging"
        );
        let mut scope = Scope::default();
        self.fold(heap, target, extensions, &mut scope)
    }

    /// Variadic form of [`merge`](Self::merge).
    pub fn merge_all(&mut self, heap: &mut Heap, args: &[Value]) -> MergeResult<Value> {
        match args.split_first() {
            Some((target, extensions)) => self.merge(heap, target.clone(), extensions),
            None => Ok(Value::Undefined),
        }
    }

    fn fold(
        &mut self,
        heap: &mut Heap,
        target: Value,
        extensions: &[Value],
        scope: &mut Scope,
    ) -> MergeResult<Value> {
        if extensions.is_empty() {
            return Ok(target);
        }

        // A primitive target is remembered as the pending result; structure
        // accumulates in a fresh map allocated on first use.
        let (mut working, mut pending) = match target {
            Value::Ref(id) => {
                heap.get(id)?;
                (Some(id), None)
            }
            Value::Undefined => (None, None),
            primitive => (None, Some(primitive)),
        };

        for extension in extensions {
            if extension.is_undefined() || working.is_some_and(|id| *extension == Value::Ref(id)) {
                continue;
            }

            let Some(source) = extension.node() else {
                trace!(value = extension.type_name(), "primitive extension resets target");
                working = None;
                pending = Some(extension.clone());
                continue;
            };

            pending = None;
            let into = match working {
                Some(id) => id,
                None => *working.insert(heap.alloc(ContainerKind::Map)),
            };
            self.merge_container(heap, into, source, scope)?;
        }

        match pending {
            Some(primitive) => Ok(primitive),
            None => {
                let id = match working {
                    Some(id) => id,
                    None => heap.alloc(ContainerKind::Map),
                };
                Ok(Value::Ref(id))
            }
        }
    }

    fn merge_container(
        &mut self,
        heap: &mut Heap,
        into: NodeId,
        source: NodeId,
        scope: &mut Scope,
    ) -> MergeResult<()> {
        // Snapshot the source: hooks and nested merges may touch the heap.
        let entries = heap.get(source)?.entries().to_vec();

        scope.active.push((source, into));
        let result = entries
            .into_iter()
            .try_for_each(|(prop, src)| self.merge_property(heap, into, &prop, src, scope));
        scope.active.pop();
        result
    }

    fn merge_property(
        &mut self,
        heap: &mut Heap,
        into: NodeId,
        prop: &str,
        src: Value,
        scope: &mut Scope,
    ) -> MergeResult<()> {
        let dst = heap.get(into)?.get(prop).cloned().unwrap_or_default();

        if src == dst {
            return Ok(());
        }

        if src == Value::Ref(into) {
            trace!(prop, node = %into, "self-reference preserved");
            heap.get_mut(into)?.insert(prop, src);
            return Ok(());
        }

        if self.options.cycle_policy == CyclePolicy::TrackPath {
            if let Some(merged_into) = src.node().and_then(|id| scope.target_of(id)) {
                trace!(prop, node = %merged_into, "back-reference redirected to merge target");
                heap.get_mut(into)?.insert(prop, Value::Ref(merged_into));
                return Ok(());
            }
        }

        let merged = self.hooks.before(heap, prop, &dst, &src)?;

        let computed = match (dst.node(), merged.node()) {
            (Some(_), _) => self.nested(heap, dst.clone(), &merged, scope)?,
            (None, Some(id)) => {
                let kind = heap.get(id)?.kind();
                let clone = Value::Ref(heap.alloc(kind));
                self.nested(heap, clone, &merged, scope)?
            }
            (None, None) => merged.clone(),
        };

        let result = self.hooks.after(heap, prop, &computed, &merged)?;

        let writable = match self.options.after_policy {
            AfterPolicy::Uniform => true,
            AfterPolicy::Literal => dst.is_primitive(),
        };
        if writable && !result.is_undefined() {
            heap.get_mut(into)?.insert(prop, result);
        }
        Ok(())
    }

    fn nested(
        &mut self,
        heap: &mut Heap,
        target: Value,
        extension: &Value,
        scope: &mut Scope,
    ) -> MergeResult<Value> {
        if let Some(limit) = self.options.max_depth {
            if scope.depth >= limit {
                return Err(MergeError::DepthExceeded { limit });
            }
        }
        scope.depth += 1;
        let result = self.fold(heap, target, std::slice::from_ref(extension), scope);
        scope.depth -= 1;
        result
    }
}

/// Per-call bookkeeping for one top-level merge.
#[derive(Debug, Default)]
struct Scope {
    /// `(source, target)` pairs of container merges in progress, outermost
    /// first.
    active: Vec<(NodeId, NodeId)>,
    depth: usize,
}

impl Scope {
    fn target_of(&self, source: NodeId) -> Option<NodeId> {
        self.active
            .iter()
            .rev()
            .find(|(from, _)| *from == source)
            .map(|(_, into)| *into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HookError;
    use crate::hooks::HookTable;
    use serde_json::json;

    fn import(heap: &mut Heap, json: serde_json::Value) -> Value {
        heap.import_json(&json)
    }

    fn export(heap: &Heap, value: &Value) -> serde_json::Value {
        heap.export_json(value).unwrap()
    }

    // ---------------------------------------------------------------
    // Argument handling
    // ---------------------------------------------------------------

    #[test]
    fn no_arguments_yields_undefined() {
        let mut heap = Heap::new();
        assert!(merge_all(&mut heap, &[]).unwrap().is_undefined());
    }

    #[test]
    fn single_container_is_returned_unchanged() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"x": 1}));
        let allocated = heap.len();

        let result = merge_all(&mut heap, &[a.clone()]).unwrap();
        assert_eq!(result, a);
        assert_eq!(heap.len(), allocated);
    }

    #[test]
    fn single_primitive_is_returned_unchanged() {
        let mut heap = Heap::new();
        assert_eq!(merge(&mut heap, Value::from(4), &[]).unwrap(), Value::from(4));
    }

    #[test]
    fn last_primitive_wins() {
        let mut heap = Heap::new();
        let result = merge(&mut heap, Value::from(1), &[Value::from("two")]).unwrap();
        assert_eq!(result, Value::from("two"));
    }

    #[test]
    fn primitive_extension_discards_container_target() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"x": 1}));
        let result = merge(&mut heap, a.clone(), &[Value::Null]).unwrap();

        assert_eq!(result, Value::Null);
        // The target itself is left alone.
        assert_eq!(export(&heap, &a), json!({"x": 1}));
    }

    #[test]
    fn container_after_primitive_target_builds_fresh_map() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"x": 1, "y": {"z": true}}));
        let result = merge(&mut heap, Value::from(7), &[a.clone()]).unwrap();

        assert!(result.is_container());
        assert_ne!(result, a);
        assert!(heap.deep_eq(&result, &a));
        // Nested containers are cloned, not shared.
        assert_ne!(heap.prop(&result, "y"), heap.prop(&a, "y"));
    }

    #[test]
    fn primitive_then_container_structure_restarts() {
        let mut heap = Heap::new();
        let target = import(&mut heap, json!({"kept": 1}));
        let b = import(&mut heap, json!({"b": 2}));
        let result = merge(&mut heap, target.clone(), &[Value::from(5), b]).unwrap();

        assert_ne!(result, target);
        assert_eq!(export(&heap, &result), json!({"b": 2}));
    }

    #[test]
    fn undefined_extensions_are_skipped() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"x": 1}));
        let result = merge(&mut heap, a.clone(), &[Value::Undefined, Value::Undefined]).unwrap();
        assert_eq!(result, a);
    }

    #[test]
    fn undefined_target_with_undefined_extension_is_empty_map() {
        let mut heap = Heap::new();
        let result = merge(&mut heap, Value::Undefined, &[Value::Undefined]).unwrap();
        assert_eq!(export(&heap, &result), json!({}));
    }

    #[test]
    fn target_as_extension_is_ignored() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"x": 1}));
        let result = merge(&mut heap, a.clone(), &[a.clone()]).unwrap();
        assert_eq!(result, a);
        assert_eq!(export(&heap, &a), json!({"x": 1}));
    }

    // ---------------------------------------------------------------
    // Property merging
    // ---------------------------------------------------------------

    #[test]
    fn undefined_properties_never_overwrite() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"x": 1}));
        let ext = heap.map_from([("x", Value::Undefined), ("y", Value::from(2))]);

        let result = merge(&mut heap, a.clone(), &[ext]).unwrap();
        assert_eq!(result, a);
        assert_eq!(export(&heap, &a), json!({"x": 1, "y": 2}));
    }

    #[test]
    fn undefined_properties_are_not_created() {
        let mut heap = Heap::new();
        let a = heap.new_map();
        let ext = heap.map_from([("ghost", Value::Undefined)]);
        merge(&mut heap, a.clone(), &[ext]).unwrap();
        assert!(!heap.get(a.node().unwrap()).unwrap().contains_key("ghost"));
    }

    #[test]
    fn nested_containers_merge_in_place() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"a": {"b": 1, "c": 2}}));
        let inner = heap.prop(&a, "a");
        let ext = import(&mut heap, json!({"a": {"b": 99}}));

        let result = merge(&mut heap, a.clone(), &[ext]).unwrap();
        assert_eq!(result, a);
        assert_eq!(heap.prop(&a, "a"), inner);
        assert_eq!(export(&heap, &a), json!({"a": {"b": 99, "c": 2}}));
    }

    #[test]
    fn later_extensions_win() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"v": 1}));
        let b = import(&mut heap, json!({"v": 2, "w": 1}));
        let c = import(&mut heap, json!({"v": 3}));
        let result = merge(&mut heap, a, &[b, c]).unwrap();
        assert_eq!(export(&heap, &result), json!({"v": 3, "w": 1}));
    }

    #[test]
    fn arrays_merge_index_wise() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"list": [1, 2, 3]}));
        let b = import(&mut heap, json!({"list": [9]}));
        let result = merge(&mut heap, a, &[b]).unwrap();
        assert_eq!(export(&heap, &result), json!({"list": [9, 2, 3]}));
    }

    #[test]
    fn cloned_array_keeps_sequence_kind() {
        let mut heap = Heap::new();
        let a = heap.new_map();
        let b = import(&mut heap, json!({"list": [1, {"k": "v"}]}));
        merge(&mut heap, a.clone(), &[b.clone()]).unwrap();

        let list = heap.prop(&a, "list");
        assert_eq!(heap.kind_of(&list), Some(ContainerKind::Sequence));
        assert_ne!(list, heap.prop(&b, "list"));
        assert_eq!(export(&heap, &a), json!({"list": [1, {"k": "v"}]}));
    }

    #[test]
    fn extensions_are_not_mutated() {
        let mut heap = Heap::new();
        let a = heap.new_map();
        let b = import(&mut heap, json!({"cfg": {"x": 1}}));
        let c = import(&mut heap, json!({"cfg": {"y": 2}}));

        merge(&mut heap, a.clone(), &[b.clone(), c]).unwrap();
        assert_eq!(export(&heap, &a), json!({"cfg": {"x": 1, "y": 2}}));
        assert_eq!(export(&heap, &b), json!({"cfg": {"x": 1}}));
    }

    #[test]
    fn primitive_source_replaces_nested_container() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"a": {"b": 1}}));
        let ext = import(&mut heap, json!({"a": 5}));
        merge(&mut heap, a.clone(), &[ext]).unwrap();
        assert_eq!(export(&heap, &a), json!({"a": 5}));
    }

    #[test]
    fn literal_policy_keeps_nested_container_against_primitive() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"a": {"b": 1}}));
        let ext = import(&mut heap, json!({"a": 5}));
        Merger::new()
            .with_options(MergeOptions::literal())
            .merge(&mut heap, a.clone(), &[ext])
            .unwrap();
        assert_eq!(export(&heap, &a), json!({"a": {"b": 1}}));
    }

    #[test]
    fn container_source_replaces_primitive() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"a": 5}));
        let ext = import(&mut heap, json!({"a": {"b": 1}}));
        merge(&mut heap, a.clone(), &[ext]).unwrap();
        assert_eq!(export(&heap, &a), json!({"a": {"b": 1}}));
    }

    // ---------------------------------------------------------------
    // Cycles
    // ---------------------------------------------------------------

    #[test]
    fn root_self_reference_points_at_result() {
        let mut heap = Heap::new();
        let t = heap.new_map();
        heap.set_prop(&t, "self", t.clone()).unwrap();
        let target = heap.new_map();

        let result = merge(&mut heap, target.clone(), &[t.clone()]).unwrap();
        assert_eq!(result, target);
        assert_eq!(heap.prop(&result, "self"), result);
    }

    #[test]
    fn reference_to_working_target_is_preserved() {
        let mut heap = Heap::new();
        let target = heap.new_map();
        let ext = heap.map_from([("back", target.clone())]);

        let result = Merger::new()
            .with_options(MergeOptions::literal())
            .merge(&mut heap, target.clone(), &[ext])
            .unwrap();
        assert_eq!(heap.prop(&result, "back"), target);
    }

    #[test]
    fn nested_back_reference_points_at_clone() {
        let mut heap = Heap::new();
        let inner = heap.new_map();
        heap.set_prop(&inner, "up", inner.clone()).unwrap();
        let ext = heap.map_from([("inner", inner.clone())]);
        let target = heap.new_map();

        merge(&mut heap, target.clone(), &[ext]).unwrap();
        let cloned = heap.prop(&target, "inner");
        assert_ne!(cloned, inner);
        assert_eq!(heap.prop(&cloned, "up"), cloned);
    }

    #[test]
    fn back_reference_replaces_container_destination() {
        let mut heap = Heap::new();
        let ext = heap.new_map();
        heap.set_prop(&ext, "loop", ext.clone()).unwrap();
        let previous = heap.map_from([("keep", Value::from(1))]);
        let target = heap.map_from([("loop", previous.clone())]);

        merge(&mut heap, target.clone(), &[ext]).unwrap();
        assert_eq!(heap.prop(&target, "loop"), target);
        assert_eq!(heap.prop(&previous, "keep"), Value::from(1));
    }

    fn chain(heap: &mut Heap, depth: usize, leaf: Value) -> Value {
        (0..depth).fold(leaf, |inner, _| heap.map_from([("n", inner)]))
    }

    #[test]
    fn deep_acyclic_merge_is_unbounded_by_default() {
        let mut heap = Heap::new();
        let target = chain(&mut heap, 300, Value::from(1));
        let ext = chain(&mut heap, 300, Value::from(2));

        let result = merge(&mut heap, target.clone(), &[ext]).unwrap();
        assert_eq!(result, target);

        let leaf = (0..300).fold(result, |node, _| heap.prop(&node, "n"));
        assert_eq!(leaf, Value::from(2));
    }

    #[test]
    fn root_only_policy_hits_depth_bound_on_cyclic_extension() {
        let mut heap = Heap::new();
        let t = heap.new_map();
        heap.set_prop(&t, "self", t.clone()).unwrap();
        let target = heap.new_map();
        let options = MergeOptions {
            cycle_policy: CyclePolicy::RootOnly,
            max_depth: Some(8),
            ..Default::default()
        };

        let err = Merger::new()
            .with_options(options)
            .merge(&mut heap, target, &[t])
            .unwrap_err();
        assert!(matches!(err, MergeError::DepthExceeded { limit: 8 }));
    }

    #[test]
    fn dangling_target_is_a_type_error() {
        let mut heap = Heap::new();
        let ext = heap.new_map();
        let bogus = Value::Ref(NodeId::from_index(99));
        let err = merge(&mut heap, bogus, &[ext]).unwrap_err();
        assert!(matches!(err, MergeError::Type(_)));
    }

    // ---------------------------------------------------------------
    // Hooks
    // ---------------------------------------------------------------

    #[test]
    fn constant_before_hook_overrides_every_scalar() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"x": 1, "nested": {"y": "old"}}));
        let b = import(&mut heap, json!({"x": 2, "z": true, "nested": {"y": "new", "w": 0}}));

        let hooks = HookTable::new().with_before(|_, _, _, src| {
            Ok(if src.is_container() { src.clone() } else { Value::from("K") })
        });
        let result = Merger::with_hooks(hooks).merge(&mut heap, a, &[b]).unwrap();

        assert_eq!(
            export(&heap, &result),
            json!({"x": "K", "z": "K", "nested": {"y": "K", "w": "K"}})
        );
    }

    #[test]
    fn constant_before_hook_replaces_scalars() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"x": 1}));
        let b = import(&mut heap, json!({"x": 2, "y": 3}));

        let hooks = HookTable::new().with_before(|_, _, _, _| Ok(Value::from(0)));
        let result = Merger::with_hooks(hooks).merge(&mut heap, a, &[b]).unwrap();
        assert_eq!(export(&heap, &result), json!({"x": 0, "y": 0}));
    }

    #[test]
    fn after_hook_can_veto_writes() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"keep": 1}));
        let b = import(&mut heap, json!({"keep": 2, "secret": "s", "other": 3}));

        let hooks = HookTable::new().with_after(|_, prop, computed, _| {
            Ok(if prop == "secret" || prop == "keep" {
                Value::Undefined
            } else {
                computed.clone()
            })
        });
        let result = Merger::with_hooks(hooks).merge(&mut heap, a, &[b]).unwrap();
        assert_eq!(export(&heap, &result), json!({"keep": 1, "other": 3}));
    }

    #[test]
    fn vetoed_container_still_merged_in_place() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"cfg": {"a": 1}}));
        let b = import(&mut heap, json!({"cfg": {"b": 2}}));

        let hooks = HookTable::new().with_after(|_, _, _, _| Ok(Value::Undefined));
        let result = Merger::with_hooks(hooks).merge(&mut heap, a, &[b]).unwrap();
        // The nested merge ran; only the (redundant) write-back was vetoed.
        // Inner properties are vetoed too, so cfg keeps only `a`.
        assert_eq!(export(&heap, &result), json!({"cfg": {"a": 1}}));
    }

    #[test]
    fn after_hook_sees_computed_and_source() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"n": 1}));
        let b = import(&mut heap, json!({"n": 2}));

        let hooks = HookTable::new().with_after(|_, _, computed, source| {
            let sum = computed.as_f64().unwrap_or(0.0) + source.as_f64().unwrap_or(0.0);
            Ok(Value::from(sum))
        });
        let result = Merger::with_hooks(hooks).merge(&mut heap, a, &[b]).unwrap();
        assert_eq!(export(&heap, &result), json!({"n": 4}));
    }

    #[test]
    fn before_hook_sees_destination() {
        let mut heap = Heap::new();
        let a = import(&mut heap, json!({"count": 3}));
        let b = import(&mut heap, json!({"count": 4, "fresh": 1}));

        let hooks = HookTable::new().with_before(|_, _, dst, src| {
            Ok(match (dst.as_f64(), src.as_f64()) {
                (Some(d), Some(s)) => Value::from(d + s),
                _ => src.clone(),
            })
        });
        let result = Merger::with_hooks(hooks).merge(&mut heap, a, &[b]).unwrap();
        assert_eq!(export(&heap, &result), json!({"count": 7, "fresh": 1}));
    }

    #[test]
    fn hook_errors_propagate_unchanged() {
        let mut heap = Heap::new();
        let a = heap.new_map();
        let b = import(&mut heap, json!({"bad": 1}));

        let hooks = HookTable::new().with_before(|_, prop, _, _| Err(HookError::new(format!("rejected {prop}"))));
        let err = Merger::with_hooks(hooks).merge(&mut heap, a, &[b]).unwrap_err();
        match err {
            MergeError::Hook(hook) => assert_eq!(hook, HookError::new("rejected bad")),
            other => panic!("expected Hook, got {other:?}"),
        }
    }

    #[test]
    fn hooks_are_skipped_for_identical_and_self_referencing_properties() {
        let mut heap = Heap::new();
        let target = import(&mut heap, json!({"same": 1}));
        let ext = heap.map_from([("same", Value::from(1)), ("me", target.clone())]);

        let calls = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = calls.clone();
        let hooks = HookTable::new().with_before(move |_, _, _, src| {
            counter.set(counter.get() + 1);
            Ok(src.clone())
        });
        Merger::with_hooks(hooks).merge(&mut heap, target.clone(), &[ext]).unwrap();

        assert_eq!(calls.get(), 0);
        assert_eq!(heap.prop(&target, "me"), target);
    }

    #[test]
    fn mergers_do_not_share_hooks() {
        let mut heap = Heap::new();
        let mut custom = Merger::with_hooks(HookTable::new().with_before(|_, _, _, _| Ok(Value::Null)));

        let a = heap.new_map();
        let b = import(&mut heap, json!({"x": 1}));
        custom.merge(&mut heap, a, &[b.clone()]).unwrap();

        let c = heap.new_map();
        let plain = merge(&mut heap, c, &[b]).unwrap();
        assert_eq!(export(&heap, &plain), json!({"x": 1}));
    }
}
