//! Per-property interception points of the merge engine.
//!
//! For every property of a container extension (after the identity and
//! self-reference checks) the engine asks [`MergeHooks::before`] which value
//! to merge, computes the merged result, then asks [`MergeHooks::after`]
//! which value to store. Returning `Value::Undefined` from `after` vetoes the
//! write.

use std::fmt;

use tangle_types::{Heap, Value};

use crate::error::HookResult;

/// Hook pair consulted by a [`Merger`](crate::Merger).
///
/// Both methods receive the heap so a hook can inspect containers or
/// allocate substitutes. The provided implementations are the identity.
pub trait MergeHooks {
    /// Choose the value merged into property `prop`.
    ///
    /// `dst` is the current value of the property (`Undefined` if absent),
    /// `src` the value offered by the extension.
    fn before(&mut self, heap: &mut Heap, prop: &str, dst: &Value, src: &Value) -> HookResult<Value> {
        let _ = (heap, prop, dst);
        Ok(src.clone())
    }

    /// Choose the value stored in property `prop`.
    ///
    /// `computed` is the merge result for the property, `source` the value
    /// that `before` returned.
    fn after(
        &mut self,
        heap: &mut Heap,
        prop: &str,
        computed: &Value,
        source: &Value,
    ) -> HookResult<Value> {
        let _ = (heap, prop, source);
        Ok(computed.clone())
    }
}

/// Hooks that accept every decision unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHooks;

impl MergeHooks for DefaultHooks {}

impl<H: MergeHooks + ?Sized> MergeHooks for &mut H {
    fn before(&mut self, heap: &mut Heap, prop: &str, dst: &Value, src: &Value) -> HookResult<Value> {
        (**self).before(heap, prop, dst, src)
    }

    fn after(
        &mut self,
        heap: &mut Heap,
        prop: &str,
        computed: &Value,
        source: &Value,
    ) -> HookResult<Value> {
        (**self).after(heap, prop, computed, source)
    }
}

impl<H: MergeHooks + ?Sized> MergeHooks for Box<H> {
    fn before(&mut self, heap: &mut Heap, prop: &str, dst: &Value, src: &Value) -> HookResult<Value> {
        (**self).before(heap, prop, dst, src)
    }

    fn after(
        &mut self,
        heap: &mut Heap,
        prop: &str,
        computed: &Value,
        source: &Value,
    ) -> HookResult<Value> {
        (**self).after(heap, prop, computed, source)
    }
}

type BeforeFn = Box<dyn FnMut(&mut Heap, &str, &Value, &Value) -> HookResult<Value>>;
type AfterFn = Box<dyn FnMut(&mut Heap, &str, &Value, &Value) -> HookResult<Value>>;

/// Hook table whose two functions can be replaced at any time.
///
/// An unset slot behaves like [`DefaultHooks`].
#[derive(Default)]
pub struct HookTable {
    before: Option<BeforeFn>,
    after: Option<AfterFn>,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the `before` hook: `(heap, prop, dst, src) -> value to merge`.
    pub fn set_before<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut Heap, &str, &Value, &Value) -> HookResult<Value> + 'static,
    {
        self.before = Some(Box::new(f));
        self
    }

    /// Replace the `after` hook: `(heap, prop, computed, source) -> value to store`.
    pub fn set_after<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut Heap, &str, &Value, &Value) -> HookResult<Value> + 'static,
    {
        self.after = Some(Box::new(f));
        self
    }

    /// Builder form of [`set_before`](Self::set_before).
    pub fn with_before<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Heap, &str, &Value, &Value) -> HookResult<Value> + 'static,
    {
        self.set_before(f);
        self
    }

    /// Builder form of [`set_after`](Self::set_after).
    pub fn with_after<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Heap, &str, &Value, &Value) -> HookResult<Value> + 'static,
    {
        self.set_after(f);
        self
    }

    /// Restore both hooks to the identity.
    pub fn reset(&mut self) {
        self.before = None;
        self.after = None;
    }

    pub fn has_before(&self) -> bool {
        self.before.is_some()
    }

    pub fn has_after(&self) -> bool {
        self.after.is_some()
    }
}

impl MergeHooks for HookTable {
    fn before(&mut self, heap: &mut Heap, prop: &str, dst: &Value, src: &Value) -> HookResult<Value> {
        match self.before.as_mut() {
            Some(f) => f(heap, prop, dst, src),
            None => DefaultHooks.before(heap, prop, dst, src),
        }
    }

    fn after(
        &mut self,
        heap: &mut Heap,
        prop: &str,
        computed: &Value,
        source: &Value,
    ) -> HookResult<Value> {
        match self.after.as_mut() {
            Some(f) => f(heap, prop, computed, source),
            None => DefaultHooks.after(heap, prop, computed, source),
        }
    }
}

impl fmt::Debug for HookTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookTable")
            .field("before", &self.has_before())
            .field("after", &self.has_after())
            .finish()
    }
}
