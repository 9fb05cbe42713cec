use serde::{Deserialize, Serialize};

/// Nesting bound installed by [`MergeOptions::literal`], where cycles other
/// than a direct self-reference are not detected.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// When the value returned by the `after` hook is written back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterPolicy {
    /// Write the hook's result whenever it is not `Undefined`.
    #[default]
    Uniform,
    /// Write the hook's result only when the destination property was not
    /// already a container. A container destination keeps whatever the
    /// nested in-place merge left in it.
    Literal,
}

/// How back-references inside extensions are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// A source container that is currently being merged further up the
    /// recursion (the extension itself or one of its ancestors) is written
    /// as a reference to the container it is being merged into.
    ///
    /// The reference replaces whatever the destination property held, a
    /// container included, as a direct self-reference does.
    ///
    /// Every nested merge descends into a source container that is not yet
    /// on the path, so recursion is bounded by the extension's depth.
    #[default]
    TrackPath,
    /// Only a source value identical to the working target is treated as a
    /// self-reference. Any other cycle recurses until `max_depth`.
    RootOnly,
}

/// Configuration for a [`Merger`](crate::Merger).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    pub after_policy: AfterPolicy,
    pub cycle_policy: CyclePolicy,
    /// Maximum nesting of recursive merges. `None` (the default) removes
    /// the bound; with [`CyclePolicy::RootOnly`] a cyclic extension will then
    /// exhaust the stack.
    pub max_depth: Option<usize>,
}

impl MergeOptions {
    /// Root-only cycle handling and the asymmetric `after` write-back,
    /// bounded at [`DEFAULT_MAX_DEPTH`].
    pub fn literal() -> Self {
        Self {
            after_policy: AfterPolicy::Literal,
            cycle_policy: CyclePolicy::RootOnly,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}
