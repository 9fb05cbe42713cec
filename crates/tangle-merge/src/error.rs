//! Error types for the merge crate.

use tangle_types::TypeError;

/// Error raised by a hook implementation.
///
/// The merge engine never inspects or wraps it; it reaches the caller of
/// `merge` exactly as the hook produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur during a merge.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// A `before` or `after` hook failed.
    #[error("hook failed: {0}")]
    Hook(#[from] HookError),

    /// Nested merges went deeper than the configured bound.
    ///
    /// Only raised when `max_depth` is set. This is how a cyclic extension
    /// that the cycle policy does not cover surfaces.
    #[error("merge exceeded maximum depth of {limit}")]
    DepthExceeded {
        /// The configured bound.
        limit: usize,
    },

    /// The heap did not contain a referenced container.
    #[error("type error: {0}")]
    Type(#[from] TypeError),
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;

/// Convenience alias for hook results.
pub type HookResult<T> = Result<T, HookError>;
