use thiserror::Error;

use crate::types::WindowId;

/// Outcomes of layout operations that did not produce a new model.
///
/// Most of these are expected edge conditions that callers swallow after
/// logging; `WindowNotFound` and `WindowAlreadyManaged` indicate a caller
/// bug and abort the single operation that hit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The last window was removed; the model is being torn down.
    /// This signals "no model anymore", not a failure to surface.
    #[error("last window removed, model torn down")]
    EmptyModel,

    /// A removal had multiple windows remaining but no focus candidate
    /// was supplied. Fatal precondition violation for that operation.
    #[error("no focus target supplied for removal")]
    NoFocusTarget,

    /// A focus-direction request had no valid neighbor, or the operation
    /// is reserved for cross-workspace movement and unimplemented here.
    #[error("no action target in the requested direction")]
    NoActionTarget,

    /// A move command was requested at a grid boundary.
    #[error("no movement possible at the grid boundary")]
    NoMovementPossible,

    /// The window is not part of this model even though the caller
    /// believed it was.
    #[error("window {0} not found in workspace model")]
    WindowNotFound(WindowId),

    /// The window is already part of this model and cannot be inserted
    /// a second time.
    #[error("window {0} is already managed by this model")]
    WindowAlreadyManaged(WindowId),
}

impl LayoutError {
    /// Whether this outcome is an expected edge condition (drop after a
    /// diagnostic) as opposed to a caller bug (escalate the diagnostic).
    pub fn is_expected(&self) -> bool {
        !matches!(
            self,
            LayoutError::WindowNotFound(_) | LayoutError::WindowAlreadyManaged(_)
        )
    }
}
