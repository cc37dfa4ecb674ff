//! The closed set of inputs the pipeline understands.
//!
//! Every stimulus reaching the engine, whether a host notification or a
//! user command, is normalized into an [`Intent`] before it enters the
//! queue. There is no escape hatch for ad-hoc callbacks; adding behavior
//! means adding a variant here and handling it in the processor.

use scrollgrid_core_model::WindowId;
use serde::{Deserialize, Serialize};

/// A single unit of pipeline work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// The host reports a new window eligible for management.
    WindowOpened(WindowId),
    /// The host reports a managed window going away.
    WindowClosing(WindowId),
    /// The host granted focus to a window.
    WindowFocused(WindowId),
    /// A user-initiated layout command.
    Command(LayoutCommand),
    /// Stop the pipeline after tearing down the model.
    Shutdown,
}

/// User commands over the current layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutCommand {
    MoveColumnLeft,
    MoveColumnRight,
    MoveColumnUp,
    MoveColumnDown,
    MoveCellLeft,
    MoveCellRight,
    MoveCellUp,
    MoveCellDown,
    FocusLeft,
    FocusRight,
    FocusUp,
    FocusDown,
}

impl LayoutCommand {
    /// Focus commands never produce a new model; they only ask the host
    /// to move input focus.
    pub fn is_focus_only(self) -> bool {
        matches!(
            self,
            Self::FocusLeft | Self::FocusRight | Self::FocusUp | Self::FocusDown
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_commands_are_focus_only() {
        assert!(LayoutCommand::FocusLeft.is_focus_only());
        assert!(LayoutCommand::FocusDown.is_focus_only());
        assert!(!LayoutCommand::MoveColumnLeft.is_focus_only());
        assert!(!LayoutCommand::MoveCellUp.is_focus_only());
    }

    #[test]
    fn intents_serialize_snake_case() {
        let json = serde_json::to_string(&Intent::WindowOpened(7)).unwrap();
        assert_eq!(json, r#"{"window_opened":7}"#);

        let json = serde_json::to_string(&Intent::Command(LayoutCommand::FocusLeft)).unwrap();
        assert_eq!(json, r#"{"command":"focus_left"}"#);
    }
}
