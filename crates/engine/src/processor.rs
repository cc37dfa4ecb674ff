//! Intent interpretation.
//!
//! The processor is the only writer of workspace state. It consumes one
//! intent at a time, runs the corresponding model operation under a fresh
//! layout context, and reports the outcome as a [`Transition`]. Failed
//! operations never leave a partial model behind; the previous model
//! simply stays adopted.

use std::sync::Arc;

use scrollgrid_core_model::{
    FocusDirection, LayoutContext, LayoutError, WindowId, WorkspaceModel,
};
use scrollgrid_host::WindowSystem;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SettingsHandle;
use crate::intent::{Intent, LayoutCommand};
use crate::manager::WorkspaceModelManager;

/// Upper bound on the trailing intent history kept for diagnostics.
pub const INTENT_HISTORY_LIMIT: usize = 10;

/// Why an intent was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The intent requires a model and none is active.
    #[error("no active workspace model")]
    NoActiveModel,
    /// The host no longer reports a frame for the window.
    #[error("window {0} has no frame on the host")]
    MissingFrame(WindowId),
    /// A focus notification for a window the model does not manage.
    #[error("focus change for untracked window {0}")]
    UntrackedWindow(WindowId),
    /// The model operation itself refused.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

impl EngineError {
    /// Expected drops are routine (model empty, window raced away, layout
    /// has nowhere to move); they log at debug. The rest log at warn.
    pub fn is_expected(&self) -> bool {
        match self {
            Self::NoActiveModel | Self::MissingFrame(_) | Self::UntrackedWindow(_) => true,
            Self::Layout(err) => err.is_expected(),
        }
    }
}

/// Outcome of processing one intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A replacement model was adopted; the view must be re-synced.
    Adopted,
    /// No model change; the host was asked to focus this window.
    FocusOnly(WindowId),
    /// The last window left; the model was torn down.
    Teardown,
    /// The intent was rejected and the previous model kept.
    Dropped(EngineError),
}

enum Step {
    Adopt(WorkspaceModel),
    Focus(WindowId),
}

/// Serialized interpreter for the intent stream.
pub struct EventProcessor {
    host: Arc<dyn WindowSystem>,
    settings: SettingsHandle,
    manager: WorkspaceModelManager,
    history: Vec<Intent>,
    focus_serial: u32,
}

impl EventProcessor {
    pub fn new(host: Arc<dyn WindowSystem>, settings: SettingsHandle) -> Self {
        Self {
            host,
            settings,
            manager: WorkspaceModelManager::new(),
            history: Vec::new(),
            focus_serial: 0,
        }
    }

    /// The active model, if any.
    pub fn model(&self) -> Option<&WorkspaceModel> {
        self.manager.current()
    }

    /// Trailing intents, oldest first.
    pub fn recent_intents(&self) -> &[Intent] {
        &self.history
    }

    /// Interpret one intent against the current model.
    pub fn process(&mut self, intent: Intent) -> Transition {
        self.remember(intent);

        let config = self.settings.current();
        let mru = self.host.mru_windows();
        let ctx = config.layout.context(&mru);

        let outcome = match intent {
            Intent::WindowOpened(window) => {
                self.window_opened(window, config.behavior.focus_new_windows, &ctx)
            }
            Intent::WindowClosing(window) => self.window_closing(window, &ctx),
            Intent::WindowFocused(window) => self.window_focused(window, &ctx),
            Intent::Command(command) => self.command(command, &ctx),
            Intent::Shutdown => {
                self.manager.teardown();
                Ok(Transition::Teardown)
            }
        };

        match outcome {
            Ok(transition) => transition,
            Err(err) if err.is_expected() => {
                debug!(?intent, %err, "intent dropped");
                Transition::Dropped(err)
            }
            Err(err) => {
                warn!(?intent, %err, "intent dropped");
                Transition::Dropped(err)
            }
        }
    }

    fn remember(&mut self, intent: Intent) {
        self.history.push(intent);
        if self.history.len() > INTENT_HISTORY_LIMIT {
            self.history.clear();
        }
    }

    fn window_opened(
        &mut self,
        window: WindowId,
        focus_new: bool,
        ctx: &LayoutContext,
    ) -> Result<Transition, EngineError> {
        let frame = self
            .host
            .frame(window)
            .ok_or(EngineError::MissingFrame(window))?;

        let next = match self.manager.current() {
            None => {
                let work_area = self.host.work_area(window);
                WorkspaceModel::build(window, frame, work_area, ctx)?
            }
            Some(model) => model.insert_window(window, frame, ctx)?,
        };
        self.manager.adopt(next);

        if focus_new {
            self.focus_serial += 1;
            self.host.request_focus(window, self.focus_serial);
        }
        Ok(Transition::Adopted)
    }

    fn window_closing(
        &mut self,
        window: WindowId,
        ctx: &LayoutContext,
    ) -> Result<Transition, EngineError> {
        let model = self.manager.current().ok_or(EngineError::NoActiveModel)?;

        // Most recent window that survives the removal takes the focus
        // path in the replacement model.
        let new_focus = ctx
            .mru
            .iter()
            .copied()
            .find(|&w| w != window && model.contains_window(w));

        match model.remove_window(window, new_focus, ctx) {
            Ok(next) => {
                self.manager.adopt(next);
                Ok(Transition::Adopted)
            }
            Err(LayoutError::EmptyModel) => {
                self.manager.teardown();
                Ok(Transition::Teardown)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn window_focused(
        &mut self,
        window: WindowId,
        ctx: &LayoutContext,
    ) -> Result<Transition, EngineError> {
        let model = self.manager.current().ok_or(EngineError::NoActiveModel)?;
        if !model.contains_window(window) {
            return Err(EngineError::UntrackedWindow(window));
        }

        let next = model.relayout(window, ctx)?;
        self.manager.adopt(next);
        Ok(Transition::Adopted)
    }

    fn command(
        &mut self,
        command: LayoutCommand,
        ctx: &LayoutContext,
    ) -> Result<Transition, EngineError> {
        let model = self.manager.current().ok_or(EngineError::NoActiveModel)?;

        let step = match command {
            LayoutCommand::FocusLeft => Step::Focus(model.focus_target(FocusDirection::Left)?),
            LayoutCommand::FocusRight => Step::Focus(model.focus_target(FocusDirection::Right)?),
            LayoutCommand::FocusUp => Step::Focus(model.focus_target(FocusDirection::Up)?),
            LayoutCommand::FocusDown => Step::Focus(model.focus_target(FocusDirection::Down)?),
            LayoutCommand::MoveColumnLeft => Step::Adopt(model.move_focused_column_left(ctx)?),
            LayoutCommand::MoveColumnRight => Step::Adopt(model.move_focused_column_right(ctx)?),
            LayoutCommand::MoveColumnUp => Step::Adopt(model.move_focused_column_up()?),
            LayoutCommand::MoveColumnDown => Step::Adopt(model.move_focused_column_down()?),
            LayoutCommand::MoveCellLeft => Step::Adopt(model.move_focused_cell_left(ctx)?),
            LayoutCommand::MoveCellRight => Step::Adopt(model.move_focused_cell_right(ctx)?),
            LayoutCommand::MoveCellUp => Step::Adopt(model.move_focused_cell_up(ctx)?),
            LayoutCommand::MoveCellDown => Step::Adopt(model.move_focused_cell_down(ctx)?),
        };

        match step {
            Step::Adopt(next) => {
                self.manager.adopt(next);
                Ok(Transition::Adopted)
            }
            Step::Focus(target) => {
                self.focus_serial += 1;
                self.host.request_focus(target, self.focus_serial);
                Ok(Transition::FocusOnly(target))
            }
        }
    }
}
