//! Sole ownership of the active workspace model.

use scrollgrid_core_model::WorkspaceModel;
use tracing::debug;

/// Owns the `Option<WorkspaceModel>` the whole engine works against.
///
/// Model values are immutable; operations produce replacements, and this
/// is the single place a replacement is adopted or the model torn down.
/// Nothing else in the engine holds a model across intents.
#[derive(Debug, Default)]
pub struct WorkspaceModelManager {
    model: Option<WorkspaceModel>,
}

impl WorkspaceModelManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active model, if any.
    pub fn current(&self) -> Option<&WorkspaceModel> {
        self.model.as_ref()
    }

    /// Adopt a replacement model produced by an operation.
    pub fn adopt(&mut self, model: WorkspaceModel) {
        debug!(
            windows = model.window_count(),
            columns = model.column_count(),
            focused = model.selected_window(),
            "adopting workspace model"
        );
        self.model = Some(model);
    }

    /// Discard the active model; the workspace is empty again.
    pub fn teardown(&mut self) {
        if self.model.take().is_some() {
            debug!("workspace model torn down");
        }
    }
}
