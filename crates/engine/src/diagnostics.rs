//! Debug snapshots of pipeline state.

use anyhow::{Context, Result};
use scrollgrid_core_model::WorkspaceGrid;
use serde::Serialize;

use crate::intent::Intent;
use crate::processor::EventProcessor;

/// Serializable view of what the pipeline was recently doing.
#[derive(Debug, Serialize)]
pub struct DiagnosticsSnapshot<'a> {
    /// Trailing intents, oldest first.
    pub recent_intents: &'a [Intent],
    /// Grid projection of the active model, if any.
    pub grid: Option<WorkspaceGrid>,
}

/// Capture the processor's current state.
pub fn snapshot(processor: &EventProcessor) -> DiagnosticsSnapshot<'_> {
    DiagnosticsSnapshot {
        recent_intents: processor.recent_intents(),
        grid: processor.model().map(|model| model.grid()),
    }
}

/// Render a snapshot as pretty-printed JSON, for logs or bug reports.
pub fn render(processor: &EventProcessor) -> Result<String> {
    serde_json::to_string_pretty(&snapshot(processor))
        .context("failed to serialize diagnostics snapshot")
}
