//! Pushing an adopted model out to the host.
//!
//! Model geometry is work-area relative; the host wants absolute screen
//! coordinates. This is the only place that translation happens.

use scrollgrid_core_model::{Rect, WorkspaceGrid};
use scrollgrid_host::WindowSystem;
use tracing::trace;

/// Apply every cell rectangle of a grid snapshot to the host.
pub fn apply_grid(host: &dyn WindowSystem, grid: &WorkspaceGrid) {
    let origin_x = grid.work_area.x;
    let origin_y = grid.work_area.y;

    for column in &grid.cells {
        for cell in column {
            let absolute = Rect::new(
                origin_x + cell.rect.x,
                origin_y + cell.rect.y,
                cell.rect.width,
                cell.rect.height,
            );
            trace!(window = cell.window, ?absolute, "placing window");
            host.set_frame(cell.window, absolute);
        }
    }
}
