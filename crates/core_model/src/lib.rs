//! Scrollgrid core model
//!
//! Immutable two-axis (column × cell) workspace layout model for a
//! scrolling tiling shell. The model holds the grid snapshot for one
//! workspace; placement re-derives every position whenever focus,
//! membership or ordering changes, and every mutation returns a fresh
//! model or a typed failure. Nothing here touches the host: window
//! handles are opaque ids, frames and MRU ordering come in through
//! [`LayoutContext`], and the caller pushes the resulting [`WorkspaceGrid`]
//! back out to real windows.

mod column;
mod error;
mod placement;
mod types;

mod model;

pub use column::Column;
pub use error::LayoutError;
pub use model::{FocusDirection, LayoutContext, OpenPosition, WorkspaceGrid, WorkspaceModel};
pub use placement::PlacementPolicy;
pub use types::{Cell, Rect, WindowId};

#[cfg(test)]
mod tests {
    use super::*;

    const WORK_AREA: Rect = Rect { x: 0, y: 0, width: 1000, height: 1000 };

    fn ctx(mru: &[WindowId]) -> LayoutContext<'_> {
        LayoutContext {
            main_axis: PlacementPolicy::Center,
            cross_axis: PlacementPolicy::Center,
            open_position: OpenPosition::Right,
            peek_margin: 0,
            mru,
        }
    }

    fn frame(w: i32, h: i32) -> Rect {
        Rect::new(0, 0, w, h)
    }

    fn cell_rect(model: &WorkspaceModel, window: WindowId) -> Rect {
        let (col, cell) = model.locate(window).expect("window in model");
        model.columns()[col].cells()[cell].rect
    }

    /// No two columns share horizontal extent, no two cells in a column
    /// share vertical extent.
    fn assert_no_overlap(model: &WorkspaceModel) {
        let rects: Vec<Rect> = model.columns().iter().map(|c| c.rect()).collect();
        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                assert!(
                    a.right() <= b.x || b.right() <= a.x,
                    "columns overlap: {a:?} vs {b:?}"
                );
            }
        }
        for column in model.columns() {
            let cells = column.cells();
            for (i, a) in cells.iter().enumerate() {
                for b in cells.iter().skip(i + 1) {
                    assert!(
                        a.rect.bottom() <= b.rect.y || b.rect.bottom() <= a.rect.y,
                        "cells overlap: {a:?} vs {b:?}"
                    );
                }
            }
        }
    }

    fn assert_invariants(model: &WorkspaceModel) {
        assert!(model.column_count() >= 1);
        assert!(model.selected() < model.column_count());
        for column in model.columns() {
            assert!(column.len() >= 1);
            assert!(column.selected() < column.len());
        }
    }

    #[test]
    fn build_centers_first_window() {
        let model = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &ctx(&[1])).unwrap();
        assert_eq!(cell_rect(&model, 1), Rect::new(450, 450, 100, 100));
        assert_eq!(model.selected_window(), 1);
        assert_invariants(&model);
    }

    #[test]
    fn insert_then_remove_restores_geometry() {
        // One 100×100 window centered, insert a second to its right, then
        // remove it again focusing back: geometry must return exactly.
        let c = ctx(&[1]);
        let before = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &c).unwrap();
        assert_eq!(cell_rect(&before, 1), Rect::new(450, 450, 100, 100));

        let mru = [2, 1];
        let with_b = before.insert_window(2, frame(100, 100), &ctx(&mru)).unwrap();
        assert_eq!(with_b.column_count(), 2);
        // B is centered (midpoint x = 500), A shifted left flush.
        assert_eq!(cell_rect(&with_b, 2), Rect::new(450, 450, 100, 100));
        assert_eq!(cell_rect(&with_b, 1), Rect::new(350, 450, 100, 100));
        assert_no_overlap(&with_b);

        let after = with_b.remove_window(2, Some(1), &ctx(&[1])).unwrap();
        assert_eq!(cell_rect(&after, 1), Rect::new(450, 450, 100, 100));
        assert_eq!(after.grid(), before.grid());
    }

    #[test]
    fn relayout_is_idempotent() {
        let c = ctx(&[3, 2, 1]);
        let model = WorkspaceModel::build(1, frame(300, 400), WORK_AREA, &c)
            .and_then(|m| m.insert_window(2, frame(250, 500), &c))
            .and_then(|m| m.insert_window(3, frame(400, 300), &c))
            .unwrap();

        let once = model.relayout(2, &c).unwrap();
        let twice = once.relayout(2, &c).unwrap();
        assert_eq!(once.grid(), twice.grid());
    }

    #[test]
    fn relayout_unknown_window_is_a_caller_bug() {
        let c = ctx(&[1]);
        let model = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &c).unwrap();
        let err = model.relayout(99, &c).unwrap_err();
        assert_eq!(err, LayoutError::WindowNotFound(99));
        assert!(!err.is_expected());
    }

    #[test]
    fn insert_rejects_managed_window() {
        let c = ctx(&[1]);
        let model = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &c).unwrap();
        assert_eq!(
            model.insert_window(1, frame(100, 100), &c).unwrap_err(),
            LayoutError::WindowAlreadyManaged(1)
        );
    }

    #[test]
    fn insert_left_of_focus() {
        let mut c = ctx(&[2, 1]);
        c.open_position = OpenPosition::Left;
        let model = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &ctx(&[1]))
            .and_then(|m| m.insert_window(2, frame(100, 100), &c))
            .unwrap();

        assert_eq!(model.locate(2), Some((0, 0)));
        assert_eq!(model.locate(1), Some((1, 0)));
        assert_eq!(model.selected_window(), 2);
    }

    #[test]
    fn between_mru_falls_back_left_with_one_prior_window() {
        let mut c = ctx(&[2, 1]);
        c.open_position = OpenPosition::BetweenMru;
        let model = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &ctx(&[1]))
            .and_then(|m| m.insert_window(2, frame(100, 100), &c))
            .unwrap();

        // Only one prior MRU entry: left of focus.
        assert_eq!(model.locate(2), Some((0, 0)));
    }

    #[test]
    fn between_mru_inserts_left_when_drifting_right() {
        // Columns [1, 2], focus on 2 (rightmost), MRU = [2, 1]: the
        // most-recent column is right of the second-most-recent, so a new
        // window opens left of focus.
        let c = ctx(&[2, 1]);
        let two = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &ctx(&[1]))
            .and_then(|m| m.insert_window(2, frame(100, 100), &c))
            .unwrap();
        assert_eq!(two.locate(2), Some((1, 0)));

        let mut c3 = ctx(&[3, 2, 1]);
        c3.open_position = OpenPosition::BetweenMru;
        let three = two.insert_window(3, frame(100, 100), &c3).unwrap();

        // Column order becomes [1, 3, 2].
        assert_eq!(three.locate(1), Some((0, 0)));
        assert_eq!(three.locate(3), Some((1, 0)));
        assert_eq!(three.locate(2), Some((2, 0)));
    }

    #[test]
    fn between_mru_inserts_right_when_drifting_left() {
        // Columns [1, 2] with focus moved back to 1, MRU = [1, 2]: the
        // most-recent column is left of the second-most-recent.
        let c = ctx(&[2, 1]);
        let two = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &ctx(&[1]))
            .and_then(|m| m.insert_window(2, frame(100, 100), &c))
            .and_then(|m| m.relayout(1, &ctx(&[1, 2])))
            .unwrap();
        assert_eq!(two.selected_window(), 1);

        let mut c3 = ctx(&[3, 1, 2]);
        c3.open_position = OpenPosition::BetweenMru;
        let three = two.insert_window(3, frame(100, 100), &c3).unwrap();

        // Column order becomes [1, 3, 2]: right of the focused column 1.
        assert_eq!(three.locate(1), Some((0, 0)));
        assert_eq!(three.locate(3), Some((1, 0)));
        assert_eq!(three.locate(2), Some((2, 0)));
    }

    #[test]
    fn remove_last_window_tears_model_down() {
        let c = ctx(&[1]);
        let model = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &c).unwrap();
        assert_eq!(
            model.remove_window(1, None, &c).unwrap_err(),
            LayoutError::EmptyModel
        );
    }

    #[test]
    fn remove_requires_focus_target_with_windows_remaining() {
        let c = ctx(&[2, 1]);
        let model = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &ctx(&[1]))
            .and_then(|m| m.insert_window(2, frame(100, 100), &c))
            .unwrap();
        assert_eq!(
            model.remove_window(2, None, &c).unwrap_err(),
            LayoutError::NoFocusTarget
        );
    }

    #[test]
    fn remove_cell_from_stacked_column_keeps_column() {
        let c = ctx(&[3, 2, 1]);
        let model = WorkspaceModel::build(1, frame(300, 300), WORK_AREA, &c)
            .and_then(|m| m.insert_window(2, frame(300, 300), &c))
            .and_then(|m| m.move_focused_cell_left(&c))
            .unwrap();
        // 1 and 2 now share a column.
        assert_eq!(model.column_count(), 1);
        assert_eq!(model.columns()[0].len(), 2);

        let insert3 = model.insert_window(3, frame(300, 300), &c).unwrap();
        let after = insert3.remove_window(2, Some(1), &ctx(&[1, 3])).unwrap();

        assert_eq!(after.column_count(), 2);
        assert!(!after.contains_window(2));
        assert_eq!(after.selected_window(), 1);
        assert_invariants(&after);
        assert_no_overlap(&after);
    }

    #[test]
    fn move_column_left_at_edge_fails() {
        let c = ctx(&[1]);
        let model = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &c).unwrap();
        assert_eq!(
            model.move_focused_column_left(&c).unwrap_err(),
            LayoutError::NoMovementPossible
        );
    }

    #[test]
    fn move_column_right_swaps_neighbors() {
        let c = ctx(&[2, 1]);
        let model = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &ctx(&[1]))
            .and_then(|m| m.insert_window(2, frame(100, 100), &c))
            .and_then(|m| m.relayout(1, &ctx(&[1, 2])))
            .unwrap();
        assert_eq!(model.locate(1), Some((0, 0)));

        let moved = model.move_focused_column_right(&ctx(&[1, 2])).unwrap();
        assert_eq!(moved.locate(1), Some((1, 0)));
        assert_eq!(moved.locate(2), Some((0, 0)));
        assert_eq!(moved.selected_window(), 1);

        assert_eq!(
            moved.move_focused_column_right(&ctx(&[1, 2])).unwrap_err(),
            LayoutError::NoMovementPossible
        );
    }

    #[test]
    fn move_cell_up_down_within_column() {
        let c = ctx(&[2, 1]);
        let model = WorkspaceModel::build(1, frame(300, 300), WORK_AREA, &ctx(&[1]))
            .and_then(|m| m.insert_window(2, frame(300, 300), &c))
            .and_then(|m| m.move_focused_cell_left(&c))
            .unwrap();
        // Column [1, 2] with 2 selected (appended last).
        assert_eq!(model.locate(2), Some((0, 1)));

        let up = model.move_focused_cell_up(&c).unwrap();
        assert_eq!(up.locate(2), Some((0, 0)));
        assert_eq!(up.locate(1), Some((0, 1)));
        assert_eq!(up.selected_window(), 2);
        assert_eq!(
            up.move_focused_cell_up(&c).unwrap_err(),
            LayoutError::NoMovementPossible
        );

        let down = up.move_focused_cell_down(&c).unwrap();
        assert_eq!(down.locate(2), Some((0, 1)));
        assert_eq!(
            down.move_focused_cell_down(&c).unwrap_err(),
            LayoutError::NoMovementPossible
        );
    }

    #[test]
    fn move_cell_left_merges_into_neighbor() {
        let c = ctx(&[2, 1]);
        let model = WorkspaceModel::build(1, frame(300, 300), WORK_AREA, &ctx(&[1]))
            .and_then(|m| m.insert_window(2, frame(300, 300), &c))
            .unwrap();
        assert_eq!(model.column_count(), 2);

        let merged = model.move_focused_cell_left(&c).unwrap();
        assert_eq!(merged.column_count(), 1);
        assert_eq!(merged.locate(1), Some((0, 0)));
        assert_eq!(merged.locate(2), Some((0, 1)));
        assert_eq!(merged.selected_window(), 2);
        assert_no_overlap(&merged);
    }

    #[test]
    fn move_cell_right_out_of_stack_creates_column() {
        let c = ctx(&[2, 1]);
        let stacked = WorkspaceModel::build(1, frame(300, 300), WORK_AREA, &ctx(&[1]))
            .and_then(|m| m.insert_window(2, frame(300, 300), &c))
            .and_then(|m| m.move_focused_cell_left(&c))
            .unwrap();
        assert_eq!(stacked.column_count(), 1);

        let split = stacked.move_focused_cell_right(&c).unwrap();
        assert_eq!(split.column_count(), 2);
        assert_eq!(split.locate(1), Some((0, 0)));
        assert_eq!(split.locate(2), Some((1, 0)));
        assert_eq!(split.selected_window(), 2);
    }

    #[test]
    fn move_lone_cell_past_edge_fails() {
        let c = ctx(&[1]);
        let model = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &c).unwrap();
        assert_eq!(
            model.move_focused_cell_left(&c).unwrap_err(),
            LayoutError::NoMovementPossible
        );
        assert_eq!(
            model.move_focused_cell_right(&c).unwrap_err(),
            LayoutError::NoMovementPossible
        );
    }

    #[test]
    fn column_up_down_are_reserved() {
        let c = ctx(&[1]);
        let model = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &c).unwrap();
        assert_eq!(
            model.move_focused_column_up().unwrap_err(),
            LayoutError::NoActionTarget
        );
        assert_eq!(
            model.move_focused_column_down().unwrap_err(),
            LayoutError::NoActionTarget
        );
    }

    #[test]
    fn focus_target_neighbors() {
        let c = ctx(&[2, 1]);
        let model = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &ctx(&[1]))
            .and_then(|m| m.insert_window(2, frame(100, 100), &c))
            .unwrap();
        // Focus on column of 2 (index 1).
        assert_eq!(model.focus_target(FocusDirection::Left), Ok(1));
        assert_eq!(
            model.focus_target(FocusDirection::Right),
            Err(LayoutError::NoActionTarget)
        );
        assert_eq!(
            model.focus_target(FocusDirection::Up),
            Err(LayoutError::NoActionTarget)
        );
        assert_eq!(
            model.focus_target(FocusDirection::Down),
            Err(LayoutError::NoActionTarget)
        );
    }

    #[test]
    fn focus_target_within_column() {
        let c = ctx(&[2, 1]);
        let stacked = WorkspaceModel::build(1, frame(300, 300), WORK_AREA, &ctx(&[1]))
            .and_then(|m| m.insert_window(2, frame(300, 300), &c))
            .and_then(|m| m.move_focused_cell_left(&c))
            .unwrap();
        // Column [1, 2] with 2 selected.
        assert_eq!(stacked.focus_target(FocusDirection::Up), Ok(1));
        assert_eq!(
            stacked.focus_target(FocusDirection::Down),
            Err(LayoutError::NoActionTarget)
        );
    }

    #[test]
    fn centering_symmetry_for_mixed_widths() {
        let c = ctx(&[4, 3, 2, 1]);
        let model = WorkspaceModel::build(1, frame(150, 200), WORK_AREA, &c)
            .and_then(|m| m.insert_window(2, frame(420, 350), &c))
            .and_then(|m| m.insert_window(3, frame(90, 600), &c))
            .and_then(|m| m.insert_window(4, frame(333, 100), &c))
            .unwrap();

        for window in 1..=4 {
            let laid = model.relayout(window, &c).unwrap();
            let (col, _) = laid.locate(window).unwrap();
            let rect = laid.columns()[col].rect();
            // Selected column midpoint at work-area midpoint (integer
            // division tolerance of one pixel).
            let mid = rect.x + rect.width / 2;
            assert!((mid - 500).abs() <= 1, "window {window}: midpoint {mid}");
            // Neighbors chained with zero gap.
            for pair in laid.columns().windows(2) {
                assert_eq!(pair[0].rect().right(), pair[1].rect().x);
            }
            assert_no_overlap(&laid);
            assert_invariants(&laid);
        }
    }

    #[test]
    fn lazy_follow_keeps_visible_run_within_work_area() {
        let mru = [3, 4, 2, 5, 1];
        let mut c = ctx(&mru);
        c.main_axis = PlacementPolicy::LazyFollow;
        c.peek_margin = 30;

        let model = WorkspaceModel::build(1, frame(400, 500), WORK_AREA, &c)
            .and_then(|m| m.insert_window(2, frame(350, 500), &c))
            .and_then(|m| m.insert_window(3, frame(450, 500), &c))
            .and_then(|m| m.insert_window(4, frame(300, 500), &c))
            .and_then(|m| m.insert_window(5, frame(380, 500), &c))
            .unwrap();

        let laid = model.relayout(3, &c).unwrap();
        let fully_visible: i32 = laid
            .columns()
            .iter()
            .map(|col| col.rect())
            .filter(|r| r.x >= 0 && r.right() <= WORK_AREA.width)
            .map(|r| r.width)
            .sum();
        assert!(fully_visible <= WORK_AREA.width);
        assert_no_overlap(&laid);
    }

    #[test]
    fn invariants_hold_across_operation_sequences() {
        let mru = [5, 4, 3, 2, 1];
        let c = ctx(&mru);
        let mut model = WorkspaceModel::build(1, frame(200, 200), WORK_AREA, &c).unwrap();
        for (window, size) in [(2, 300), (3, 150), (4, 500), (5, 250)] {
            model = model.insert_window(window, frame(size, size), &c).unwrap();
            assert_invariants(&model);
            assert_no_overlap(&model);
        }

        model = model.move_focused_cell_left(&c).unwrap();
        assert_invariants(&model);
        model = model.move_focused_column_left(&c).unwrap();
        assert_invariants(&model);
        model = model.move_focused_cell_right(&c).unwrap();
        assert_invariants(&model);
        model = model.remove_window(3, Some(5), &c).unwrap();
        assert_invariants(&model);
        assert_no_overlap(&model);
        assert_eq!(model.window_count(), 4);
    }

    #[test]
    fn grid_projection_matches_columns() {
        let c = ctx(&[2, 1]);
        let model = WorkspaceModel::build(1, frame(100, 100), WORK_AREA, &ctx(&[1]))
            .and_then(|m| m.insert_window(2, frame(100, 100), &c))
            .unwrap();
        let grid = model.grid();
        assert_eq!(grid.cells.len(), 2);
        assert_eq!(grid.work_area, WORK_AREA);
        assert_eq!(grid.cells[1][0].window, 2);
        assert_eq!(grid.cells[1][0].rect, cell_rect(&model, 2));
    }
}
