use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::error::LayoutError;
use crate::placement::{place_axis, PlacementPolicy};
use crate::types::{Cell, Rect, WindowId};

/// Where a newly opened window's column is placed on the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OpenPosition {
    /// Left of the focused column.
    Left,
    /// Right of the focused column.
    #[default]
    Right,
    /// Between the two most-recently-used windows' columns: left of focus
    /// when the most-recent sits right of the second-most-recent, else
    /// right of focus. Falls back to left-of-focus with fewer than two
    /// prior MRU entries.
    BetweenMru,
}

/// Direction of a pure focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Per-operation view of the configuration source and the host's MRU
/// query. Built fresh by the caller for every operation so live setting
/// changes apply from the next operation on.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    /// Placement policy between columns (horizontal).
    pub main_axis: PlacementPolicy,
    /// Placement policy between cells within a column (vertical).
    pub cross_axis: PlacementPolicy,
    /// Where newly opened windows go.
    pub open_position: OpenPosition,
    /// Sliver of the next off-screen item kept visible under lazy-follow,
    /// in pixels.
    pub peek_margin: i32,
    /// MRU-ordered window handles, most recent first. A strict
    /// permutation of the currently open windows.
    pub mru: &'a [WindowId],
}

impl LayoutContext<'_> {
    /// MRU rank of a window; lower is more recent, `usize::MAX` when the
    /// window is absent from the ordering.
    fn rank(&self, window: WindowId) -> usize {
        self.mru
            .iter()
            .position(|&w| w == window)
            .unwrap_or(usize::MAX)
    }

    /// A column ranks as its best (most recent) cell.
    fn column_rank(&self, column: &Column) -> usize {
        column
            .cells()
            .iter()
            .map(|cell| self.rank(cell.window))
            .min()
            .unwrap_or(usize::MAX)
    }
}

/// Read-only projection of a model into nested rectangles, for the view
/// layer to synchronize real window geometry. Recomputed on demand, never
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceGrid {
    /// One cell list per column, in column order.
    pub cells: Vec<Vec<Cell>>,
    /// The work area this grid was computed for.
    pub work_area: Rect,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// The grid snapshot for one workspace: a non-empty ordered sequence of
/// columns, the selected-column index and the active work area.
///
/// Models are immutable: every operation returns a new model or a typed
/// failure, never mutates in place. A model that would become columnless
/// is torn down (`LayoutError::EmptyModel`) instead of being represented
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceModel {
    columns: Vec<Column>,
    selected: usize,
    work_area: Rect,
}

impl WorkspaceModel {
    /// Produce the first model for a workspace: one column containing one
    /// cell sized to the window's frame, relayouted around that window.
    pub fn build(
        window: WindowId,
        frame: Rect,
        work_area: Rect,
        ctx: &LayoutContext,
    ) -> Result<Self, LayoutError> {
        let cell = Cell::new(window, Rect::new(0, 0, frame.width, frame.height));
        let model = Self::rebuilt(vec![Column::single(cell)], 0, work_area);
        model.relayout(window, ctx)
    }

    fn rebuilt(columns: Vec<Column>, selected: usize, work_area: Rect) -> Self {
        debug_assert!(!columns.is_empty(), "model must hold at least one column");
        debug_assert!(selected < columns.len(), "selected column index out of range");
        Self { columns, selected, work_area }
    }

    /// The columns of this model, left to right.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Index of the selected column.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The selected column.
    pub fn selected_column(&self) -> &Column {
        &self.columns[self.selected]
    }

    /// The window at the current focus path (selected column, selected
    /// cell within it).
    pub fn selected_window(&self) -> WindowId {
        self.selected_column().selected_cell().window
    }

    /// The work area this model lays out into.
    pub fn work_area(&self) -> Rect {
        self.work_area
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Total number of managed windows.
    pub fn window_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Whether this model manages `window`.
    pub fn contains_window(&self, window: WindowId) -> bool {
        self.locate(window).is_some()
    }

    /// Column and cell indices of `window`, if managed.
    pub fn locate(&self, window: WindowId) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(col, column)| column.position_of(window).map(|cell| (col, cell)))
    }

    /// Grid snapshot for rendering and view sync. Side-effect free.
    pub fn grid(&self) -> WorkspaceGrid {
        WorkspaceGrid {
            cells: self.columns.iter().map(|c| c.cells().to_vec()).collect(),
            work_area: self.work_area,
        }
    }

    /// The central placement entry point: re-derive all positions around
    /// `window`, which becomes the focus path of the returned model.
    ///
    /// Main-axis placement runs over all columns; cross-axis placement
    /// over the cells of the column holding `window`. Callers only invoke
    /// this for windows known to be in the model, so `WindowNotFound`
    /// here is a caller bug.
    pub fn relayout(&self, window: WindowId, ctx: &LayoutContext) -> Result<Self, LayoutError> {
        let (col_idx, cell_idx) = self
            .locate(window)
            .ok_or(LayoutError::WindowNotFound(window))?;

        let widths: Vec<i32> = self.columns.iter().map(|c| c.rect().width).collect();
        let ranks: Vec<usize> = self.columns.iter().map(|c| ctx.column_rank(c)).collect();
        let xs = place_axis(
            &widths,
            &ranks,
            col_idx,
            self.work_area.width,
            ctx.main_axis,
            ctx.peek_margin,
        );

        let mut columns: Vec<Column> = self
            .columns
            .iter()
            .zip(&xs)
            .map(|(column, &x)| column.at_x(x))
            .collect();
        columns[col_idx] = place_cells(
            &columns[col_idx].with_selected(cell_idx),
            ctx,
            self.work_area.height,
        );

        Ok(Self::rebuilt(columns, col_idx, self.work_area))
    }

    /// Insert a newly opened window as a single-cell column next to the
    /// focused column, then relayout around it.
    pub fn insert_window(
        &self,
        window: WindowId,
        frame: Rect,
        ctx: &LayoutContext,
    ) -> Result<Self, LayoutError> {
        if self.contains_window(window) {
            return Err(LayoutError::WindowAlreadyManaged(window));
        }

        let side = match ctx.open_position {
            OpenPosition::Left => Side::Left,
            OpenPosition::Right => Side::Right,
            OpenPosition::BetweenMru => self.between_mru_side(window, ctx),
        };

        // Seed position: flush against the focused column's edge and
        // vertically centered. The concluding relayout derives the final
        // placement from this.
        let focused_rect = self.selected_column().rect();
        let x = match side {
            Side::Left => focused_rect.x - frame.width,
            Side::Right => focused_rect.right(),
        };
        let y = (self.work_area.height - frame.height) / 2;
        let cell = Cell::new(window, Rect::new(x, y, frame.width, frame.height));

        let insert_at = match side {
            Side::Left => self.selected,
            Side::Right => self.selected + 1,
        };
        let mut columns = self.columns.clone();
        columns.insert(insert_at, Column::single(cell));

        Self::rebuilt(columns, insert_at, self.work_area).relayout(window, ctx)
    }

    /// Between-MRU heuristic: look at the columns of the two
    /// most-recently-used windows already in the model. Most-recent right
    /// of second-most-recent means the user is drifting rightward, so the
    /// new window opens on the left of focus; otherwise on the right.
    fn between_mru_side(&self, inserting: WindowId, ctx: &LayoutContext) -> Side {
        let mut prior = ctx
            .mru
            .iter()
            .filter(|&&w| w != inserting && self.contains_window(w));
        let (Some(&first), Some(&second)) = (prior.next(), prior.next()) else {
            // Zero or one prior MRU entry: conservative left-of-focus.
            return Side::Left;
        };
        match (self.locate(first), self.locate(second)) {
            (Some((a, _)), Some((b, _))) if a > b => Side::Left,
            _ => Side::Right,
        }
    }

    /// Remove a window. Removing the last window tears the model down
    /// (`EmptyModel`); otherwise `new_focus` must name a remaining window
    /// for the concluding relayout.
    pub fn remove_window(
        &self,
        window: WindowId,
        new_focus: Option<WindowId>,
        ctx: &LayoutContext,
    ) -> Result<Self, LayoutError> {
        let (col_idx, cell_idx) = self
            .locate(window)
            .ok_or(LayoutError::WindowNotFound(window))?;

        if self.columns.len() == 1 && self.columns[0].len() == 1 {
            return Err(LayoutError::EmptyModel);
        }
        let new_focus = new_focus.ok_or(LayoutError::NoFocusTarget)?;

        let mut columns = self.columns.clone();
        if columns[col_idx].len() == 1 {
            columns.remove(col_idx);
        } else {
            let column = &columns[col_idx];
            let mut cells = column.cells().to_vec();
            cells.remove(cell_idx);
            let selected = column.selected().min(cells.len() - 1);
            columns[col_idx] = place_cells(
                &Column::new(cells, selected),
                ctx,
                self.work_area.height,
            );
        }

        // Transient selection; the relayout re-derives the focus path.
        let selected = self.selected.min(columns.len() - 1);
        Self::rebuilt(columns, selected, self.work_area).relayout(new_focus, ctx)
    }

    /// Swap the selected column with its left neighbor.
    pub fn move_focused_column_left(&self, ctx: &LayoutContext) -> Result<Self, LayoutError> {
        if self.selected == 0 {
            return Err(LayoutError::NoMovementPossible);
        }
        self.swap_selected_column(self.selected - 1, ctx)
    }

    /// Swap the selected column with its right neighbor.
    pub fn move_focused_column_right(&self, ctx: &LayoutContext) -> Result<Self, LayoutError> {
        if self.selected + 1 >= self.columns.len() {
            return Err(LayoutError::NoMovementPossible);
        }
        self.swap_selected_column(self.selected + 1, ctx)
    }

    fn swap_selected_column(
        &self,
        target: usize,
        ctx: &LayoutContext,
    ) -> Result<Self, LayoutError> {
        let window = self.selected_window();
        let mut columns = self.columns.clone();
        columns.swap(self.selected, target);
        Self::rebuilt(columns, target, self.work_area).relayout(window, ctx)
    }

    /// Swap the selected cell with the one above it.
    pub fn move_focused_cell_up(&self, ctx: &LayoutContext) -> Result<Self, LayoutError> {
        let at = self.selected_column().selected();
        if at == 0 {
            return Err(LayoutError::NoMovementPossible);
        }
        self.swap_selected_cell(at - 1, ctx)
    }

    /// Swap the selected cell with the one below it.
    pub fn move_focused_cell_down(&self, ctx: &LayoutContext) -> Result<Self, LayoutError> {
        let column = self.selected_column();
        let at = column.selected();
        if at + 1 >= column.len() {
            return Err(LayoutError::NoMovementPossible);
        }
        self.swap_selected_cell(at + 1, ctx)
    }

    fn swap_selected_cell(&self, target: usize, ctx: &LayoutContext) -> Result<Self, LayoutError> {
        let column = self.selected_column();
        let mut cells = column.cells().to_vec();
        cells.swap(column.selected(), target);
        let window = cells[target].window;

        let mut columns = self.columns.clone();
        columns[self.selected] = Column::new(cells, target);
        Self::rebuilt(columns, self.selected, self.work_area).relayout(window, ctx)
    }

    /// Relocate the selected cell into the column on the left, creating a
    /// new column when already at the grid edge.
    pub fn move_focused_cell_left(&self, ctx: &LayoutContext) -> Result<Self, LayoutError> {
        self.relocate_selected_cell(Side::Left, ctx)
    }

    /// Relocate the selected cell into the column on the right, creating
    /// a new column when already at the grid edge.
    pub fn move_focused_cell_right(&self, ctx: &LayoutContext) -> Result<Self, LayoutError> {
        self.relocate_selected_cell(Side::Right, ctx)
    }

    fn relocate_selected_cell(
        &self,
        side: Side,
        ctx: &LayoutContext,
    ) -> Result<Self, LayoutError> {
        let src = self.selected;
        let src_column = &self.columns[src];
        let moving = *src_column.selected_cell();

        let at_edge = match side {
            Side::Left => src == 0,
            Side::Right => src + 1 == self.columns.len(),
        };
        // A lone cell moved past the grid edge would recreate the same
        // single-cell column in place.
        if at_edge && src_column.len() == 1 {
            return Err(LayoutError::NoMovementPossible);
        }

        let mut columns = self.columns.clone();
        // Destination column index after any insertion, and the source
        // index shifted by it.
        let (mut dest, src_now) = match (side, at_edge) {
            (Side::Left, true) => {
                columns.insert(0, Column::single(moving));
                (0, src + 1)
            }
            (Side::Left, false) => {
                columns[src - 1] = append_cell(&columns[src - 1], moving);
                (src - 1, src)
            }
            (Side::Right, true) => {
                columns.push(Column::single(moving));
                (src + 1, src)
            }
            (Side::Right, false) => {
                columns[src + 1] = append_cell(&columns[src + 1], moving);
                (src + 1, src)
            }
        };

        // Detach the moved cell from its old column; drop the column when
        // that was its last cell.
        if columns[src_now].len() == 1 {
            columns.remove(src_now);
            if dest > src_now {
                dest -= 1;
            }
        } else {
            let column = &columns[src_now];
            let mut cells = column.cells().to_vec();
            cells.remove(column.selected());
            let selected = column.selected().min(cells.len() - 1);
            columns[src_now] = place_cells(
                &Column::new(cells, selected),
                ctx,
                self.work_area.height,
            );
        }

        Self::rebuilt(columns, dest, self.work_area).relayout(moving.window, ctx)
    }

    /// Reserved for cross-workspace movement, which this engine does not
    /// implement.
    pub fn move_focused_column_up(&self) -> Result<Self, LayoutError> {
        Err(LayoutError::NoActionTarget)
    }

    /// Reserved for cross-workspace movement, which this engine does not
    /// implement.
    pub fn move_focused_column_down(&self) -> Result<Self, LayoutError> {
        Err(LayoutError::NoActionTarget)
    }

    /// Pure focus query: the window that should take input focus when
    /// focus moves in `direction` from the current focus path. The model
    /// itself is unchanged; the host's focus-change notification drives
    /// the eventual relayout.
    pub fn focus_target(&self, direction: FocusDirection) -> Result<WindowId, LayoutError> {
        match direction {
            FocusDirection::Left => {
                let target = self
                    .selected
                    .checked_sub(1)
                    .ok_or(LayoutError::NoActionTarget)?;
                Ok(self.columns[target].selected_cell().window)
            }
            FocusDirection::Right => {
                let target = self.selected + 1;
                if target >= self.columns.len() {
                    return Err(LayoutError::NoActionTarget);
                }
                Ok(self.columns[target].selected_cell().window)
            }
            FocusDirection::Up => {
                let column = self.selected_column();
                let target = column
                    .selected()
                    .checked_sub(1)
                    .ok_or(LayoutError::NoActionTarget)?;
                Ok(column.cells()[target].window)
            }
            FocusDirection::Down => {
                let column = self.selected_column();
                let target = column.selected() + 1;
                if target >= column.len() {
                    return Err(LayoutError::NoActionTarget);
                }
                Ok(column.cells()[target].window)
            }
        }
    }
}

/// Cross-axis placement for one column's cells around its selected cell.
fn place_cells(column: &Column, ctx: &LayoutContext, extent: i32) -> Column {
    let heights: Vec<i32> = column.cells().iter().map(|c| c.rect.height).collect();
    let ranks: Vec<usize> = column.cells().iter().map(|c| ctx.rank(c.window)).collect();
    let ys = place_axis(
        &heights,
        &ranks,
        column.selected(),
        extent,
        ctx.cross_axis,
        ctx.peek_margin,
    );
    let cells = column
        .cells()
        .iter()
        .zip(&ys)
        .map(|(cell, &y)| cell.at(cell.rect.x, y))
        .collect();
    Column::new(cells, column.selected())
}

fn append_cell(column: &Column, cell: Cell) -> Column {
    let mut cells = column.cells().to_vec();
    cells.push(cell);
    let selected = cells.len() - 1;
    Column::new(cells, selected)
}
