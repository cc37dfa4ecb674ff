use serde::{Deserialize, Serialize};

use crate::types::{Cell, Rect, WindowId};

/// A vertical stack of cells; the unit of the horizontal axis.
///
/// Columns are immutable and always non-empty with a valid selection; a
/// column whose last cell goes away is removed from the model rather than
/// represented empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    cells: Vec<Cell>,
    selected: usize,
}

impl Column {
    /// Create a column from cells and a selected index.
    pub fn new(cells: Vec<Cell>, selected: usize) -> Self {
        debug_assert!(!cells.is_empty(), "column must hold at least one cell");
        debug_assert!(selected < cells.len(), "selected cell index out of range");
        Self { cells, selected }
    }

    /// Create a column holding a single cell.
    pub fn single(cell: Cell) -> Self {
        Self { cells: vec![cell], selected: 0 }
    }

    /// The cells of this column, top to bottom.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Index of the selected cell.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The selected cell.
    pub fn selected_cell(&self) -> &Cell {
        &self.cells[self.selected]
    }

    /// Number of cells in this column.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; kept for idiomatic pairing with `len`.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of the cell holding `window`, if any.
    pub fn position_of(&self, window: WindowId) -> Option<usize> {
        self.cells.iter().position(|cell| cell.window == window)
    }

    /// Bounding rectangle derived from the member cells: top-left is the
    /// minimum over cells, width the maximum cell width, height the sum
    /// of cell heights (vertical stack).
    pub fn rect(&self) -> Rect {
        let mut x = i32::MAX;
        let mut y = i32::MAX;
        let mut width = 0;
        let mut height = 0;
        for cell in &self.cells {
            x = x.min(cell.rect.x);
            y = y.min(cell.rect.y);
            width = width.max(cell.rect.width);
            height += cell.rect.height;
        }
        Rect::new(x, y, width, height)
    }

    /// Copy of this column with a different selected index.
    pub fn with_selected(&self, selected: usize) -> Self {
        Self::new(self.cells.clone(), selected)
    }

    /// Copy of this column with every cell moved to `x`, keeping each
    /// cell's vertical position and size.
    pub fn at_x(&self, x: i32) -> Self {
        let cells = self.cells.iter().map(|cell| cell.at(x, cell.rect.y)).collect();
        Self::new(cells, self.selected)
    }
}
