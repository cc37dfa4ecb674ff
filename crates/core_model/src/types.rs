use serde::{Deserialize, Serialize};

/// Unique identifier for a window, supplied by the host shell.
/// The model never dereferences it; identity equality is all it needs.
pub type WindowId = u64;

/// A rectangle relative to the work-area origin, in pixels.
/// Coordinates may be negative (off-screen placements are normal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Check if this rectangle intersects with another.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// One window slot with its placed rectangle, inside a column.
///
/// Cells are immutable: every placement change produces a fresh cell.
/// A cell is owned by exactly one column; moving a window between columns
/// drops the old cell and creates a new one carrying the same handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The window this cell places.
    pub window: WindowId,
    /// The placed rectangle, relative to the work-area origin.
    pub rect: Rect,
}

impl Cell {
    /// Create a cell for a window at the given rectangle.
    pub fn new(window: WindowId, rect: Rect) -> Self {
        Self { window, rect }
    }

    /// Copy of this cell with a different rectangle.
    pub fn with_rect(&self, rect: Rect) -> Self {
        Self { window: self.window, rect }
    }

    /// Copy of this cell moved to a new position, size unchanged.
    pub fn at(&self, x: i32, y: i32) -> Self {
        self.with_rect(Rect::new(x, y, self.rect.width, self.rect.height))
    }
}
