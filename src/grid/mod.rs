mod errors;
mod loader;

use crate::types::Cell;

pub use errors::GridError;
pub use loader::{load_grid, load_grid_from_bytes};

/// Read-only rectangular view over the first worksheet of a statement.
///
/// Rows may be ragged when built by hand; missing cells read as `Cell::Empty`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    /// Zero-based worksheet row of `rows[0]`, used when reporting row numbers.
    origin: usize
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows, origin: 0 }
    }

    pub fn with_origin(mut self, origin: usize) -> Self {
        self.origin = origin;
        self
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> &[Cell] {
        self.rows.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cell(&self, index: usize, column: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.row(index).get(column).unwrap_or(&EMPTY)
    }

    /// One-based worksheet row number of a grid row, as a user would see it.
    pub fn display_row(&self, index: usize) -> usize {
        self.origin + index + 1
    }

    /// Non-blank cells of a row joined by single spaces.
    pub fn row_text(&self, index: usize) -> String {
        self.row(index).iter()
            .filter(|cell| !cell.is_blank())
            .map(Cell::as_text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_blank_row(&self, index: usize) -> bool {
        self.row(index).iter().all(Cell::is_blank)
    }
}
