use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// Fixed layout of the square playing field and its mapping to display
/// coordinates
///
/// A display coordinate is measured in renderer units (terminal columns and
/// rows for the TUI) from the top-left corner of the board, margin included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Number of cells along each side of the grid
    pub cell_count: i32,
    /// Display width of a single cell
    pub cell_width: u16,
    /// Display height of a single cell
    pub cell_height: u16,
    /// Display units between the board edge and the first cell
    pub margin: u16,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            cell_count: 25,
            cell_width: 2,
            cell_height: 1,
            margin: 1,
        }
    }
}

impl GridGeometry {
    pub fn new(cell_count: i32, cell_width: u16, cell_height: u16, margin: u16) -> Self {
        Self {
            cell_count,
            cell_width,
            cell_height,
            margin,
        }
    }

    /// Check if a cell lies on the grid
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.cell_count).contains(&cell.x) && (0..self.cell_count).contains(&cell.y)
    }

    /// Total number of cells on the grid
    pub fn area(&self) -> usize {
        let side = self.cell_count.max(0) as usize;
        side * side
    }

    /// All on-grid cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let count = self.cell_count;
        (0..count).flat_map(move |y| (0..count).map(move |x| Cell::new(x, y)))
    }

    /// Top-left display position of a cell, or `None` if the cell is off-grid
    pub fn to_display(&self, cell: Cell) -> Option<(u16, u16)> {
        if !self.contains(cell) {
            return None;
        }
        let x = u16::try_from(cell.x).ok()?;
        let y = u16::try_from(cell.y).ok()?;
        Some((
            self.margin.saturating_add(x.saturating_mul(self.cell_width)),
            self.margin.saturating_add(y.saturating_mul(self.cell_height)),
        ))
    }

    /// Width and height of the whole board including both margins
    ///
    /// Saturates at `u16::MAX` rather than overflowing.
    pub fn display_size(&self) -> (u16, u16) {
        let count = u16::try_from(self.cell_count.max(0)).unwrap_or(u16::MAX);
        let extent = |cell: u16| {
            self.margin
                .saturating_mul(2)
                .saturating_add(count.saturating_mul(cell))
        };
        (extent(self.cell_width), extent(self.cell_height))
    }
}
