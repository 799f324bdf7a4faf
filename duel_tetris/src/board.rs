use crate::error::{DuelError, Result};
use crate::shapes::{CellType, Shape};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Top-left corner of a shape in board coordinates. `y` may be negative while a
/// piece is still partly above the first row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: isize,
    pub y: isize,
}

impl Position {
    pub fn new(x: isize, y: isize) -> Self {
        Position { x, y }
    }

    pub fn offset(&self, dx: isize, dy: isize) -> Self {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Fixed-size grid of settled cells. The dimensions never change after construction.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Board {
    // Board width
    cols: usize,
    // Board height
    rows: usize,
    // Cells, row by row from the top
    cells: Vec<Vec<CellType>>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(DuelError::InvalidConfig(format!(
                "board must have at least one row and column, got {}x{}",
                rows, cols
            )));
        }
        Ok(Board {
            cols,
            rows,
            cells: vec![vec![CellType::Empty; cols]; rows],
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get_cell(&self, x: usize, y: usize) -> CellType {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(CellType::Empty)
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell_type: CellType) {
        if x >= self.cols || y >= self.rows {
            return;
        }
        self.cells[y][x] = cell_type;
    }

    /// Cells of row `y` from left to right, None past the bottom row
    pub fn row(&self, y: usize) -> Option<&[CellType]> {
        self.cells.get(y).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(CellType::is_empty)
    }

    /// Number of occupied cells in the whole board
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|c| !c.is_empty()).count()
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(CellType::Empty);
        }
    }

    /// True if any occupied cell of `shape` placed at `offset` lies left of column 0,
    /// right of the last column, at or below the bottom row, or over an occupied cell.
    /// Cells above the first row are never checked.
    pub fn collides(&self, shape: &Shape, offset: Position) -> bool {
        shape.filled_cells().any(|(cx, cy, _)| {
            let x = offset.x + cx as isize;
            let y = offset.y + cy as isize;
            if x < 0 || x >= self.cols as isize || y >= self.rows as isize {
                return true;
            }
            y >= 0 && !self.get_cell(x as usize, y as usize).is_empty()
        })
    }

    /// Write every occupied cell of `shape` at `offset`. Cells falling outside of the
    /// board are dropped, no collision check is made.
    pub fn merge(&mut self, shape: &Shape, offset: Position) {
        for (cx, cy, cell) in shape.filled_cells() {
            let x = offset.x + cx as isize;
            let y = offset.y + cy as isize;
            if x >= 0 && y >= 0 {
                self.set_cell(x as usize, y as usize, cell);
            }
        }
    }

    fn is_row_full(&self, y: usize) -> bool {
        self.cells[y].iter().all(|c| !c.is_empty())
    }

    /// Remove every full row, shifting the rows above it down and inserting empty rows
    /// at the top. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        while let Some(y) = (0..self.rows).find(|&y| self.is_row_full(y)) {
            self.cells.remove(y);
            self.cells.insert(0, vec![CellType::Empty; self.cols]);
            cleared += 1;
        }
        cleared
    }

    /// Push `count` garbage rows in from the bottom. Each one drops the top row and
    /// appends a row that is full except for a single hole at a uniformly random column.
    pub fn add_garbage<R: Rng>(&mut self, count: usize, rng: &mut R) {
        for _ in 0..count {
            let hole = rng.random_range(0..self.cols);
            let mut row = vec![CellType::GARBAGE; self.cols];
            row[hole] = CellType::Empty;
            self.cells.remove(0);
            self.cells.push(row);
        }
    }
}
