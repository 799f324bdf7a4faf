use crate::error::{DuelError, Result};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Content of a single board or shape cell. `Empty` is the only unoccupied value,
/// the other variants are the seven piece colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    Empty = 0,
    Red,
    Green,
    Blue,
    Orange,
    Yellow,
    Purple,
    Cyan,
}

impl CellType {
    /// Color used for garbage rows
    pub const GARBAGE: CellType = CellType::Red;

    pub fn from_id(id: u8) -> Option<CellType> {
        match id {
            0 => Some(CellType::Empty),
            1 => Some(CellType::Red),
            2 => Some(CellType::Green),
            3 => Some(CellType::Blue),
            4 => Some(CellType::Orange),
            5 => Some(CellType::Yellow),
            6 => Some(CellType::Purple),
            7 => Some(CellType::Cyan),
            _ => None,
        }
    }

    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn is_empty(&self) -> bool {
        *self == CellType::Empty
    }
}

/// Immutable rectangular cell grid of one piece orientation.
///
/// A shape always has at least one occupied cell. Cells are stored row by row,
/// `x` is the column and `y` the row, both counted from the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    width: usize,
    height: usize,
    cells: Vec<CellType>,
}

impl Shape {
    /// Build a shape from rows of color ids (0 = empty, 1..=7 = color)
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Shape> {
        let Some(first) = rows.first() else {
            return Err(DuelError::InvalidShape("shape has no rows".to_string()));
        };
        let width = first.as_ref().len();
        if width == 0 {
            return Err(DuelError::InvalidShape("shape has no columns".to_string()));
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(DuelError::InvalidShape(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            for &id in row {
                let cell = CellType::from_id(id).ok_or_else(|| {
                    DuelError::InvalidShape(format!("unknown color id {} in row {}", id, y))
                })?;
                cells.push(cell);
            }
        }
        if cells.iter().all(CellType::is_empty) {
            return Err(DuelError::InvalidShape(
                "shape has no occupied cell".to_string(),
            ));
        }
        Ok(Shape {
            width,
            height: rows.len(),
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get_cell(&self, x: usize, y: usize) -> CellType {
        if x >= self.width || y >= self.height {
            return CellType::Empty;
        }
        self.cells[y * self.width + x]
    }

    /// Occupied cells as `(x, y, cell)` triples
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, CellType)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(move |(i, cell)| (i % self.width, i / self.width, *cell))
    }

    /// Rows of color ids, the inverse of `from_rows`
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(CellType::id).collect())
            .collect()
    }

    pub fn rotate_clockwise(&self) -> Shape {
        rotate_clockwise(self)
    }
}

/// Quarter turn of `shape`. A `H x W` shape becomes `W x H`, the cell at new
/// column `x`, row `y` is the old cell at column `W - 1 - y`, row `x`.
pub fn rotate_clockwise(shape: &Shape) -> Shape {
    let mut cells = Vec::with_capacity(shape.cells.len());
    for y in 0..shape.width {
        for x in 0..shape.height {
            cells.push(shape.get_cell(shape.width - 1 - y, x));
        }
    }
    Shape {
        width: shape.height,
        height: shape.width,
        cells,
    }
}

const CATALOGUE: [&[&[u8]]; 7] = [
    &[&[1, 1, 1], &[0, 1, 0]],
    &[&[0, 2, 2], &[2, 2, 0]],
    &[&[3, 3, 0], &[0, 3, 3]],
    &[&[4, 0, 0], &[4, 4, 4]],
    &[&[0, 0, 5], &[5, 5, 5]],
    &[&[6, 6, 6, 6]],
    &[&[7, 7], &[7, 7]],
];

static SHAPES: LazyLock<Vec<Shape>> = LazyLock::new(|| {
    CATALOGUE
        .iter()
        .map(|rows| {
            let width = rows[0].len();
            let cells = rows
                .iter()
                .flat_map(|row| row.iter())
                .map(|&id| CellType::from_id(id).unwrap_or_default())
                .collect();
            Shape {
                width,
                height: rows.len(),
                cells,
            }
        })
        .collect()
});

/// The seven tetrominoes, in catalogue order (T, S, Z, J, L, I, O)
pub fn all_shapes() -> &'static [Shape] {
    &SHAPES
}

/// Longest side of any catalogue shape in any orientation
pub fn max_extent() -> usize {
    all_shapes()
        .iter()
        .map(|shape| shape.width().max(shape.height()))
        .max()
        .unwrap_or(0)
}
