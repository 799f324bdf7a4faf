use crate::board::{Board, Position};
use crate::shapes::{Shape, rotate_clockwise};
use serde::{Deserialize, Serialize};

/// The falling piece: current orientation plus the board position of its top-left corner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePiece {
    shape: Shape,
    origin: Position,
}

impl ActivePiece {
    pub fn new(shape: Shape, origin: Position) -> Self {
        ActivePiece { shape, origin }
    }

    /// Place `shape` horizontally centered on the first row of a `cols` wide board
    pub fn spawn(shape: Shape, cols: usize) -> Self {
        let x = (cols / 2) as isize - (shape.width() / 2) as isize;
        ActivePiece {
            shape,
            origin: Position::new(x, 0),
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn width(&self) -> usize {
        self.shape.width()
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.origin)
    }

    /// Shift horizontally by `delta_x`, clamped so the bounding box stays inside the board.
    /// Returns false, leaving the piece in place, if the target is occupied.
    pub fn try_shift(&mut self, delta_x: isize, board: &Board) -> bool {
        let max_x = board.cols() as isize - self.width() as isize;
        let new_x = (self.origin.x + delta_x).min(max_x).max(0);
        let target = self.origin.offset(new_x - self.origin.x, 0);
        if board.collides(&self.shape, target) {
            return false;
        }
        self.origin = target;
        true
    }

    /// Rotate in place. There is no kick search: a rotation that collides at the
    /// current origin is discarded.
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let rotated = rotate_clockwise(&self.shape);
        if board.collides(&rotated, self.origin) {
            return false;
        }
        self.shape = rotated;
        true
    }

    /// Move one row down. On collision the move is undone and false is returned.
    pub fn try_fall(&mut self, board: &Board) -> bool {
        let target = self.origin.offset(0, 1);
        if board.collides(&self.shape, target) {
            return false;
        }
        self.origin = target;
        true
    }

    /// Write the piece into `board` at its current position
    pub fn draw(&self, board: &mut Board) {
        board.merge(&self.shape, self.origin);
    }
}
