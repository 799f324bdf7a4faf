use crate::board::Board;
use crate::error::Result;
use crate::piece::ActivePiece;
use crate::shapes::all_shapes;
use crate::state::{PieceState, SessionState};
use crate::types::PlayerId;
use rand::Rng;

/// Outcome of one gravity step
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DropResult {
    // Session is over, nothing happened
    Ignored,
    // Piece moved one row down
    Fell,
    // Piece was merged into the board and a new one spawned
    Locked { lines_cleared: usize, game_over: bool },
}

/// One player's board, falling piece and transient flags
pub struct PlayerSession {
    player: PlayerId,
    board: Board,
    piece: ActivePiece,
    game_over: bool,
    // Previous non-zero clear on this board was four lines
    back_to_back: bool,
}

impl PlayerSession {
    pub fn new<R: Rng>(player: PlayerId, rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        let board = Board::new(rows, cols)?;
        let piece = Self::random_piece(cols, rng);
        let mut session = PlayerSession {
            player,
            board,
            piece,
            game_over: false,
            back_to_back: false,
        };
        session.check_spawn();
        Ok(session)
    }

    fn random_piece<R: Rng>(cols: usize, rng: &mut R) -> ActivePiece {
        let shapes = all_shapes();
        let shape = shapes[rng.random_range(0..shapes.len())].clone();
        ActivePiece::spawn(shape, cols)
    }

    fn check_spawn(&mut self) -> bool {
        if self.piece.collides(&self.board) {
            self.game_over = true;
            tracing::info!("{} game over: spawn blocked", self.player);
            return false;
        }
        true
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> &ActivePiece {
        &self.piece
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    pub(crate) fn set_back_to_back(&mut self, back_to_back: bool) {
        self.back_to_back = back_to_back;
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece with a random catalogue shape centered on the top row.
    /// Returns false and ends the session if it collides immediately.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.game_over {
            return false;
        }
        self.piece = Self::random_piece(self.board.cols(), rng);
        self.check_spawn()
    }

    /// Like `spawn` but with a caller-chosen piece
    pub fn spawn_piece(&mut self, piece: ActivePiece) -> bool {
        if self.game_over {
            return false;
        }
        self.piece = piece;
        self.check_spawn()
    }

    pub fn move_horizontal(&mut self, delta_x: isize) -> bool {
        if self.game_over {
            return false;
        }
        self.piece.try_shift(delta_x, &self.board)
    }

    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.piece.try_rotate(&self.board)
    }

    /// Move the piece one row down, or lock it in place if it cannot fall:
    /// merge, clear full rows and spawn the next piece.
    pub fn soft_drop_or_lock<R: Rng>(&mut self, rng: &mut R) -> DropResult {
        if self.game_over {
            return DropResult::Ignored;
        }
        if self.piece.try_fall(&self.board) {
            return DropResult::Fell;
        }
        self.piece.draw(&mut self.board);
        let lines_cleared = self.board.clear_full_rows();
        tracing::debug!(
            "{} locked piece at {:?}, {} line(s) cleared",
            self.player,
            self.piece.origin(),
            lines_cleared
        );
        let spawned = self.spawn(rng);
        DropResult::Locked {
            lines_cleared,
            game_over: !spawned,
        }
    }

    /// Garbage pushed in by the opponent. The falling piece is not re-checked, it may
    /// end up overlapping the new rows.
    pub fn receive_garbage<R: Rng>(&mut self, count: usize, rng: &mut R) {
        self.board.add_garbage(count, rng);
    }

    /// Empty board, cleared flags and a fresh piece
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.board.clear();
        self.game_over = false;
        self.back_to_back = false;
        self.spawn(rng);
        tracing::info!("{} session reset", self.player);
    }

    pub fn state(&self) -> SessionState {
        let mut well = self.board.clone();
        let piece = if self.game_over {
            None
        } else {
            self.piece.draw(&mut well);
            Some(PieceState {
                shape: self.piece.shape().clone(),
                origin: self.piece.origin(),
            })
        };
        SessionState {
            board: self.board.clone(),
            piece,
            well,
            game_over: self.game_over,
            back_to_back: self.back_to_back,
        }
    }
}
