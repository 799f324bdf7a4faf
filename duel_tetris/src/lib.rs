//! # duel_tetris
//!
//! Two player falling-block match with garbage exchange. Each player has an
//! independent board; clearing lines pushes garbage rows into the opponent's board.
//! The match is driven by [`engine::MatchEngine`] inside a `duel_arena::Arena`.

pub mod board;
pub mod config;
pub mod duel;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod piece;
pub mod session;
pub mod shapes;
pub mod state;
pub mod term_render;
pub mod types;

pub use board::{Board, Position};
pub use config::DuelConfig;
pub use duel::{Match, garbage_for_clear};
pub use engine::MatchEngine;
pub use error::{DuelError, Result};
pub use gesture::{GestureClassifier, HandLandmarks, Point};
pub use piece::ActivePiece;
pub use session::{DropResult, PlayerSession};
pub use shapes::{CellType, Shape, all_shapes};
pub use state::{MatchState, PieceState, SessionState};
pub use term_render::{AnsiTermStyle, DuelView, PlainTermStyle, TermRender, WellField};
pub use types::{Action, PlayerId, PlayerInput};
