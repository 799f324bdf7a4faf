use serde::{Deserialize, Serialize};

use crate::board::{Board, Position};
use crate::error::Result;
use crate::shapes::Shape;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceState {
    pub shape: Shape,
    pub origin: Position,
}

/// Read-only view of one session for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Settled cells only
    pub board: Board,
    /// Falling piece, absent once the session is over
    pub piece: Option<PieceState>,
    /// Settled cells with the falling piece drawn over them
    pub well: Board,
    pub game_over: bool,
    pub back_to_back: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub player1: SessionState,
    pub player2: SessionState,
    pub paused: bool,
}

impl MatchState {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Overlay lines a renderer shows on top of the boards
    pub fn overlay(&self) -> Vec<&'static str> {
        let mut lines = Vec::new();
        if self.player1.game_over {
            lines.push("P1 Game Over");
        }
        if self.player2.game_over {
            lines.push("P2 Game Over");
        }
        if self.paused {
            lines.push("Paused");
        }
        lines
    }
}
