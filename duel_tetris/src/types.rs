/// Core types shared by the match, the input collaborators and the renderer
use crate::error::DuelError;
use serde::{Deserialize, Serialize};

/// One of the two players of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Zero-based slot of the player
    pub fn index(&self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn opponent(&self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    pub fn number(&self) -> u8 {
        self.index() as u8 + 1
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = DuelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerId::One),
            2 => Ok(PlayerId::Two),
            other => Err(DuelError::InvalidPlayer(other)),
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.number())
    }
}

/// Discrete player action emitted by the input collaborators
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
}

impl Action {
    pub fn delta_x(&self) -> isize {
        match self {
            Action::MoveLeft => -1,
            Action::MoveRight => 1,
            Action::Rotate | Action::SoftDrop => 0,
        }
    }
}

impl TryFrom<u8> for Action {
    type Error = DuelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::MoveLeft),
            1 => Ok(Action::MoveRight),
            2 => Ok(Action::Rotate),
            3 => Ok(Action::SoftDrop),
            other => Err(DuelError::UnknownAction(other.to_string())),
        }
    }
}

impl TryFrom<&str> for Action {
    type Error = DuelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "left" | "move_left" | "moveleft" => Ok(Action::MoveLeft),
            "right" | "move_right" | "moveright" => Ok(Action::MoveRight),
            "rotate" | "up" => Ok(Action::Rotate),
            "drop" | "soft_drop" | "softdrop" | "down" => Ok(Action::SoftDrop),
            _ => Err(DuelError::UnknownAction(value.to_string())),
        }
    }
}

/// Action addressed to a player, as delivered by an input collaborator.
/// The player is kept raw so that routing can reject ids outside of {1, 2}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerInput {
    pub player: u8,
    pub action: Action,
}

impl PlayerInput {
    pub fn new(player: u8, action: Action) -> Self {
        PlayerInput { player, action }
    }
}

impl From<(PlayerId, Action)> for PlayerInput {
    fn from((player, action): (PlayerId, Action)) -> Self {
        PlayerInput {
            player: player.number(),
            action,
        }
    }
}
