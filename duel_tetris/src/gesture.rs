//! Hand gesture to action mapping
//!
//! Turns fingertip landmarks from a hand tracker into player actions. Only the
//! decision logic lives here: capture and landmark inference belong to the caller.
//! The left half of the image belongs to player 1, the right half to player 2.

use crate::types::{Action, PlayerId};

/// Normalized image coordinates, `y` grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Fingertip positions of one detected hand
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandLandmarks {
    pub thumb: Point,
    pub index: Point,
    pub middle: Point,
    pub ring: Point,
    pub pinky: Point,
}

impl HandLandmarks {
    /// Mean horizontal position of the fingertips
    pub fn center_x(&self) -> f32 {
        (self.thumb.x + self.index.x + self.middle.x + self.ring.x + self.pinky.x) / 5.0
    }

    /// Every finger tip below the thumb tip
    pub fn is_closed(&self) -> bool {
        [self.index, self.middle, self.ring, self.pinky]
            .iter()
            .all(|tip| tip.y > self.thumb.y)
    }

    /// Index tip above the thumb, the other fingers below the index
    pub fn is_pointing(&self) -> bool {
        self.index.y < self.thumb.y
            && [self.middle, self.ring, self.pinky]
                .iter()
                .all(|tip| tip.y > self.index.y)
    }
}

/// Horizontal zones for one player: left is `[start, end)`, right is `(start, end)`
#[derive(Debug, Clone, Copy, PartialEq)]
struct MoveZones {
    left: (f32, f32),
    right: (f32, f32),
}

const PLAYER_ONE_ZONES: MoveZones = MoveZones {
    left: (f32::NEG_INFINITY, 0.3),
    right: (0.35, 0.5),
};

const PLAYER_TWO_ZONES: MoveZones = MoveZones {
    left: (0.5, 0.7),
    right: (0.75, f32::INFINITY),
};

/// Stateful classifier. A rotation fires once when a hand starts pointing and
/// again only after that player's hand stopped pointing. A hand that keeps
/// pointing is treated like an open hand.
#[derive(Debug, Default)]
pub struct GestureClassifier {
    pointing: [bool; 2],
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_for(hand: &HandLandmarks) -> PlayerId {
        if hand.center_x() < 0.5 {
            PlayerId::One
        } else {
            PlayerId::Two
        }
    }

    pub fn classify(&mut self, hand: &HandLandmarks) -> Option<(PlayerId, Action)> {
        let player = Self::player_for(hand);
        let pointing = hand.is_pointing();
        let was_pointing = std::mem::replace(&mut self.pointing[player.index()], pointing);

        if pointing && !was_pointing {
            return Some((player, Action::Rotate));
        }
        if hand.is_closed() {
            return Some((player, Action::SoftDrop));
        }

        let zones = match player {
            PlayerId::One => PLAYER_ONE_ZONES,
            PlayerId::Two => PLAYER_TWO_ZONES,
        };
        let center = hand.center_x();
        if center >= zones.left.0 && center < zones.left.1 {
            Some((player, Action::MoveLeft))
        } else if center > zones.right.0 && center < zones.right.1 {
            Some((player, Action::MoveRight))
        } else {
            None
        }
    }

    /// Classify every hand of one video frame, in detection order
    pub fn classify_frame(&mut self, hands: &[HandLandmarks]) -> Vec<(PlayerId, Action)> {
        hands.iter().filter_map(|hand| self.classify(hand)).collect()
    }
}
