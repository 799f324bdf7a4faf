/// Error types for the duel engine
use thiserror::Error;

/// Result type alias for duel engine operations
pub type Result<T> = std::result::Result<T, DuelError>;

/// Errors that can occur while building or driving a match
///
/// Rejected moves and rotations are not errors: they are reported as `false`
/// by the session methods and leave the state untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DuelError {
    /// Configuration rejected at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Player identifier outside of {1, 2}
    #[error("Invalid player id: {0}. Expected 1 or 2")]
    InvalidPlayer(u8),

    /// Action tag that does not name a player action
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Shape literal that is empty, ragged or uses an unknown color id
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// Snapshot serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::convert::Infallible> for DuelError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

impl From<serde_json::Error> for DuelError {
    fn from(e: serde_json::Error) -> Self {
        DuelError::Serialization(e.to_string())
    }
}
