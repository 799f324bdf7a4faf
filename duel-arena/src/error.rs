/// Error types for the duel-arena library
use thiserror::Error;

/// Result type alias for arena operations
pub type Result<T> = std::result::Result<T, ArenaError>;

/// Errors that can occur in duel-arena operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArenaError {
    /// Game engine rejected an action
    #[error("Engine error: {0}")]
    Engine(String),

    /// Loop configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
