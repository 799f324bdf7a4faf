//! Configuration for an Arena loop

use crate::error::{ArenaError, Result};

/// Timing of the arena loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Interval between engine ticks (automatic gravity) in milliseconds
    pub tick_interval_ms: u64,

    /// Budget of one step() call in milliseconds.
    /// step() returns once per frame, with the latest state if anything changed
    pub frame_interval_ms: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            frame_interval_ms: 33,
        }
    }
}

impl ArenaConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tick interval in milliseconds
    pub fn with_tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    /// Set the frame interval in milliseconds
    pub fn with_frame_interval_ms(mut self, interval_ms: u64) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(ArenaError::InvalidConfig(
                "tick interval must be positive".to_string(),
            ));
        }
        if self.frame_interval_ms == 0 {
            return Err(ArenaError::InvalidConfig(
                "frame interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
