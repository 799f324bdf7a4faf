//! Configuration for a match

use crate::error::{DuelError, Result};
use crate::shapes::max_extent;

/// Match configuration, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuelConfig {
    /// Board height in cells
    pub rows: usize,

    /// Board width in cells
    pub cols: usize,

    /// Cell edge in pixels (graphical renderers only)
    pub cell_size: u32,

    /// Interval between automatic gravity steps
    pub auto_drop_interval_ms: u64,

    /// Render loop frame rate
    pub target_fps: u32,

    /// Seed for piece selection and garbage holes (None = from OS entropy)
    pub seed: Option<u64>,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 10,
            cell_size: 20,
            auto_drop_interval_ms: 500,
            target_fps: 30,
            seed: None,
        }
    }
}

impl DuelConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_auto_drop_interval_ms(mut self, interval_ms: u64) -> Self {
        self.auto_drop_interval_ms = interval_ms;
        self
    }

    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Check that every catalogue shape fits the board in any orientation and
    /// that the timing values are usable
    pub fn validate(&self) -> Result<()> {
        let extent = max_extent();
        if self.rows < extent || self.cols < extent {
            return Err(DuelError::InvalidConfig(format!(
                "board {}x{} is smaller than the largest piece ({}x{})",
                self.rows, self.cols, extent, extent
            )));
        }
        if self.cell_size == 0 {
            return Err(DuelError::InvalidConfig(
                "cell_size must be positive".to_string(),
            ));
        }
        if self.screen_size().is_none() {
            return Err(DuelError::InvalidConfig(format!(
                "cell_size {} is too large for a {}x{} board",
                self.cell_size, self.rows, self.cols
            )));
        }
        if self.auto_drop_interval_ms == 0 {
            return Err(DuelError::InvalidConfig(
                "auto_drop_interval_ms must be positive".to_string(),
            ));
        }
        if self.target_fps == 0 {
            return Err(DuelError::InvalidConfig(
                "target_fps must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Frame duration of the render loop
    pub fn frame_interval_ms(&self) -> u64 {
        (1000 / self.target_fps.max(1) as u64).max(1)
    }

    /// Pixel size of a window showing both boards side by side, None if it does
    /// not fit in `u32`
    pub fn screen_size(&self) -> Option<(u32, u32)> {
        let cols = u32::try_from(self.cols).ok()?;
        let rows = u32::try_from(self.rows).ok()?;
        let width = self
            .cell_size
            .checked_mul(cols)?
            .checked_mul(2)?
            .checked_add(40)?;
        let height = self.cell_size.checked_mul(rows)?;
        Some((width, height))
    }
}
