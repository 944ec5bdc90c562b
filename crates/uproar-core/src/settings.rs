use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::math::SpatialGrid;

/// Project-wide Uproar settings, loaded once at startup from RON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UproarSettings {
    /// Extent of the spatial grid in one dimension (world units).
    /// `(grid_size / cell_size)^3` should stay below `i32::MAX`.
    pub grid_size: f32,
    /// Edge length of one deduplication cell. Smaller cells let more sounds
    /// play in the same space.
    pub cell_size: f32,
    /// How long an admitted sound keeps its cell occupied, in seconds.
    pub event_lifetime_seconds: f32,
    /// Record a debug marker for every cell that admits a sound.
    pub draw_debug_cells: bool,
    /// RON sound definition table to load at initialization.
    pub sound_definition_path: Option<PathBuf>,
}

impl Default for UproarSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            event_lifetime_seconds: DEFAULT_EVENT_LIFETIME_SECS,
            draw_debug_cells: false,
            sound_definition_path: None,
        }
    }
}

impl UproarSettings {
    /// Apply the editor clamp ranges. Non-finite values fall back to defaults.
    pub fn clamped(mut self) -> Self {
        if !self.grid_size.is_finite() {
            self.grid_size = DEFAULT_GRID_SIZE;
        }
        if !self.cell_size.is_finite() {
            self.cell_size = DEFAULT_CELL_SIZE;
        }
        if !self.event_lifetime_seconds.is_finite() {
            self.event_lifetime_seconds = DEFAULT_EVENT_LIFETIME_SECS;
        }
        self.grid_size = self.grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.cell_size = self.cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
        self.event_lifetime_seconds = self.event_lifetime_seconds.max(0.0);
        self
    }

    /// Spatial grid described by these settings.
    pub fn grid(&self) -> SpatialGrid {
        SpatialGrid::new(self.grid_size, self.cell_size)
    }
}
