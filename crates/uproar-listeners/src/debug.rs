use glam::Vec3;
use uproar_core::constants::{DEBUG_POINT_BASE_SIZE, DEBUG_POINT_DURATION_SECS};
use uproar_core::types::ClassifiedEvent;

pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// A point a host debug renderer should draw for `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugPoint {
    pub location: Vec3,
    pub size: f32,
    pub color: [f32; 4],
    pub duration: f32,
}

impl DebugPoint {
    /// Point for a classified event, scaled by its tiers so louder events
    /// stand out.
    pub fn for_event(event: &ClassifiedEvent, color: [f32; 4]) -> Self {
        let significance = (event.magnitude.index() * event.speed.index()) as f32;
        Self {
            location: event.location,
            size: DEBUG_POINT_BASE_SIZE * (significance + 1.0),
            color,
            duration: DEBUG_POINT_DURATION_SECS,
        }
    }
}
