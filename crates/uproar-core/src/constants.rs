//! Single source of truth for shared constants.
//! Domain sizes feed the sound definition key encoding; grid and lifetime
//! values are the project-settings defaults and their clamp ranges.

/// Number of physical surface types (engine default surface + 62 project surfaces).
pub const SURFACE_TYPE_COUNT: u32 = 63;

/// Number of physics event kinds (break, collision).
pub const EVENT_KIND_COUNT: u32 = 2;

/// Number of magnitude tiers (tiny..epic).
pub const MAGNITUDE_COUNT: u32 = 5;

/// Number of speed tiers (slow..epic).
pub const SPEED_COUNT: u32 = 4;

/// Key stride for the event kind digit: one slot per surface type.
pub const EVENT_KIND_STRIDE: u32 = SURFACE_TYPE_COUNT;

/// Key stride for the magnitude digit.
pub const MAGNITUDE_STRIDE: u32 = EVENT_KIND_STRIDE * EVENT_KIND_COUNT;

/// Key stride for the speed digit.
pub const SPEED_STRIDE: u32 = MAGNITUDE_STRIDE * MAGNITUDE_COUNT;

/// Total number of distinct sound definition keys (63 * 2 * 5 * 4 = 2520).
pub const SOUND_KEY_DOMAIN: u32 = SPEED_STRIDE * SPEED_COUNT;

/// Default spatial grid extent in one dimension (world units).
pub const DEFAULT_GRID_SIZE: f32 = 20_000.0;

/// Clamp range for the spatial grid extent.
pub const MIN_GRID_SIZE: f32 = 1_000.0;
pub const MAX_GRID_SIZE: f32 = 20_000.0;

/// Default spatial cell size (world units).
pub const DEFAULT_CELL_SIZE: f32 = 75.0;

/// Clamp range for the spatial cell size.
pub const MIN_CELL_SIZE: f32 = 20.0;
pub const MAX_CELL_SIZE: f32 = 10_000.0;

/// Default lifetime of a deduplication cell in seconds.
pub const DEFAULT_EVENT_LIFETIME_SECS: f32 = 1.25;

/// Guard against division by a zero component mass.
pub const SMALL_NUMBER: f32 = 1.0e-8;

/// Base size of adapter debug points; scaled by magnitude and speed tier.
pub const DEBUG_POINT_BASE_SIZE: f32 = 10.0;

/// How long adapter debug points stay visible, in seconds.
pub const DEBUG_POINT_DURATION_SECS: f32 = 1.0;
