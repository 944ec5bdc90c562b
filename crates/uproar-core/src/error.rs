use thiserror::Error;

/// Errors raised when constructing core Uproar values from raw data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UproarError {
    #[error("surface type {0} is outside the declared domain (max {max})", max = crate::constants::SURFACE_TYPE_COUNT - 1)]
    SurfaceTypeOutOfRange(u8),

    #[error("sound definition key {0} is outside the key domain")]
    InvalidSoundKey(u32),
}
