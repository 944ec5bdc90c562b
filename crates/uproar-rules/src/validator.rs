use std::collections::HashMap;

use thiserror::Error;
use uproar_core::settings::UproarSettings;
use uproar_core::types::Speed;

use crate::classifier::{BreakEventSettings, CollisionEventSettings, StaticMeshHitEventSettings};
use crate::registry::SoundDefinitionRow;
use crate::thresholds::{MassThresholds, SpeedModulation, SpeedThresholds};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{table} threshold '{tier}' is negative ({value})")]
    NegativeThreshold {
        table: &'static str,
        tier: &'static str,
        value: f32,
    },
    #[error("{table} threshold '{tier}' ({value}) does not exceed the previous tier ({previous}); higher tiers are unreachable")]
    ThresholdNotAscending {
        table: &'static str,
        tier: &'static str,
        value: f32,
        previous: f32,
    },
    #[error("Volume range for {speed:?} ({min}, {max}) must satisfy 0 <= min <= max <= 1")]
    InvalidVolumeRange { speed: Speed, min: f32, max: f32 },
    #[error("Grid dimension {dimension} cubed exceeds the 32-bit key range; raise cell_size or lower grid_size")]
    GridDimensionOverflow { dimension: i64 },
    #[error("Sound definition '{name}' reuses the key of '{previous}' and will override it")]
    DuplicateSoundKey { name: String, previous: String },
}

const MASS_TIERS: [&str; 5] = ["tiny", "small", "medium", "large", "epic"];
const SPEED_TIERS: [&str; 4] = ["slow", "mid_speed", "quick", "epic"];

fn check_ascending(
    table: &'static str,
    names: &[&'static str],
    values: &[f32],
    errors: &mut Vec<ValidationError>,
) {
    for (i, (&tier, &value)) in names.iter().zip(values).enumerate() {
        if value < 0.0 {
            errors.push(ValidationError::NegativeThreshold { table, tier, value });
        }
        if i > 0 && value <= values[i - 1] {
            errors.push(ValidationError::ThresholdNotAscending {
                table,
                tier,
                value,
                previous: values[i - 1],
            });
        }
    }
}

fn check_mass(thresholds: &MassThresholds, errors: &mut Vec<ValidationError>) {
    check_ascending("mass", &MASS_TIERS, &thresholds.as_array(), errors);
}

fn check_speed(thresholds: &SpeedThresholds, errors: &mut Vec<ValidationError>) {
    check_ascending("speed", &SPEED_TIERS, &thresholds.as_array(), errors);
}

fn check_modulation(modulation: &SpeedModulation, errors: &mut Vec<ValidationError>) {
    for speed in Speed::ALL {
        let (min, max) = modulation.range(speed);
        if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
            errors.push(ValidationError::InvalidVolumeRange { speed, min, max });
        }
    }
}

fn into_result(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_break_settings(settings: &BreakEventSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_mass(&settings.mass, &mut errors);
    check_speed(&settings.speed, &mut errors);
    into_result(errors)
}

pub fn validate_collision_settings(
    settings: &CollisionEventSettings,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_mass(&settings.mass, &mut errors);
    check_speed(&settings.speed, &mut errors);
    check_modulation(&settings.speed_modulation, &mut errors);
    into_result(errors)
}

pub fn validate_static_mesh_settings(
    settings: &StaticMeshHitEventSettings,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_speed(&settings.speed, &mut errors);
    check_modulation(&settings.speed_modulation, &mut errors);
    into_result(errors)
}

/// Check that the flattened cell key space of the grid fits in 32 bits, the
/// range designers are told to stay within.
pub fn validate_project_settings(settings: &UproarSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let dimension = settings.grid().dimension();
    let cells = dimension.checked_mul(dimension).and_then(|d| d.checked_mul(dimension));
    if cells.map_or(true, |c| c > i32::MAX as i64) {
        errors.push(ValidationError::GridDimensionOverflow { dimension });
    }
    into_result(errors)
}

/// Report rows whose keys collide. Collisions are legal (last row wins) but
/// usually an authoring mistake.
pub fn validate_sound_definitions(rows: &[SoundDefinitionRow]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen: HashMap<_, &str> = HashMap::new();
    for row in rows.iter().filter(|r| r.sound.is_some()) {
        if let Some(previous) = seen.insert(row.key(), &row.name) {
            errors.push(ValidationError::DuplicateSoundKey {
                name: row.name.clone(),
                previous: previous.to_string(),
            });
        }
    }
    into_result(errors)
}
