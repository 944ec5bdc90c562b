pub mod classifier;
pub mod registry;
pub mod thresholds;
pub mod validator;

pub use classifier::{
    BreakEventSettings, CollisionEventSettings, EventClassifier, StaticMeshHitEventSettings,
};
pub use registry::{SoundDefinitionRow, SoundDefinitionTable};

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;
use uproar_core::settings::UproarSettings;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse Uproar settings RON: {0}")]
    SettingsParseError(String),
    #[error("Failed to parse classifier settings RON: {0}")]
    ClassifierParseError(String),
    #[error("Failed to parse sound definitions RON: {0}")]
    SoundDefinitionParseError(String),
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
}

fn parse_ron<T: DeserializeOwned>(
    ron_str: &str,
    wrap: fn(String) -> LoadError,
) -> Result<T, LoadError> {
    let options = ron::Options::default();
    options.from_str(ron_str).map_err(|e| wrap(e.to_string()))
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Parse project settings. Missing fields take their defaults; the result is
/// clamped to the supported ranges.
pub fn load_settings_from_str(ron_str: &str) -> Result<UproarSettings, LoadError> {
    let settings: UproarSettings = parse_ron(ron_str, LoadError::SettingsParseError)?;
    Ok(settings.clamped())
}

pub fn load_settings_from_path(path: &Path) -> Result<UproarSettings, LoadError> {
    load_settings_from_str(&read_file(path)?)
}

pub fn load_break_settings_from_str(ron_str: &str) -> Result<BreakEventSettings, LoadError> {
    parse_ron(ron_str, LoadError::ClassifierParseError)
}

pub fn load_collision_settings_from_str(ron_str: &str) -> Result<CollisionEventSettings, LoadError> {
    parse_ron(ron_str, LoadError::ClassifierParseError)
}

pub fn load_static_mesh_settings_from_str(
    ron_str: &str,
) -> Result<StaticMeshHitEventSettings, LoadError> {
    parse_ron(ron_str, LoadError::ClassifierParseError)
}

/// Parse a sound definition table's rows.
pub fn load_sound_definitions_from_str(ron_str: &str) -> Result<Vec<SoundDefinitionRow>, LoadError> {
    parse_ron(ron_str, LoadError::SoundDefinitionParseError)
}

pub fn load_sound_definitions_from_path(path: &Path) -> Result<Vec<SoundDefinitionRow>, LoadError> {
    load_sound_definitions_from_str(&read_file(path)?)
}

/// Merge several row sources in order; later sources override earlier keys
/// when the table is built.
pub fn load_all_sound_definitions(sources: &[&str]) -> Result<Vec<SoundDefinitionRow>, LoadError> {
    let mut rows = Vec::new();
    for source in sources {
        rows.extend(load_sound_definitions_from_str(source)?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uproar_core::types::{Magnitude, PhysicsEventKind, Speed, SurfaceType};

    #[test]
    fn test_load_single_definition() {
        let ron = r#"[
            (
                name: "DefaultCollisionSmallSlow",
                surface_type: 0,
                event_kind: Collision,
                magnitude: Small,
                speed: Slow,
                sound: Some("impact/default_small_slow"),
            ),
        ]"#;
        let rows = load_sound_definitions_from_str(ron).expect("should parse");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event_kind, PhysicsEventKind::Collision);
        assert_eq!(rows[0].magnitude, Magnitude::Small);
        assert_eq!(rows[0].speed, Speed::Slow);
        assert_eq!(rows[0].surface_type, SurfaceType::DEFAULT);
        assert_eq!(
            rows[0].sound.as_ref().map(|s| s.path()),
            Some("impact/default_small_slow")
        );
    }

    #[test]
    fn test_out_of_domain_surface_rejected() {
        let ron = r#"[
            (name: "Bad", surface_type: 200, event_kind: Break, magnitude: Tiny, speed: Slow),
        ]"#;
        assert!(matches!(
            load_sound_definitions_from_str(ron),
            Err(LoadError::SoundDefinitionParseError(_))
        ));
    }

    #[test]
    fn test_malformed_ron_rejected() {
        let ron = r#"[this is not valid RON {"#;
        assert!(load_sound_definitions_from_str(ron).is_err());
        assert!(load_settings_from_str(ron).is_err());
        assert!(load_collision_settings_from_str(ron).is_err());
    }

    #[test]
    fn test_settings_defaults_and_clamp() {
        let settings = load_settings_from_str("(cell_size: 5.0)").expect("should parse");
        assert!((settings.cell_size - 20.0).abs() < f32::EPSILON);
        assert!((settings.grid_size - 20_000.0).abs() < f32::EPSILON);
        assert!((settings.event_lifetime_seconds - 1.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_classifier_settings() {
        let ron = r#"(
            mass: (tiny: 0.5),
            override_speed: Some(Quick),
            speed_modulation: (enabled: true),
        )"#;
        let settings = load_collision_settings_from_str(ron).expect("should parse");
        assert!((settings.mass.tiny - 0.5).abs() < f32::EPSILON);
        assert!((settings.mass.small - 0.1).abs() < f32::EPSILON);
        assert_eq!(settings.override_speed, Some(Speed::Quick));
        assert!(settings.speed_modulation.enabled);
        assert_eq!(settings.speed_modulation.epic, (0.8, 1.0));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_sound_definitions_from_path(Path::new("/nonexistent/uproar/table.ron"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_load_all_merges() {
        let a = r#"[(name: "A", event_kind: Break, magnitude: Tiny, speed: Slow, sound: Some("a"))]"#;
        let b = r#"[(name: "B", event_kind: Break, magnitude: Tiny, speed: Slow, sound: Some("b"))]"#;
        let rows = load_all_sound_definitions(&[a, b]).expect("should merge");
        assert_eq!(rows.len(), 2);
        let table = SoundDefinitionTable::build(&rows);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(rows[0].key()).map(|s| s.path()), Some("b"));
    }

    #[test]
    fn test_shipped_data_files_load() {
        let settings = load_settings_from_str(include_str!("../../../data/uproar.ron"))
            .expect("project settings should parse");
        assert!(validator::validate_project_settings(&settings).is_ok());

        let rows = load_sound_definitions_from_str(include_str!(
            "../../../data/sound_definitions.ron"
        ))
        .expect("sound definitions should parse");
        assert!(!rows.is_empty());
        assert!(validator::validate_sound_definitions(&rows).is_ok());

        let break_settings =
            load_break_settings_from_str(include_str!("../../../data/classifiers/break.ron"))
                .expect("break settings should parse");
        assert!(validator::validate_break_settings(&break_settings).is_ok());

        let collision = load_collision_settings_from_str(include_str!(
            "../../../data/classifiers/collision.ron"
        ))
        .expect("collision settings should parse");
        assert!(validator::validate_collision_settings(&collision).is_ok());

        let static_mesh = load_static_mesh_settings_from_str(include_str!(
            "../../../data/classifiers/static_mesh.ron"
        ))
        .expect("static mesh settings should parse");
        assert!(validator::validate_static_mesh_settings(&static_mesh).is_ok());
    }
}
