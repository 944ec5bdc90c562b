use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uproar_core::key::SoundDefinitionKey;
use uproar_core::types::{Magnitude, PhysicsEventKind, SoundHandle, Speed, SurfaceType};

/// One designer-authored row associating a class of physics event with a sound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundDefinitionRow {
    /// Row name, used only for diagnostics.
    pub name: String,
    #[serde(default)]
    pub surface_type: SurfaceType,
    pub event_kind: PhysicsEventKind,
    pub magnitude: Magnitude,
    pub speed: Speed,
    /// Rows without a sound are skipped when the table is built.
    #[serde(default)]
    pub sound: Option<SoundHandle>,
}

impl SoundDefinitionRow {
    pub fn key(&self) -> SoundDefinitionKey {
        SoundDefinitionKey::encode(self.surface_type, self.event_kind, self.magnitude, self.speed)
    }
}

/// Immutable lookup from sound definition key to sound. Built once at
/// initialization.
#[derive(Debug, Clone, Default)]
pub struct SoundDefinitionTable {
    sounds: HashMap<SoundDefinitionKey, SoundHandle>,
}

impl SoundDefinitionTable {
    /// Build the table from rows in order. A later row with the same key
    /// replaces the earlier one.
    pub fn build(rows: &[SoundDefinitionRow]) -> Self {
        let mut sounds = HashMap::with_capacity(rows.len());
        let mut owners: HashMap<SoundDefinitionKey, &str> = HashMap::new();

        for row in rows {
            let Some(sound) = &row.sound else {
                log::debug!("Sound definition '{}' has no sound, skipped", row.name);
                continue;
            };
            let key = row.key();
            if let Some(previous) = owners.insert(key, &row.name) {
                log::warn!(
                    "Sound definition '{}' overrides '{}' (key {})",
                    row.name,
                    previous,
                    key.value()
                );
            }
            sounds.insert(key, sound.clone());
        }

        Self { sounds }
    }

    pub fn lookup(&self, key: SoundDefinitionKey) -> Option<&SoundHandle> {
        self.sounds.get(&key)
    }

    pub fn contains(&self, key: SoundDefinitionKey) -> bool {
        self.sounds.contains_key(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SoundDefinitionKey, &SoundHandle)> {
        self.sounds.iter()
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, magnitude: Magnitude, sound: Option<&str>) -> SoundDefinitionRow {
        SoundDefinitionRow {
            name: name.into(),
            surface_type: SurfaceType::DEFAULT,
            event_kind: PhysicsEventKind::Collision,
            magnitude,
            speed: Speed::Slow,
            sound: sound.map(SoundHandle::new),
        }
    }

    #[test]
    fn test_build_and_lookup() {
        let rows = vec![
            row("small", Magnitude::Small, Some("impact/small")),
            row("large", Magnitude::Large, Some("impact/large")),
        ];
        let table = SoundDefinitionTable::build(&rows);
        assert_eq!(table.len(), 2);

        let key = SoundDefinitionKey::encode(
            SurfaceType::DEFAULT,
            PhysicsEventKind::Collision,
            Magnitude::Small,
            Speed::Slow,
        );
        assert_eq!(table.lookup(key).map(|s| s.path()), Some("impact/small"));
        assert!(table.contains(rows[1].key()));
    }

    #[test]
    fn test_rows_without_sound_skipped() {
        let rows = vec![
            row("silent", Magnitude::Small, None),
            row("audible", Magnitude::Medium, Some("impact/medium")),
        ];
        let table = SoundDefinitionTable::build(&rows);
        assert_eq!(table.len(), 1);
        assert!(table.lookup(rows[0].key()).is_none());
    }

    #[test]
    fn test_later_row_overwrites() {
        let rows = vec![
            row("first", Magnitude::Small, Some("impact/first")),
            row("second", Magnitude::Small, Some("impact/second")),
        ];
        let table = SoundDefinitionTable::build(&rows);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.lookup(rows[0].key()).map(|s| s.path()),
            Some("impact/second")
        );
    }

    #[test]
    fn test_empty_table_misses() {
        let table = SoundDefinitionTable::default();
        assert!(table.is_empty());
        assert!(table
            .lookup(SoundDefinitionKey::encode(
                SurfaceType::DEFAULT,
                PhysicsEventKind::Break,
                Magnitude::Tiny,
                Speed::Slow,
            ))
            .is_none());
    }
}
