use rand::Rng;
use serde::{Deserialize, Serialize};
use uproar_core::types::{ClassifiedEvent, Magnitude, PhysicsEventSample, Speed, SurfaceType};

use crate::thresholds::{MassThresholds, SpeedModulation, SpeedThresholds};

/// Turns a raw physics measurement into tiered categories.
///
/// Returns None when either the magnitude or the speed cannot be classified;
/// such events are dropped silently.
pub trait EventClassifier {
    fn classify<R: Rng + ?Sized>(
        &self,
        sample: &PhysicsEventSample,
        rng: &mut R,
    ) -> Option<ClassifiedEvent>;
}

fn resolve_surface(override_surface_type: Option<SurfaceType>, reported: SurfaceType) -> SurfaceType {
    override_surface_type.unwrap_or(reported)
}

/// Speed classification shared by collision and static mesh hit settings:
/// the override is gated on a minimum valid velocity and the volume is drawn
/// from the resolved tier's range.
fn classify_speed_modulated<R: Rng + ?Sized>(
    thresholds: &SpeedThresholds,
    override_speed: Option<Speed>,
    minimum_valid_velocity: f32,
    modulation: &SpeedModulation,
    speed: f32,
    rng: &mut R,
) -> Option<(Speed, f32)> {
    let tier = match override_speed {
        Some(tier) if speed > minimum_valid_velocity => tier,
        Some(_) => return None,
        None => thresholds.classify(speed)?,
    };
    Some((tier, modulation.volume(tier, rng)))
}

/// Classification rules for rigid-body break events.
///
/// Overrides here are unconditional and break events never modulate volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakEventSettings {
    pub mass: MassThresholds,
    pub speed: SpeedThresholds,
    pub override_surface_type: Option<SurfaceType>,
    pub override_magnitude: Option<Magnitude>,
    pub override_speed: Option<Speed>,
}

impl BreakEventSettings {
    pub fn magnitude(&self, mass: f32) -> Option<Magnitude> {
        self.override_magnitude.or_else(|| self.mass.classify(mass))
    }

    pub fn speed(&self, speed: f32) -> Option<Speed> {
        self.override_speed.or_else(|| self.speed.classify(speed))
    }

    pub fn surface_type(&self, reported: SurfaceType) -> SurfaceType {
        resolve_surface(self.override_surface_type, reported)
    }
}

impl EventClassifier for BreakEventSettings {
    fn classify<R: Rng + ?Sized>(
        &self,
        sample: &PhysicsEventSample,
        _rng: &mut R,
    ) -> Option<ClassifiedEvent> {
        let magnitude = self.magnitude(sample.mass)?;
        let speed = self.speed(sample.speed)?;
        Some(ClassifiedEvent {
            location: sample.location,
            kind: sample.kind,
            surface_type: self.surface_type(sample.surface_type),
            magnitude,
            speed,
            volume_modifier: 1.0,
        })
    }
}

/// Classification rules for rigid-body collision events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionEventSettings {
    pub mass: MassThresholds,
    pub speed: SpeedThresholds,
    pub override_surface_type: Option<SurfaceType>,
    /// Replaces mass classification for any mass above `minimum_valid_mass`.
    pub override_magnitude: Option<Magnitude>,
    pub minimum_valid_mass: f32,
    /// Replaces speed classification for any speed above `minimum_valid_velocity`.
    pub override_speed: Option<Speed>,
    pub minimum_valid_velocity: f32,
    pub speed_modulation: SpeedModulation,
}

impl Default for CollisionEventSettings {
    fn default() -> Self {
        Self {
            mass: MassThresholds::default(),
            speed: SpeedThresholds::default(),
            override_surface_type: None,
            override_magnitude: None,
            minimum_valid_mass: 0.01,
            override_speed: None,
            minimum_valid_velocity: 0.01,
            speed_modulation: SpeedModulation::default(),
        }
    }
}

impl CollisionEventSettings {
    pub fn magnitude(&self, mass: f32) -> Option<Magnitude> {
        match self.override_magnitude {
            Some(tier) if mass > self.minimum_valid_mass => Some(tier),
            Some(_) => None,
            None => self.mass.classify(mass),
        }
    }

    /// Speed tier plus the volume modifier for it.
    pub fn speed_and_volume<R: Rng + ?Sized>(&self, speed: f32, rng: &mut R) -> Option<(Speed, f32)> {
        classify_speed_modulated(
            &self.speed,
            self.override_speed,
            self.minimum_valid_velocity,
            &self.speed_modulation,
            speed,
            rng,
        )
    }

    pub fn surface_type(&self, reported: SurfaceType) -> SurfaceType {
        resolve_surface(self.override_surface_type, reported)
    }
}

impl EventClassifier for CollisionEventSettings {
    fn classify<R: Rng + ?Sized>(
        &self,
        sample: &PhysicsEventSample,
        rng: &mut R,
    ) -> Option<ClassifiedEvent> {
        let magnitude = self.magnitude(sample.mass)?;
        let (speed, volume_modifier) = self.speed_and_volume(sample.speed, rng)?;
        Some(ClassifiedEvent {
            location: sample.location,
            kind: sample.kind,
            surface_type: self.surface_type(sample.surface_type),
            magnitude,
            speed,
            volume_modifier,
        })
    }
}

/// Classification rules for static mesh hit events. Static meshes have a
/// constant mass, so the magnitude is a fixed designer choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticMeshHitEventSettings {
    pub magnitude: Magnitude,
    pub speed: SpeedThresholds,
    pub override_surface_type: Option<SurfaceType>,
    pub override_speed: Option<Speed>,
    pub minimum_valid_velocity: f32,
    pub speed_modulation: SpeedModulation,
}

impl Default for StaticMeshHitEventSettings {
    fn default() -> Self {
        Self {
            magnitude: Magnitude::Small,
            speed: SpeedThresholds::default(),
            override_surface_type: None,
            override_speed: None,
            minimum_valid_velocity: 0.01,
            speed_modulation: SpeedModulation::default(),
        }
    }
}

impl StaticMeshHitEventSettings {
    pub fn speed_and_volume<R: Rng + ?Sized>(&self, speed: f32, rng: &mut R) -> Option<(Speed, f32)> {
        classify_speed_modulated(
            &self.speed,
            self.override_speed,
            self.minimum_valid_velocity,
            &self.speed_modulation,
            speed,
            rng,
        )
    }

    pub fn surface_type(&self, reported: SurfaceType) -> SurfaceType {
        resolve_surface(self.override_surface_type, reported)
    }
}

impl EventClassifier for StaticMeshHitEventSettings {
    fn classify<R: Rng + ?Sized>(
        &self,
        sample: &PhysicsEventSample,
        rng: &mut R,
    ) -> Option<ClassifiedEvent> {
        let (speed, volume_modifier) = self.speed_and_volume(sample.speed, rng)?;
        Some(ClassifiedEvent {
            location: sample.location,
            kind: sample.kind,
            surface_type: self.surface_type(sample.surface_type),
            magnitude: self.magnitude,
            speed,
            volume_modifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uproar_core::types::PhysicsEventKind;

    fn sample(kind: PhysicsEventKind, mass: f32, speed: f32) -> PhysicsEventSample {
        PhysicsEventSample {
            location: Vec3::new(50.0, 50.0, 0.0),
            surface_type: SurfaceType::DEFAULT,
            kind,
            mass,
            speed,
        }
    }

    #[test]
    fn test_collision_small_slow() {
        let mut rng = StdRng::seed_from_u64(0);
        let settings = CollisionEventSettings::default();
        let event = settings
            .classify(&sample(PhysicsEventKind::Collision, 1.0, 0.05), &mut rng)
            .expect("should classify");
        assert_eq!(event.magnitude, Magnitude::Small);
        assert_eq!(event.speed, Speed::Slow);
        assert_eq!(event.kind, PhysicsEventKind::Collision);
        assert!((event.volume_modifier - 1.0).abs() < f32::EPSILON);
        assert_eq!(event.location, Vec3::new(50.0, 50.0, 0.0));
    }

    #[test]
    fn test_speed_failure_rejects_event() {
        let mut rng = StdRng::seed_from_u64(0);
        let settings = CollisionEventSettings::default();
        // Mass classifies as Epic but speed is below the slow threshold
        let result = settings.classify(&sample(PhysicsEventKind::Collision, 5000.0, 0.0), &mut rng);
        assert!(result.is_none());
    }

    #[test]
    fn test_mass_failure_rejects_event() {
        let mut rng = StdRng::seed_from_u64(0);
        let settings = CollisionEventSettings::default();
        let result = settings.classify(&sample(PhysicsEventKind::Collision, 0.01, 50.0), &mut rng);
        assert!(result.is_none(), "mass equal to tiny threshold must not classify");
    }

    #[test]
    fn test_collision_override_gated_by_minimum_mass() {
        let settings = CollisionEventSettings {
            override_magnitude: Some(Magnitude::Epic),
            minimum_valid_mass: 5.0,
            ..Default::default()
        };
        assert_eq!(settings.magnitude(5.5), Some(Magnitude::Epic));
        assert_eq!(settings.magnitude(5.0), None);
        assert_eq!(settings.magnitude(0.5), None);
    }

    #[test]
    fn test_collision_speed_override_gated_by_minimum_velocity() {
        let mut rng = StdRng::seed_from_u64(3);
        let settings = CollisionEventSettings {
            override_speed: Some(Speed::Quick),
            minimum_valid_velocity: 1.0,
            ..Default::default()
        };
        assert_eq!(
            settings.speed_and_volume(2.0, &mut rng).map(|(s, _)| s),
            Some(Speed::Quick)
        );
        assert!(settings.speed_and_volume(1.0, &mut rng).is_none());
    }

    #[test]
    fn test_override_modulation_uses_override_tier_range() {
        let mut rng = StdRng::seed_from_u64(9);
        let settings = CollisionEventSettings {
            override_speed: Some(Speed::Epic),
            speed_modulation: SpeedModulation {
                enabled: true,
                ..Default::default()
            },
            ..Default::default()
        };
        for _ in 0..100 {
            // Raw speed would classify as Slow; the Epic range must be used
            let (speed, volume) = settings.speed_and_volume(0.5, &mut rng).expect("override");
            assert_eq!(speed, Speed::Epic);
            assert!((0.8..=1.0).contains(&volume), "volume {volume}");
        }
    }

    #[test]
    fn test_matched_tier_modulation_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let settings = CollisionEventSettings {
            speed_modulation: SpeedModulation {
                enabled: true,
                ..Default::default()
            },
            ..Default::default()
        };
        for _ in 0..100 {
            let (speed, volume) = settings.speed_and_volume(50.0, &mut rng).expect("mid");
            assert_eq!(speed, Speed::MidSpeed);
            assert!((0.3..=0.6).contains(&volume), "volume {volume}");
        }
    }

    #[test]
    fn test_break_override_is_unconditional() {
        let mut rng = StdRng::seed_from_u64(0);
        let settings = BreakEventSettings {
            override_magnitude: Some(Magnitude::Large),
            override_speed: Some(Speed::MidSpeed),
            ..Default::default()
        };
        let event = settings
            .classify(&sample(PhysicsEventKind::Break, 0.0, 0.0), &mut rng)
            .expect("overrides always accept");
        assert_eq!(event.magnitude, Magnitude::Large);
        assert_eq!(event.speed, Speed::MidSpeed);
        assert!((event.volume_modifier - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_break_thresholds() {
        let mut rng = StdRng::seed_from_u64(0);
        let settings = BreakEventSettings::default();
        let event = settings
            .classify(&sample(PhysicsEventKind::Break, 150.0, 20.0), &mut rng)
            .expect("should classify");
        assert_eq!(event.magnitude, Magnitude::Large);
        assert_eq!(event.speed, Speed::MidSpeed);
        assert!(settings
            .classify(&sample(PhysicsEventKind::Break, 150.0, 0.001), &mut rng)
            .is_none());
    }

    #[test]
    fn test_surface_override() {
        let mut rng = StdRng::seed_from_u64(0);
        let stone = SurfaceType::new(3).expect("in range");
        let metal = SurfaceType::new(9).expect("in range");
        let mut input = sample(PhysicsEventKind::Collision, 1.0, 1.0);
        input.surface_type = metal;

        let passthrough = CollisionEventSettings::default();
        let event = passthrough.classify(&input, &mut rng).expect("classifies");
        assert_eq!(event.surface_type, metal);

        let overridden = CollisionEventSettings {
            override_surface_type: Some(stone),
            ..Default::default()
        };
        let event = overridden.classify(&input, &mut rng).expect("classifies");
        assert_eq!(event.surface_type, stone);
    }

    #[test]
    fn test_static_mesh_fixed_magnitude() {
        let mut rng = StdRng::seed_from_u64(0);
        let settings = StaticMeshHitEventSettings::default();
        // Mass is ignored entirely
        let event = settings
            .classify(&sample(PhysicsEventKind::Collision, 0.0, 150.0), &mut rng)
            .expect("should classify");
        assert_eq!(event.magnitude, Magnitude::Small);
        assert_eq!(event.speed, Speed::Quick);

        assert!(settings
            .classify(&sample(PhysicsEventKind::Collision, 10.0, 0.0), &mut rng)
            .is_none());
    }
}
