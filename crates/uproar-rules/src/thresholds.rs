use rand::Rng;
use serde::{Deserialize, Serialize};
use uproar_core::types::{Magnitude, Speed};

/// Walk ascending tier thresholds and return the index of the highest tier
/// reached. A tier is reached only when `value` strictly exceeds its
/// threshold; the walk stops at the first tier that is not reached.
fn sweep(thresholds: &[f32], value: f32) -> Option<usize> {
    let mut reached = None;
    for (tier, &threshold) in thresholds.iter().enumerate() {
        if value > threshold {
            reached = Some(tier);
        } else {
            break;
        }
    }
    reached
}

/// Minimum mass (exclusive) for each magnitude tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassThresholds {
    pub tiny: f32,
    pub small: f32,
    pub medium: f32,
    pub large: f32,
    pub epic: f32,
}

impl Default for MassThresholds {
    fn default() -> Self {
        Self {
            tiny: 0.01,
            small: 0.1,
            medium: 10.0,
            large: 100.0,
            epic: 1000.0,
        }
    }
}

impl MassThresholds {
    pub fn as_array(&self) -> [f32; 5] {
        [self.tiny, self.small, self.medium, self.large, self.epic]
    }

    /// Highest magnitude tier whose threshold `mass` exceeds.
    /// None when `mass` does not exceed the tiny threshold.
    pub fn classify(&self, mass: f32) -> Option<Magnitude> {
        sweep(&self.as_array(), mass).map(|tier| Magnitude::ALL[tier])
    }
}

/// Minimum speed (exclusive) for each speed tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedThresholds {
    pub slow: f32,
    pub mid_speed: f32,
    pub quick: f32,
    pub epic: f32,
}

impl Default for SpeedThresholds {
    fn default() -> Self {
        Self {
            slow: 0.01,
            mid_speed: 10.0,
            quick: 100.0,
            epic: 1000.0,
        }
    }
}

impl SpeedThresholds {
    pub fn as_array(&self) -> [f32; 4] {
        [self.slow, self.mid_speed, self.quick, self.epic]
    }

    /// Highest speed tier whose threshold `speed` exceeds.
    pub fn classify(&self, speed: f32) -> Option<Speed> {
        sweep(&self.as_array(), speed).map(|tier| Speed::ALL[tier])
    }
}

/// Random volume ranges per speed tier. When disabled every event plays at
/// full volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedModulation {
    pub enabled: bool,
    pub slow: (f32, f32),
    pub mid_speed: (f32, f32),
    pub quick: (f32, f32),
    pub epic: (f32, f32),
}

impl Default for SpeedModulation {
    fn default() -> Self {
        Self {
            enabled: false,
            slow: (0.1, 0.3),
            mid_speed: (0.3, 0.6),
            quick: (0.6, 0.8),
            epic: (0.8, 1.0),
        }
    }
}

impl SpeedModulation {
    pub fn range(&self, speed: Speed) -> (f32, f32) {
        match speed {
            Speed::Slow => self.slow,
            Speed::MidSpeed => self.mid_speed,
            Speed::Quick => self.quick,
            Speed::Epic => self.epic,
        }
    }

    /// Volume modifier for an event of the given tier.
    pub fn volume<R: Rng + ?Sized>(&self, speed: Speed, rng: &mut R) -> f32 {
        if !self.enabled {
            return 1.0;
        }
        let (min, max) = self.range(speed);
        let t: f32 = rng.gen();
        (min + (max - min) * t).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mass_tiers() {
        let t = MassThresholds::default();
        assert_eq!(t.classify(0.0), None);
        assert_eq!(t.classify(0.05), Some(Magnitude::Tiny));
        assert_eq!(t.classify(1.0), Some(Magnitude::Small));
        assert_eq!(t.classify(50.0), Some(Magnitude::Medium));
        assert_eq!(t.classify(500.0), Some(Magnitude::Large));
        assert_eq!(t.classify(1.0e6), Some(Magnitude::Epic));
    }

    #[test]
    fn test_threshold_equality_is_not_enough() {
        let t = MassThresholds::default();
        assert_eq!(t.classify(t.tiny), None);
        assert_eq!(t.classify(t.small), Some(Magnitude::Tiny));
        assert_eq!(t.classify(t.epic), Some(Magnitude::Large));

        let s = SpeedThresholds::default();
        assert_eq!(s.classify(s.slow), None);
        assert_eq!(s.classify(s.mid_speed), Some(Speed::Slow));
    }

    #[test]
    fn test_mass_classification_is_monotonic() {
        let t = MassThresholds::default();
        let samples: Vec<f32> = (0..2000).map(|i| i as f32 * 0.75).collect();
        let mut previous = None;
        for mass in samples {
            let tier = t.classify(mass);
            assert!(tier >= previous, "tier dropped at mass {mass}");
            previous = tier;
        }
    }

    #[test]
    fn test_sweep_stops_at_first_miss() {
        // Out-of-order table: epic threshold below large is never reached
        let t = MassThresholds {
            tiny: 1.0,
            small: 2.0,
            medium: 3.0,
            large: 100.0,
            epic: 4.0,
        };
        assert_eq!(t.classify(50.0), Some(Magnitude::Medium));
    }

    #[test]
    fn test_nan_never_classifies() {
        assert_eq!(MassThresholds::default().classify(f32::NAN), None);
        assert_eq!(SpeedThresholds::default().classify(f32::NAN), None);
    }

    #[test]
    fn test_speed_tiers() {
        let s = SpeedThresholds::default();
        assert_eq!(s.classify(0.05), Some(Speed::Slow));
        assert_eq!(s.classify(20.0), Some(Speed::MidSpeed));
        assert_eq!(s.classify(200.0), Some(Speed::Quick));
        assert_eq!(s.classify(2000.0), Some(Speed::Epic));
    }

    #[test]
    fn test_modulation_disabled_is_full_volume() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = SpeedModulation::default();
        for speed in Speed::ALL {
            assert!((m.volume(speed, &mut rng) - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_modulation_samples_tier_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let m = SpeedModulation {
            enabled: true,
            ..Default::default()
        };
        for speed in Speed::ALL {
            let (min, max) = m.range(speed);
            for _ in 0..200 {
                let v = m.volume(speed, &mut rng);
                assert!(v >= min && v <= max, "{v} outside [{min}, {max}] for {speed:?}");
            }
        }
    }
}
