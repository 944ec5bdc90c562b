use glam::{Affine3A, Vec3};

/// Resolves event locations relative to the closest audio listener.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListenerLocator {
    translations: Vec<Vec3>,
}

impl ListenerLocator {
    pub fn new(translations: Vec<Vec3>) -> Self {
        Self { translations }
    }

    /// Build from listener world transforms; only the translation is used.
    pub fn from_transforms(transforms: &[Affine3A]) -> Self {
        Self {
            translations: transforms.iter().map(|t| Vec3::from(t.translation)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    /// `location` offset by the listener translation that yields the shortest
    /// vector. Ties keep the earlier listener. With no listeners the location
    /// is returned unchanged.
    pub fn closest_listener_relative(&self, location: Vec3) -> Vec3 {
        let mut best = location;
        let mut best_len = f32::INFINITY;
        for &translation in &self.translations {
            let candidate = location + translation;
            let len = candidate.length_squared();
            if len < best_len {
                best = candidate;
                best_len = len;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_listeners_returns_location() {
        let locator = ListenerLocator::default();
        let location = Vec3::new(12.0, -4.0, 300.0);
        assert_eq!(locator.closest_listener_relative(location), location);
    }

    #[test]
    fn test_single_listener_offsets() {
        let locator = ListenerLocator::new(vec![Vec3::new(100.0, 0.0, 0.0)]);
        assert_eq!(
            locator.closest_listener_relative(Vec3::new(-40.0, 5.0, 0.0)),
            Vec3::new(60.0, 5.0, 0.0)
        );
    }

    #[test]
    fn test_picks_smallest_candidate() {
        let locator = ListenerLocator::new(vec![
            Vec3::new(500.0, 0.0, 0.0),
            Vec3::new(-90.0, 0.0, 0.0),
            Vec3::new(0.0, 200.0, 0.0),
        ]);
        assert_eq!(
            locator.closest_listener_relative(Vec3::new(100.0, 0.0, 0.0)),
            Vec3::new(10.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_tie_keeps_first_listener() {
        let locator = ListenerLocator::new(vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(-100.0, 0.0, 0.0)]);
        assert_eq!(
            locator.closest_listener_relative(Vec3::new(50.0, 0.0, 0.0)),
            Vec3::new(50.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_from_transforms_uses_translation() {
        let transform = Affine3A::from_rotation_translation(
            glam::Quat::from_rotation_z(1.2),
            Vec3::new(3.0, 4.0, 5.0),
        );
        let locator = ListenerLocator::from_transforms(&[transform]);
        assert_eq!(locator.len(), 1);
        assert_eq!(locator.closest_listener_relative(Vec3::ZERO), Vec3::new(3.0, 4.0, 5.0));
    }
}
