use crate::constants::{EVENT_KIND_STRIDE, MAGNITUDE_STRIDE, SOUND_KEY_DOMAIN, SPEED_STRIDE};
use crate::error::UproarError;
use crate::types::{Magnitude, PhysicsEventKind, Speed, SurfaceType};

/// Composite lookup key for the sound definition table.
///
/// Mixed-radix packing, each digit scaled by the product of the domain sizes
/// before it:
///
/// ```text
/// key = surface + kind * 63 + magnitude * 126 + speed * 630
/// ```
///
/// Every (surface, kind, magnitude, speed) tuple maps to a distinct value in
/// `[0, SOUND_KEY_DOMAIN)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoundDefinitionKey(u32);

impl SoundDefinitionKey {
    pub fn encode(
        surface_type: SurfaceType,
        kind: PhysicsEventKind,
        magnitude: Magnitude,
        speed: Speed,
    ) -> Self {
        Self(
            surface_type.index()
                + kind.index() * EVENT_KIND_STRIDE
                + magnitude.index() * MAGNITUDE_STRIDE
                + speed.index() * SPEED_STRIDE,
        )
    }

    /// Split the key back into its four digits.
    pub fn decode(self) -> (SurfaceType, PhysicsEventKind, Magnitude, Speed) {
        let raw = self.0;
        let speed = Speed::ALL[(raw / SPEED_STRIDE) as usize];
        let rem = raw % SPEED_STRIDE;
        let magnitude = Magnitude::ALL[(rem / MAGNITUDE_STRIDE) as usize];
        let rem = rem % MAGNITUDE_STRIDE;
        let kind = PhysicsEventKind::ALL[(rem / EVENT_KIND_STRIDE) as usize];
        let surface = rem % EVENT_KIND_STRIDE;
        // surface < EVENT_KIND_STRIDE == SURFACE_TYPE_COUNT, always in range
        let surface_type = SurfaceType::new(surface as u8).unwrap_or_default();
        (surface_type, kind, magnitude, speed)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for SoundDefinitionKey {
    type Error = UproarError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        if raw < SOUND_KEY_DOMAIN {
            Ok(Self(raw))
        } else {
            Err(UproarError::InvalidSoundKey(raw))
        }
    }
}
