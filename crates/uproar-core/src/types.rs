use std::fmt;
use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::SURFACE_TYPE_COUNT;
use crate::error::UproarError;
use crate::key::SoundDefinitionKey;

/// Physical surface identifier reported by the physics engine.
/// Always within `[0, SURFACE_TYPE_COUNT)`; 0 is the engine default surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SurfaceType(u8);

impl SurfaceType {
    /// Engine default surface, used when a component has no physical material.
    pub const DEFAULT: SurfaceType = SurfaceType(0);

    pub fn new(raw: u8) -> Result<Self, UproarError> {
        if (raw as u32) < SURFACE_TYPE_COUNT {
            Ok(Self(raw))
        } else {
            Err(UproarError::SurfaceTypeOutOfRange(raw))
        }
    }

    pub fn index(self) -> u32 {
        self.0 as u32
    }
}

impl TryFrom<u8> for SurfaceType {
    type Error = UproarError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<SurfaceType> for u8 {
    fn from(surface: SurfaceType) -> u8 {
        surface.0
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            write!(f, "SurfaceType_Default")
        } else {
            write!(f, "SurfaceType{}", self.0)
        }
    }
}

/// Kind of physics occurrence that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PhysicsEventKind {
    Break = 0,
    Collision = 1,
}

impl PhysicsEventKind {
    pub const ALL: [PhysicsEventKind; 2] = [PhysicsEventKind::Break, PhysicsEventKind::Collision];

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Mass classification of a physics event, ordered smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Magnitude {
    Tiny = 0,
    Small = 1,
    Medium = 2,
    Large = 3,
    Epic = 4,
}

impl Magnitude {
    pub const ALL: [Magnitude; 5] = [
        Magnitude::Tiny,
        Magnitude::Small,
        Magnitude::Medium,
        Magnitude::Large,
        Magnitude::Epic,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Velocity classification of a physics event, ordered slowest to fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Speed {
    Slow = 0,
    MidSpeed = 1,
    Quick = 2,
    Epic = 3,
}

impl Speed {
    pub const ALL: [Speed; 4] = [Speed::Slow, Speed::MidSpeed, Speed::Quick, Speed::Epic];

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// Reference to a sound asset. Cloning is cheap (shared string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundHandle(Arc<str>);

impl SoundHandle {
    pub fn new(path: &str) -> Self {
        Self(Arc::from(path))
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SoundHandle {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for SoundHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw measurement produced by an ingestion adapter for one physics callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsEventSample {
    pub location: Vec3,
    pub surface_type: SurfaceType,
    pub kind: PhysicsEventKind,
    pub mass: f32,
    /// Scalar speed: velocity length, angular velocity length, or delta-v.
    pub speed: f32,
}

/// A physics event after tier classification, ready for deduplication.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedEvent {
    pub location: Vec3,
    pub kind: PhysicsEventKind,
    pub surface_type: SurfaceType,
    pub magnitude: Magnitude,
    pub speed: Speed,
    /// Volume scale in [0, 1]; 1.0 unless speed modulation is enabled.
    pub volume_modifier: f32,
}

impl ClassifiedEvent {
    /// Composite key joining this event to the sound definition table.
    pub fn sound_key(&self) -> SoundDefinitionKey {
        SoundDefinitionKey::encode(self.surface_type, self.kind, self.magnitude, self.speed)
    }
}

/// Receiver of classified physics events. The subsystem implements this as
/// its ingestion entry point; adapters only see the trait.
pub trait PhysicsEventSink {
    fn physics_event(&mut self, event: ClassifiedEvent);
}

impl PhysicsEventSink for Vec<ClassifiedEvent> {
    fn physics_event(&mut self, event: ClassifiedEvent) {
        self.push(event);
    }
}
