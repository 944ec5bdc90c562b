pub mod constants;
pub mod error;
pub mod key;
pub mod math;
pub mod settings;
pub mod types;

pub use error::UproarError;
pub use key::SoundDefinitionKey;
pub use math::{CellKey, SpatialGrid};
pub use settings::UproarSettings;
pub use types::{
    ClassifiedEvent, Magnitude, PhysicsEventKind, PhysicsEventSample, PhysicsEventSink,
    SoundHandle, Speed, SurfaceType,
};
