pub mod binding;
pub mod chaos;
pub mod debug;
pub mod static_mesh;

pub use binding::{ActorComponents, ComponentId, ComponentInfo, ComponentKind, ComponentList};
pub use chaos::{ChaosBreakEvent, ChaosCollisionEvent, ChaosListener};
pub use debug::DebugPoint;
pub use static_mesh::{HitEvent, StaticMeshListener};
