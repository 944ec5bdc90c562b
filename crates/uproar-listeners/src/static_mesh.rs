use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uproar_core::constants::SMALL_NUMBER;
use uproar_core::types::{PhysicsEventKind, PhysicsEventSample, PhysicsEventSink, SurfaceType};
use uproar_rules::classifier::{EventClassifier, StaticMeshHitEventSettings};

use crate::binding::{ActorComponents, ComponentId, ComponentKind};
use crate::debug::{DebugPoint, RED};

/// A static mesh component being hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    pub component: ComponentId,
    pub location: Vec3,
    pub normal_impulse: Vec3,
    /// Constant mass of the hit component.
    pub component_mass: f32,
    pub surface_type: Option<SurfaceType>,
}

impl HitEvent {
    /// Static mesh mass is constant, so impulse over mass is the velocity
    /// change of the hit.
    pub fn delta_velocity(&self) -> f32 {
        self.normal_impulse.length() / self.component_mass.max(SMALL_NUMBER)
    }
}

/// Adapter for hit events of an entity's first static mesh component.
pub struct StaticMeshListener {
    settings: Option<StaticMeshHitEventSettings>,
    debug_draw: bool,
    bound: Option<(ComponentId, String)>,
    rng: StdRng,
    debug_points: Vec<DebugPoint>,
}

impl StaticMeshListener {
    pub fn new(settings: Option<StaticMeshHitEventSettings>) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    pub fn with_seed(settings: Option<StaticMeshHitEventSettings>, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: Option<StaticMeshHitEventSettings>, rng: StdRng) -> Self {
        Self {
            settings,
            debug_draw: false,
            bound: None,
            rng,
            debug_points: Vec::new(),
        }
    }

    pub fn set_debug_draw(&mut self, enabled: bool) {
        self.debug_draw = enabled;
    }

    pub fn set_settings(&mut self, settings: Option<StaticMeshHitEventSettings>) {
        self.settings = settings;
    }

    pub fn is_initialized(&self) -> bool {
        self.bound.is_some()
    }

    pub fn bound_component(&self) -> Option<ComponentId> {
        self.bound.as_ref().map(|(id, _)| *id)
    }

    /// Per-frame update. Retries binding until the owner has a static mesh.
    pub fn tick<A: ActorComponents + ?Sized>(&mut self, owner: &A) {
        if self.bound.is_some() {
            return;
        }
        if let Some(mesh) = owner
            .components()
            .iter()
            .find(|c| c.kind == ComponentKind::StaticMesh)
        {
            log::debug!("Static mesh listener bound to {} ({})", mesh.name, mesh.id);
            self.bound = Some((mesh.id, mesh.name.clone()));
        }
    }

    pub fn on_hit_event<S: PhysicsEventSink + ?Sized>(&mut self, event: &HitEvent, sink: &mut S) {
        let Some((bound_id, name)) = &self.bound else {
            return;
        };
        if *bound_id != event.component {
            return;
        }
        let surface_type = event.surface_type.unwrap_or(SurfaceType::DEFAULT);
        let delta_velocity = event.delta_velocity();

        if let Some(settings) = &self.settings {
            let sample = PhysicsEventSample {
                location: event.location,
                surface_type,
                kind: PhysicsEventKind::Collision,
                mass: event.component_mass,
                speed: delta_velocity,
            };
            if let Some(classified) = settings.classify(&sample, &mut self.rng) {
                sink.physics_event(classified);
                if self.debug_draw {
                    self.debug_points.push(DebugPoint::for_event(&classified, RED));
                }
            }
        }

        if self.debug_draw {
            log::info!(
                "Static mesh hit event: {}, surface type: {}, mass: {}, delta velocity: {}",
                name,
                surface_type,
                event.component_mass,
                delta_velocity
            );
        }
    }

    pub fn take_debug_points(&mut self) -> Vec<DebugPoint> {
        std::mem::take(&mut self.debug_points)
    }
}
