use std::collections::HashMap;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uproar_core::types::{PhysicsEventKind, PhysicsEventSample, PhysicsEventSink, SurfaceType};
use uproar_rules::classifier::{BreakEventSettings, CollisionEventSettings, EventClassifier};

use crate::binding::{ActorComponents, ComponentId, ComponentKind};
use crate::debug::{DebugPoint, RED, YELLOW};

/// A rigid body fracturing off a geometry collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaosBreakEvent {
    pub component: ComponentId,
    pub location: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub mass: f32,
    /// Surface of the component's physical material, if it has one.
    pub surface_type: Option<SurfaceType>,
}

/// Two rigid bodies of a geometry collection colliding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaosCollisionEvent {
    pub component: ComponentId,
    pub location: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    pub surface_type: Option<SurfaceType>,
}

/// Adapter for break and collision events of an entity's geometry
/// collections.
///
/// Binds lazily: `tick` retries until the owner exposes at least one geometry
/// collection, then every such component is recorded once and binding stops.
pub struct ChaosListener {
    break_settings: Option<BreakEventSettings>,
    collision_settings: Option<CollisionEventSettings>,
    debug_draw: bool,
    bound: HashMap<ComponentId, String>,
    initialized: bool,
    rng: StdRng,
    debug_points: Vec<DebugPoint>,
}

impl ChaosListener {
    pub fn new(
        break_settings: Option<BreakEventSettings>,
        collision_settings: Option<CollisionEventSettings>,
    ) -> Self {
        Self::with_rng(break_settings, collision_settings, StdRng::from_entropy())
    }

    /// Same as `new` with a deterministic volume modulation stream.
    pub fn with_seed(
        break_settings: Option<BreakEventSettings>,
        collision_settings: Option<CollisionEventSettings>,
        seed: u64,
    ) -> Self {
        Self::with_rng(break_settings, collision_settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        break_settings: Option<BreakEventSettings>,
        collision_settings: Option<CollisionEventSettings>,
        rng: StdRng,
    ) -> Self {
        Self {
            break_settings,
            collision_settings,
            debug_draw: false,
            bound: HashMap::new(),
            initialized: false,
            rng,
            debug_points: Vec::new(),
        }
    }

    pub fn set_debug_draw(&mut self, enabled: bool) {
        self.debug_draw = enabled;
    }

    pub fn set_break_settings(&mut self, settings: Option<BreakEventSettings>) {
        self.break_settings = settings;
    }

    pub fn set_collision_settings(&mut self, settings: Option<CollisionEventSettings>) {
        self.collision_settings = settings;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_bound_to(&self, component: ComponentId) -> bool {
        self.bound.contains_key(&component)
    }

    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    /// Per-frame update. Retries binding until it succeeds.
    pub fn tick<A: ActorComponents + ?Sized>(&mut self, owner: &A) {
        if self.initialized {
            return;
        }
        for component in owner.components() {
            if component.kind != ComponentKind::GeometryCollection {
                continue;
            }
            if !self.bound.contains_key(&component.id) {
                log::debug!("Chaos listener bound to {} ({})", component.name, component.id);
                self.bound.insert(component.id, component.name.clone());
            }
        }
        self.initialized = !self.bound.is_empty();
    }

    pub fn on_break_event<S: PhysicsEventSink + ?Sized>(&mut self, event: &ChaosBreakEvent, sink: &mut S) {
        let Some(name) = self.bound.get(&event.component) else {
            return;
        };
        let surface_type = event.surface_type.unwrap_or(SurfaceType::DEFAULT);
        let angular_speed = event.angular_velocity.length();

        if let Some(settings) = &self.break_settings {
            let sample = PhysicsEventSample {
                location: event.location,
                surface_type,
                kind: PhysicsEventKind::Break,
                mass: event.mass,
                speed: angular_speed,
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
                "Breaking event: {}, surface type: {}, mass: {}, angular velocity: {}",
                name,
                surface_type,
                event.mass,
                angular_speed
            );
        }
    }

    pub fn on_collision_event<S: PhysicsEventSink + ?Sized>(
        &mut self,
        event: &ChaosCollisionEvent,
        sink: &mut S,
    ) {
        let Some(name) = self.bound.get(&event.component) else {
            return;
        };
        let surface_type = event.surface_type.unwrap_or(SurfaceType::DEFAULT);
        let speed = event.velocity.length();

        if let Some(settings) = &self.collision_settings {
            let sample = PhysicsEventSample {
                location: event.location,
                surface_type,
                kind: PhysicsEventKind::Collision,
                mass: event.mass,
                speed,
            };
            if let Some(classified) = settings.classify(&sample, &mut self.rng) {
                sink.physics_event(classified);
                if self.debug_draw {
                    log::info!(
                        "Collision listener event: {}, speed: {:?}, magnitude: {:?}",
                        name,
                        classified.speed,
                        classified.magnitude
                    );
                    self.debug_points.push(DebugPoint::for_event(&classified, YELLOW));
                }
            }
        }

        if self.debug_draw {
            log::info!(
                "Collision event: {}, surface type: {}, velocity: {}, mass: {}",
                name,
                surface_type,
                speed,
                event.mass
            );
        }
    }

    /// Drain debug points recorded since the last call.
    pub fn take_debug_points(&mut self) -> Vec<DebugPoint> {
        std::mem::take(&mut self.debug_points)
    }
}
