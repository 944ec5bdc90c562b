use glam::Vec3;
use rand::Rng;
use uproar_core::types::{PhysicsEventKind, PhysicsEventSample, SurfaceType};

/// How the single listener of a scene moves, if there is one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListenerMotion {
    None,
    Fixed(Vec3),
    /// Circles the scene center in the XY plane.
    Orbit { radius: f32, radians_per_tick: f32 },
}

/// Configuration for a single benchmark scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub name: &'static str,
    pub events_per_tick: u32,
    /// Edge length of the cube events are scattered in, centered on the origin.
    pub spread: f32,
    /// Share of events that are breaks rather than collisions.
    pub break_fraction: f64,
    /// Surface types are drawn from `[0, surface_count)`.
    pub surface_count: u8,
    pub listener: ListenerMotion,
}

/// Return the standard suite of benchmark scenes.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "rubble-pile",
            events_per_tick: 400,
            spread: 300.0,
            break_fraction: 0.3,
            surface_count: 4,
            listener: ListenerMotion::Fixed(Vec3::new(0.0, -1500.0, 0.0)),
        },
        SceneConfig {
            name: "scattered-debris",
            events_per_tick: 400,
            spread: 15_000.0,
            break_fraction: 0.1,
            surface_count: 4,
            listener: ListenerMotion::Fixed(Vec3::ZERO),
        },
        SceneConfig {
            name: "moving-listener",
            events_per_tick: 250,
            spread: 4_000.0,
            break_fraction: 0.2,
            surface_count: 4,
            listener: ListenerMotion::Orbit {
                radius: 3_000.0,
                radians_per_tick: 0.02,
            },
        },
        SceneConfig {
            name: "no-listener",
            events_per_tick: 250,
            spread: 4_000.0,
            break_fraction: 0.2,
            surface_count: 4,
            listener: ListenerMotion::None,
        },
    ]
}

/// Listener translations for the given tick.
pub fn listener_translations(config: &SceneConfig, tick: u32) -> Vec<Vec3> {
    match config.listener {
        ListenerMotion::None => Vec::new(),
        ListenerMotion::Fixed(position) => vec![position],
        ListenerMotion::Orbit {
            radius,
            radians_per_tick,
        } => {
            let angle = tick as f32 * radians_per_tick;
            vec![Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)]
        }
    }
}

/// Raw physics samples for one tick. Mass and speed are log-uniform so every
/// tier shows up, including some that fail classification.
pub fn generate_tick_events<R: Rng + ?Sized>(
    config: &SceneConfig,
    rng: &mut R,
) -> Vec<PhysicsEventSample> {
    let half = config.spread * 0.5;
    (0..config.events_per_tick)
        .map(|_| {
            let location = Vec3::new(
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
            );
            let kind = if rng.gen_bool(config.break_fraction) {
                PhysicsEventKind::Break
            } else {
                PhysicsEventKind::Collision
            };
            let surface_type =
                SurfaceType::new(rng.gen_range(0..config.surface_count)).unwrap_or_default();
            PhysicsEventSample {
                location,
                surface_type,
                kind,
                mass: 10f32.powf(rng.gen_range(-2.5..3.5)),
                speed: 10f32.powf(rng.gen_range(-2.5..3.5)),
            }
        })
        .collect()
}
